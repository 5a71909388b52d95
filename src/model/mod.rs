mod define;
mod hand;
mod meld;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use hand::*;
pub use meld::*;
pub use tile::*;
