#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

pub mod ai;
pub mod error;
pub mod hand;
pub mod model;
pub mod settlement;
pub mod util;

pub use error::{Error, Result};
