pub mod common;
pub mod misc;
