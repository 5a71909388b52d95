use thiserror::Error;

use crate::model::Tile;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed hand: {0}")]
    MalformedHand(String),
    #[error("invalid tile: {0}")]
    InvalidTile(String),
    #[error("more than 4 copies of {0}")]
    TooManyCopies(Tile),
    #[error("too many tiles in hand: {0}")]
    TooManyTiles(usize),
    #[error("tile not found in hand: {0}")]
    TileNotFound(Tile),
    #[error("complete hand without yaku")]
    NoYaku,
    #[error("not a winning hand")]
    NotWinningHand,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
