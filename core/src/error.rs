use thiserror::Error;

/// Reasons an action is refused. None of these leave the session in a broken
/// state, they are reported to the player and play continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Cannot use {letter}, all covering tiles must be used in the same word")]
    CoveringTileNotUsed { letter: char },
    #[error("Can only swap available tiles")]
    TileNotSwappable,
    #[error("No more tiles available for swapping!")]
    SwapPoolExhausted,
    #[error("No swaps remaining!")]
    NoSwapsRemaining,
    #[error("Swap mode is not active")]
    NotInSwapMode,
    #[error("Invalid tile letter {0:?}")]
    InvalidLetter(char),
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Saved game could not be restored: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
