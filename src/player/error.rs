use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("the playlist is empty")]
    EmptyPlaylist,

    #[error("track {index} is out of range (playlist has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
