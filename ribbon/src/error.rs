use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RibbonError {
    /// The generator produced nothing for the index the ribbon was seeded with.
    #[error("generator produced no item for seed index {index}")]
    SeedRefused { index: i64 },

    #[error("no item available at index {index}")]
    IndexUnavailable { index: i64 },

    #[error("navigation rejected while a drag gesture is in progress")]
    GestureActive,

    #[error("invalid viewport extent: {extent}")]
    InvalidViewport { extent: f64 },
}

pub type Result<T> = core::result::Result<T, RibbonError>;
