//! Flat error taxonomy for the handful of construction-time failures the
//! core can report. Everything per-frame and per-pixel stays infallible
//! (degenerate triangles, depth-test rejection, malformed indices) per the
//! design's no-exceptions discipline — there is nothing more to add here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannelCount(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
