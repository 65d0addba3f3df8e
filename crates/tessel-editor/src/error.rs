use thiserror::Error;

use crate::session::ModeRejection;

/// Errors produced by editor operations.
///
/// Every rejected call leaves the geometry store and transform state exactly
/// as they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// A point position or color component outside its legal range.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// A polygon with the wrong number of indices or an index with no point.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Pointer input arrived while the session does not allow editing.
    ///
    /// Not a failure as such: the message is meant to be shown to the user.
    #[error("{0}")]
    ModeRejected(ModeRejection),
}

impl EditorError {
    pub(crate) fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub(crate) fn invalid_polygon(msg: impl Into<String>) -> Self {
        Self::InvalidPolygon(msg.into())
    }
}

impl From<ModeRejection> for EditorError {
    fn from(r: ModeRejection) -> Self {
        Self::ModeRejected(r)
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
