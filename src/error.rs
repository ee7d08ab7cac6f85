use thiserror::Error;

/// Errors raised by the fill-geometry core.
///
/// Both variants are caller contract violations: the core never clamps an
/// out-of-range input, the rendering glue decides what to do with it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("angle table index {index} out of range (expected 0..=100)")]
    OutOfRange { index: i32 },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = GeometryError> = std::result::Result<T, E>;
