//! Error type shared by every filter.

/// Failure raised at filter entry, before any pixel is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid parameter `{param}` for `{filter}`: {reason}")]
    InvalidParameter {
        filter: &'static str,
        param: String,
        reason: String,
    },
    #[error("invalid grid dimensions: {0}")]
    Dimension(String),
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

impl FilterError {
    pub(crate) fn invalid(
        filter: &'static str,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            filter,
            param: param.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
