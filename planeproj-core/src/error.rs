/// Error taxonomy for cloud generation and projection
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CloudError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CloudError {
    /// A caller-supplied argument is outside its valid domain
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A table does not have the column/row layout a point cloud requires
    #[error("shape mismatch: expected {expected} {extent}, found {found}")]
    ShapeMismatch {
        extent: Extent,
        expected: usize,
        found: usize,
    },

    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
}

/// The table dimension a [`CloudError::ShapeMismatch`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Columns,
    Rows,
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Columns => f.write_str("columns"),
            Extent::Rows => f.write_str("rows"),
        }
    }
}

impl CloudError {
    /// A table that should be `expected` columns wide but is `found` wide
    pub fn column_count(expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            extent: Extent::Columns,
            expected,
            found,
        }
    }

    pub fn invalid_argument(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
