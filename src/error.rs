//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbviz crate.
#[derive(Debug)]
pub enum OrbvizError {
    /// The mesh would need more vertices than the index type can address.
    ///
    /// Raised before anything is appended, so the buffer that reported it
    /// still holds a well-formed (if incomplete) mesh.
    CapacityExceeded {
        /// Vertex count the append would have produced.
        required: usize,
        /// Largest vertex count the index type can address.
        capacity: usize,
    },
    /// A frame's arrays disagree with each other (primitive or coefficient
    /// counts do not match the orbital list).
    InconsistentFrame(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for OrbvizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { required, capacity } => write!(
                f,
                "mesh capacity exceeded: {required} vertices needed, \
                 {capacity} addressable"
            ),
            Self::InconsistentFrame(msg) => {
                write!(f, "inconsistent frame: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for OrbvizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbvizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
