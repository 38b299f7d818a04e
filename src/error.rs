// Error types for grid interaction.

use crate::validation::ValidationError;
use crate::CellAddress;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Recoverable errors raised by grid state transitions.
///
/// Neither variant is fatal: an invalid transition leaves the state untouched,
/// and a validation failure keeps the cell in edit mode for correction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The requested transition would break the focus/edit invariants.
    #[error("invalid transition at {address}: {reason}")]
    InvalidTransition {
        address: CellAddress,
        reason: &'static str,
    },

    /// Editor input did not satisfy the column's constraints.
    #[error("invalid value at {address}: {source}")]
    Validation {
        address: CellAddress,
        #[source]
        source: ValidationError,
    },
}

impl GridError {
    pub fn invalid_transition(address: CellAddress, reason: &'static str) -> Self {
        Self::InvalidTransition { address, reason }
    }

    pub fn validation(address: CellAddress, source: ValidationError) -> Self {
        Self::Validation { address, source }
    }

    pub fn address(&self) -> &CellAddress {
        match self {
            Self::InvalidTransition { address, .. } | Self::Validation { address, .. } => address,
        }
    }
}
