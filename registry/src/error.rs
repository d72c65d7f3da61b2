// Registry Error Codes
//
// Error Code Ranges:
// - 100-199: Access control errors
// - 200-299: Type catalog errors
// - 300-399: Token progression errors
// - 400-499: Input validation errors
// - 500-599: Batch errors
// - 900-999: System errors

use thiserror::Error;

use crate::{
    identity::Identity,
    roles::{role_display_name, RoleId},
    serializer::ReaderError,
    types::{TokenId, TokenKind, TypeId},
};

/// Registry operation result type
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    // ========================================
    // Access control errors (100-199)
    // ========================================
    #[error("account {account} is missing role {}", role_display_name(.role))]
    Unauthorized { account: Identity, role: RoleId },

    // ========================================
    // Type catalog errors (200-299)
    // ========================================
    #[error("token type {0} does not exist")]
    UnknownType(TypeId),

    #[error("token type {0} is already initialized")]
    DuplicateType(TypeId),

    #[error("token type traits do not describe a {expected}")]
    TraitsMismatch { expected: TokenKind },

    // ========================================
    // Token progression errors (300-399)
    // ========================================
    #[error("token {0} does not exist")]
    UnknownToken(TokenId),

    #[error("cannot decrease level from {current} to {requested}")]
    LevelDecrease { current: u32, requested: u32 },

    #[error("cannot exceed max level {max} (requested {requested})")]
    LevelExceedsMax { max: u32, requested: u32 },

    #[error("cannot decrease the counter from {current} to {requested}")]
    CounterDecrease { current: u64, requested: u64 },

    // ========================================
    // Input validation errors (400-499)
    // ========================================
    #[error("name must not be empty")]
    InvalidName,

    #[error("name is {length} bytes long, maximum is {max}")]
    NameTooLong { length: usize, max: usize },

    #[error("max level must be at least 1")]
    InvalidMaxLevel,

    #[error("locator prefix is {length} bytes long, maximum is {max}")]
    PrefixTooLong { length: usize, max: usize },

    #[error("cannot mint to the zero identity")]
    InvalidOwner,

    #[error("invalid collection symbol")]
    InvalidSymbol,

    // ========================================
    // Batch errors (500-599)
    // ========================================
    #[error("batch is empty")]
    EmptyBatch,

    #[error("batch of {size} operations exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("max batch size must be at least 1")]
    InvalidBatchLimit,

    #[error("operation #{index} failed: {cause}")]
    SubOperationFailed {
        index: usize,
        cause: Box<RegistryError>,
    },

    #[error("malformed operation: {0}")]
    Decode(#[from] ReaderError),

    // ========================================
    // System errors (900-999)
    // ========================================
    #[error("arithmetic overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Stable numeric code reported to the host
    pub fn code(&self) -> u64 {
        match self {
            Self::Unauthorized { .. } => 100,
            Self::UnknownType(_) => 200,
            Self::DuplicateType(_) => 201,
            Self::TraitsMismatch { .. } => 202,
            Self::UnknownToken(_) => 300,
            Self::LevelDecrease { .. } => 301,
            Self::LevelExceedsMax { .. } => 302,
            Self::CounterDecrease { .. } => 303,
            Self::InvalidName => 400,
            Self::NameTooLong { .. } => 401,
            Self::InvalidMaxLevel => 402,
            Self::PrefixTooLong { .. } => 403,
            Self::InvalidOwner => 404,
            Self::InvalidSymbol => 405,
            Self::EmptyBatch => 500,
            Self::BatchTooLarge { .. } => 501,
            Self::SubOperationFailed { .. } => 502,
            Self::Decode(_) => 503,
            Self::InvalidBatchLimit => 504,
            Self::Overflow => 900,
            Self::Storage(_) => 901,
        }
    }

    /// The innermost error, unwrapping batch failures
    pub fn root_cause(&self) -> &RegistryError {
        let mut current = self;
        while let Self::SubOperationFailed { cause, .. } = current {
            current = cause.as_ref();
        }
        current
    }

    /// Index of the failing batch entry, if this error comes from a batch
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            Self::SubOperationFailed { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.root_cause(), Self::Unauthorized { .. })
    }

    pub(crate) fn at_index(self, index: usize) -> Self {
        Self::SubOperationFailed {
            index,
            cause: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::OPERATOR_ROLE;

    #[test]
    fn test_root_cause_unwraps_batch_failure() {
        let err = RegistryError::LevelDecrease {
            current: 5,
            requested: 4,
        }
        .at_index(3);

        assert_eq!(err.code(), 502);
        assert_eq!(err.failed_index(), Some(3));
        assert_eq!(
            err.root_cause(),
            &RegistryError::LevelDecrease {
                current: 5,
                requested: 4
            }
        );
        assert_eq!(err.root_cause().code(), 301);
    }

    #[test]
    fn test_unauthorized_names_account_and_role() {
        let account = Identity::new([0xab; 32]);
        let err = RegistryError::Unauthorized {
            account,
            role: OPERATOR_ROLE,
        };
        let message = err.to_string();
        assert!(message.contains(&account.to_hex()));
        assert!(message.contains("OPERATOR"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_error_messages_name_the_rule() {
        assert_eq!(
            RegistryError::DuplicateType(1).to_string(),
            "token type 1 is already initialized"
        );
        assert_eq!(
            RegistryError::LevelExceedsMax {
                max: 40,
                requested: 41
            }
            .to_string(),
            "cannot exceed max level 40 (requested 41)"
        );
    }
}
