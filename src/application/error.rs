use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// 呼び出し側がメッセージを出し分けるための分類。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyBorrowed,
    NotBorrowed,
    Persistence,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::EmptyField { .. })
            | Self::Domain(DomainError::UnsupportedCharacter { .. })
            | Self::Domain(DomainError::IdSpaceExhausted(_)) => ErrorKind::Validation,
            Self::Domain(DomainError::BookNotFound(_)) => ErrorKind::NotFound,
            Self::Domain(DomainError::AlreadyBorrowed { .. }) => ErrorKind::AlreadyBorrowed,
            Self::Domain(DomainError::NotBorrowed { .. }) => ErrorKind::NotBorrowed,
            Self::Storage(_) => ErrorKind::Persistence,
        }
    }
}
