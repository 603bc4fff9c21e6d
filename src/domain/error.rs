use super::model::id::BookId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must not contain commas or line breaks")]
    UnsupportedCharacter { field: &'static str },

    #[error("no book ID left after {0}")]
    IdSpaceExhausted(BookId),

    #[error("no book with ID {0}")]
    BookNotFound(BookId),

    #[error("sorry, '{title}' (ID: {id}) is already borrowed")]
    AlreadyBorrowed { id: BookId, title: String },

    #[error("'{title}' (ID: {id}) is not borrowed, it is already in the library")]
    NotBorrowed { id: BookId, title: String },
}
