pub mod error;
pub mod position;
pub mod token;
pub mod types;

pub use error::{LexError, SyntaxError};
pub use position::{Position, Range};
pub use token::{Token, TokenKind};
pub use types::Type;
