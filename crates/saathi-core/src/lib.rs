pub mod chat;
pub mod error;
pub mod intent;
pub mod markup;
pub mod scan;

// Re-export common error type
pub use error::{Result, SaathiError};
