// Types representing the directives of a Modelfile

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
