//! Writing Commands back out as Modelfile text

pub mod formatter;
mod renderer;
mod syntax;

pub use formatter::*;
pub use renderer::*;
pub use syntax::*;
