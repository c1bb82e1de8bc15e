//! Scanner for Modelfile documents, along with the supporting pieces needed
//! to present errors and write the parsed directives back out again.

pub mod formatting;
pub mod language;
pub mod parsing;
pub mod problem;
