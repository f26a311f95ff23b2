//! Raw grid types and loading.

mod parser;
mod source;

pub use parser::{GridFormat, GridParser, GridParserConfig, GridSource};
pub use source::{Cell, RawGrid};
