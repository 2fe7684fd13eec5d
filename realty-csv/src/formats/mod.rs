//! Input and output formats: XML extracts in, semicolon-delimited tables out.

pub mod csv;
pub mod xml;

pub use self::csv::{UTF8_BOM, append_rows};
pub use self::xml::{declared_encoding, decode};
