//! Reading of transaction extracts from XML.
//!
//! Input is decoded to UTF-8 before deserialization: a byte-order mark wins, otherwise
//! the encoding named in the XML declaration is used (extracts are often `windows-1251`).

use std::{
    borrow::Cow,
    io::{BufRead, Read},
};

use encoding_rs::{Encoding, UTF_8};

use crate::{error::Error, traits::Parser, types::TransactionBatch};

impl Parser for TransactionBatch {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(Error::Io)?;
        let text = decode(&bytes)?;
        let batch: TransactionBatch =
            quick_xml::de::from_str(text.trim_start_matches('\u{feff}'))?;
        log::debug!(
            "Parsed batch: {} sale, {} lease, {} mortgage, {} shared construction contract(s)",
            batch.sale_contracts().len(),
            batch.lease_contracts().len(),
            batch.mortgage_contracts().len(),
            batch.shared_construction_contracts().len()
        );
        Ok(batch)
    }
}

/// Decodes raw document bytes to UTF-8.
///
/// A byte-order mark takes precedence over the declaration; without either the
/// document must be UTF-8. Bytes that are malformed in the chosen encoding are an
/// [`Error::Encoding`], never replaced.
pub fn decode(bytes: &[u8]) -> Result<String, Error> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => match declared_encoding(bytes) {
            Some(label) => (
                Encoding::for_label(label.as_bytes())
                    .ok_or_else(|| Error::Encoding(format!("unsupported encoding `{}`", label)))?,
                bytes,
            ),
            None => (UTF_8, bytes),
        },
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| Error::Encoding(format!("malformed {} input", encoding.name())))
}

/// The `encoding` pseudo-attribute of the XML declaration, if the document starts with one.
pub fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(crate::formats::csv::UTF8_BOM).unwrap_or(bytes);
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&rest[..end]).ok()?;

    let after = &decl[decl.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let label = &value[..value.find(quote)?];
    Some(label.trim().to_string())
}
