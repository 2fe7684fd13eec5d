//! Seams between the document model, its readers and the table writers.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::{category::Category, error::Error};

/// One output table row: column values in header order.
pub type Row = Vec<String>;

/// Construction of a document from raw extract bytes.
///
/// Implementors only provide [`Parser::from_reader`]; the file, string and byte
/// entry points funnel into it.
///
/// ```rust,no_run
/// use realty_csv::{Parser, TransactionBatch};
///
/// let batch = TransactionBatch::read_from("XML/extract.xml")?;
/// for contract in batch.lease_contracts() {
///     println!("{} object(s)", contract.objects.len());
/// }
/// # Ok::<(), realty_csv::Error>(())
/// ```
pub trait Parser {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Opens `path` and reads the whole document from it.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_bytes(s.as_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// A contract record that expands into rows of one output table.
pub trait Flatten {
    /// Table the rows belong to.
    const CATEGORY: Category;

    /// Rows contributed by this record, in object order.
    fn rows(&self) -> impl Iterator<Item = Row> + '_;
}
