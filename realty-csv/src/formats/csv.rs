//! Semicolon-delimited CSV output.
//!
//! Tables grow across a run: each call appends to the file and writes the header only
//! when it creates the file.

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{error::Error, traits::Row};

/// Byte-order mark written at the start of every new table.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Builds the writer used for every table.
fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .has_headers(false);
    builder
}

/// Appends `rows` to the table at `path` and returns how many were written.
///
/// A missing file is created with a UTF-8 BOM and the `headers` row first. An empty
/// `rows` leaves the file system untouched. The file is flushed and closed before
/// returning.
pub fn append_rows<P, I>(path: P, headers: &[&str], rows: I) -> Result<usize, Error>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Row>,
{
    let path = path.as_ref();
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return Ok(0);
    }

    let is_new = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    if is_new {
        log::info!("Creating table {}", path.display());
        out.write_all(UTF8_BOM)?;
    }

    let mut wtr = writer_builder().from_writer(out);
    if is_new {
        wtr.write_record(headers)?;
    }

    let mut written = 0;
    for row in rows {
        wtr.write_record(&row)?;
        written += 1;
    }
    wtr.flush()?;
    log::debug!("Appended {} row(s) to {}", written, path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn row(values: &[&str]) -> Row {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn read_table(path: &Path) -> String {
        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM), "table must start with a BOM");
        String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap()
    }

    #[test]
    fn test_new_file_gets_header_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("table.csv");

        let written = append_rows(&path, &["A", "B"], vec![row(&["1", "2"])]).unwrap();
        assert_eq!(written, 1);
        let written = append_rows(&path, &["A", "B"], vec![row(&["3", "4"]), row(&["5", "6"])])
            .unwrap();
        assert_eq!(written, 2);

        assert_eq!(read_table(&path), "A;B\n1;2\n3;4\n5;6\n");
    }

    #[test]
    fn test_empty_rows_do_not_create_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("never.csv");

        let written = append_rows(&path, &["A"], Vec::<Row>::new()).unwrap();
        assert_eq!(written, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_file_is_not_given_a_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("existing.csv");
        fs::write(&path, "previous line\n").unwrap();

        append_rows(&path, &["A", "B"], vec![row(&["x", "y"])]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous line\nx;y\n");
    }

    #[test]
    fn test_unicode_values_are_written_as_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("unicode.csv");

        append_rows(&path, &["Вид"], vec![row(&["Право собственности"])]).unwrap();
        assert_eq!(read_table(&path), "Вид\nПраво собственности\n");
    }

    #[test]
    fn test_unsafe_values_are_quoted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("quoted.csv");

        append_rows(&path, &["A", "B"], vec![row(&["a;b", "plain"])]).unwrap();
        assert_eq!(read_table(&path), "A;B\n\"a;b\";plain\n");
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no-such-dir").join("table.csv");

        let err = append_rows(&path, &["A"], vec![row(&["1"])]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
