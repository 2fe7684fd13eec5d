//! Conversion driver.
//!
//! A run takes every extract in the input directory, in file name order, and appends
//! its contracts to the four per-run tables (sale, lease, mortgage, shared
//! construction). The first file that fails stops the run; tables already written
//! stay on disk.

use std::{
    fs,
    ops::AddAssign,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use globset::GlobBuilder;
use serde::Serialize;

use crate::{
    category::Category,
    error::Error,
    flatten::flatten,
    formats::csv::append_rows,
    options::ConvertOptions,
    traits::{Flatten, Parser},
    types::TransactionBatch,
};

/// The four tables of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    paths: [PathBuf; 4],
}

impl OutputFiles {
    pub fn new(dir: impl AsRef<Path>, timestamp: NaiveDateTime) -> Self {
        let dir = dir.as_ref();
        Self {
            paths: Category::ALL.map(|category| dir.join(category.file_name(timestamp))),
        }
    }

    pub fn path(&self, category: Category) -> &Path {
        &self.paths[category.index()]
    }
}

/// Rows written per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub sale: usize,
    pub lease: usize,
    pub mortgage: usize,
    pub shared_construction: usize,
}

impl RowCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Sale => self.sale,
            Category::Lease => self.lease,
            Category::Mortgage => self.mortgage,
            Category::SharedConstruction => self.shared_construction,
        }
    }

    fn slot(&mut self, category: Category) -> &mut usize {
        match category {
            Category::Sale => &mut self.sale,
            Category::Lease => &mut self.lease,
            Category::Mortgage => &mut self.mortgage,
            Category::SharedConstruction => &mut self.shared_construction,
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

impl AddAssign for RowCounts {
    fn add_assign(&mut self, other: Self) {
        for category in Category::ALL {
            *self.slot(category) += other.get(category);
        }
    }
}

/// Outcome of one converted extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub rows: RowCounts,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<FileSummary>,
    /// Tables that received rows during this run, in category order.
    pub outputs: Vec<PathBuf>,
    pub rows: RowCounts,
}

/// Run events, reported to the observer passed to [`Converter::run`].
#[derive(Debug)]
pub enum Progress<'a> {
    Converting {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    Converted {
        path: &'a Path,
        summary: &'a FileSummary,
    },
    Failed {
        path: &'a Path,
        error: &'a Error,
    },
}

/// Lists the files in `dir` whose name matches `pattern` (case-insensitive), sorted by path.
pub fn discover_inputs(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    let matcher = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !matcher.is_match(entry.file_name()) {
            continue;
        }
        if !entry.file_type()?.is_file() {
            log::warn!("Skipping {}: not a regular file", entry.path().display());
            continue;
        }
        inputs.push(entry.path());
    }
    inputs.sort();
    log::info!("Found {} input file(s) in {}", inputs.len(), dir.display());
    Ok(inputs)
}

/// Appends the rows of `contracts` to their table. Nothing is touched for an empty slice.
pub fn write_category<T: Flatten>(contracts: &[T], outputs: &OutputFiles) -> Result<usize, Error> {
    if contracts.is_empty() {
        return Ok(0);
    }
    log::debug!("Writing {} {} contract(s)", contracts.len(), T::CATEGORY);
    append_rows(
        outputs.path(T::CATEGORY),
        T::CATEGORY.headers(),
        flatten(contracts),
    )
}

/// Writes one batch: sale, lease, mortgage, then shared construction.
pub fn convert_batch(batch: &TransactionBatch, outputs: &OutputFiles) -> Result<RowCounts, Error> {
    Ok(RowCounts {
        sale: write_category(batch.sale_contracts(), outputs)?,
        lease: write_category(batch.lease_contracts(), outputs)?,
        mortgage: write_category(batch.mortgage_contracts(), outputs)?,
        shared_construction: write_category(batch.shared_construction_contracts(), outputs)?,
    })
}

/// Reads and writes one extract. Errors carry the extract's path.
pub fn convert_file(path: impl AsRef<Path>, outputs: &OutputFiles) -> Result<FileSummary, Error> {
    let path = path.as_ref();
    let rows = TransactionBatch::read_from(path)
        .and_then(|batch| {
            if batch.is_empty() {
                log::warn!("{}: no contracts in extract", path.display());
            }
            convert_batch(&batch, outputs)
        })
        .map_err(|e| Error::in_file(path, e))?;
    log::debug!("{}: {} row(s)", path.display(), rows.total());
    Ok(FileSummary {
        path: path.to_path_buf(),
        rows,
    })
}

/// Converts every extract of one run into the run's tables.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    outputs: OutputFiles,
}

impl Converter {
    /// Fixes the run timestamp and therefore the output file names.
    pub fn new(options: ConvertOptions) -> Self {
        let outputs = OutputFiles::new(&options.output_dir, options.run_timestamp());
        Self { options, outputs }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn outputs(&self) -> &OutputFiles {
        &self.outputs
    }

    /// Runs the conversion, reporting each step to `observer`.
    ///
    /// # Errors
    ///
    /// [`Error::NoInputFiles`] when nothing matches; otherwise the first failure,
    /// wrapped in [`Error::File`]. Files after the failing one are not attempted.
    pub fn run<F>(&self, mut observer: F) -> Result<ConversionReport, Error>
    where
        F: FnMut(Progress<'_>),
    {
        let inputs = discover_inputs(&self.options.input_dir, &self.options.input_pattern)?;
        if inputs.is_empty() {
            return Err(Error::NoInputFiles(self.options.input_dir.clone()));
        }
        fs::create_dir_all(&self.options.output_dir)?;

        let total = inputs.len();
        let mut files = Vec::with_capacity(total);
        let mut rows = RowCounts::default();
        for (index, path) in inputs.iter().enumerate() {
            observer(Progress::Converting { index, total, path });
            match convert_file(path, &self.outputs) {
                Ok(summary) => {
                    rows += summary.rows;
                    observer(Progress::Converted {
                        path,
                        summary: &summary,
                    });
                    files.push(summary);
                }
                Err(error) => {
                    log::error!("Conversion aborted: {}", error);
                    observer(Progress::Failed {
                        path,
                        error: &error,
                    });
                    return Err(error);
                }
            }
        }

        let outputs = Category::ALL
            .into_iter()
            .filter(|category| rows.get(*category) > 0)
            .map(|category| self.outputs.path(category).to_path_buf())
            .collect();
        log::info!("Converted {} file(s), {} row(s)", files.len(), rows.total());

        Ok(ConversionReport {
            input_dir: self.options.input_dir.clone(),
            output_dir: self.options.output_dir.clone(),
            files,
            outputs,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registration::RegistrationType,
        types::{CadastralObject, LeaseContract, SharedConstructionContract, Transactions},
    };
    use chrono::NaiveDate;

    const BROKEN_XML: &str =
        "<real_estate_transactions><transactions></oops></real_estate_transactions>";

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_output_paths_follow_category_labels() {
        let outputs = OutputFiles::new("OUT", stamp());
        assert_eq!(
            outputs.path(Category::Mortgage),
            Path::new("OUT/Сделки на основании договоров ипотеки 2024-05-06 12-00-00.csv")
        );
    }

    #[test]
    fn test_row_counts_accumulate() {
        let mut counts = RowCounts {
            sale: 2,
            ..Default::default()
        };
        counts += RowCounts {
            sale: 1,
            lease: 4,
            ..Default::default()
        };
        assert_eq!(counts.sale, 3);
        assert_eq!(counts.lease, 4);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_discover_inputs_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.xml", "a.XML", "notes.txt", "c.xml.bak"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        fs::create_dir(tmp.path().join("dir.xml")).unwrap();

        let found = discover_inputs(tmp.path(), "*.xml").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.XML", "b.xml"]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_inputs(tmp.path(), "[").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_convert_batch_only_touches_populated_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let outputs = OutputFiles::new(tmp.path(), stamp());
        let batch = TransactionBatch {
            transactions: Some(Transactions {
                lease_contracts: vec![LeaseContract {
                    registration_type: RegistrationType::Lease,
                    objects: vec![CadastralObject::new("1"), CadastralObject::new("2")],
                    ..Default::default()
                }],
                shared_construction_contracts: vec![SharedConstructionContract::default()],
                ..Default::default()
            }),
        };

        let counts = convert_batch(&batch, &outputs).unwrap();
        assert_eq!(
            counts,
            RowCounts {
                lease: 2,
                shared_construction: 1,
                ..Default::default()
            }
        );
        assert!(!outputs.path(Category::Sale).exists());
        assert!(outputs.path(Category::Lease).exists());
        assert!(!outputs.path(Category::Mortgage).exists());
        assert!(outputs.path(Category::SharedConstruction).exists());
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let outputs = OutputFiles::new(tmp.path(), stamp());

        let counts = convert_batch(&TransactionBatch::default(), &outputs).unwrap();
        assert_eq!(counts.total(), 0);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_without_contracts_converts_to_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("empty.xml");
        fs::write(&input, "<real_estate_transactions><transactions/></real_estate_transactions>")
            .unwrap();
        let outputs = OutputFiles::new(tmp.path(), stamp());

        let summary = convert_file(&input, &outputs).unwrap();
        assert_eq!(summary.rows, RowCounts::default());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_convert_file_error_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("broken.xml");
        fs::write(&input, BROKEN_XML).unwrap();
        let outputs = OutputFiles::new(tmp.path(), stamp());

        let err = convert_file(&input, &outputs).unwrap_err();
        match &err {
            Error::File { path, source } => {
                assert_eq!(path, &input);
                assert!(matches!(**source, Error::XmlParse(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
