#![forbid(unsafe_code)]
//! Real-estate transaction extracts to CSV.
//!
//! Reads XML extracts describing registered real-estate contracts (sale, lease,
//! mortgage, shared construction) and flattens them into one semicolon-delimited
//! table per contract kind. All conversion goes through the [`TransactionBatch`]
//! document model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use realty_csv::{ConvertOptions, Converter, Progress};
//!
//! let options = ConvertOptions::new()
//!     .with_input_dir("XML")
//!     .with_output_dir("OUT");
//! options.ensure_dirs()?;
//!
//! let report = Converter::new(options).run(|event| {
//!     if let Progress::Converting { path, .. } = event {
//!         println!("{} ...", path.display());
//!     }
//! })?;
//! println!("{} row(s) written", report.rows.total());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Tables
//!
//! - **Sale**: one row per sold object, repeating the contract columns
//! - **Lease**: one row per leased object
//! - **Mortgage**: one row per pledged object
//! - **Shared construction**: one row per contract
//!
//! Each run writes to its own set of files, stamped with the run start time; every
//! extract in the run appends to the same set.

pub mod category;
pub mod converter;
pub mod error;
pub mod flatten;
pub mod formats;
pub mod options;
pub mod registration;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    category::Category,
    converter::{
        ConversionReport, Converter, FileSummary, OutputFiles, Progress, RowCounts,
        convert_batch, convert_file, discover_inputs,
    },
    error::Error,
    flatten::{flatten, sanitize},
    options::ConvertOptions,
    registration::RegistrationType,
    traits::{Flatten, Parser, Row},
    types::{
        CadastralObject, LeaseContract, MortgageContract, SaleContract, SaleObject,
        SharedConstructionContract, TransactionBatch, Transactions,
    },
};
