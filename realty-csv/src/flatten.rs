//! Flattening of contract records into table rows.
//!
//! Contracts with an object list produce one row per object, repeating the
//! contract-level columns in each. Shared construction contracts produce exactly one row.

use std::{fmt::Display, iter};

use chrono::NaiveDate;

use crate::{
    category::Category,
    traits::{Flatten, Row},
    types::{LeaseContract, MortgageContract, SaleContract, SharedConstructionContract},
};

/// Output format of date columns.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Rows for every contract in `contracts`, lazily, in document order.
pub fn flatten<T: Flatten>(contracts: &[T]) -> impl Iterator<Item = Row> + '_ {
    contracts.iter().flat_map(|contract| contract.rows())
}

/// Makes free text safe for a single `;`-delimited cell: line breaks become a space,
/// semicolons become a period.
pub fn sanitize(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .map(|c| match c {
            '\r' | '\n' => ' ',
            ';' => '.',
            c => c,
        })
        .collect()
}

fn date(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn value<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(sanitize).unwrap_or_default()
}

impl Flatten for SaleContract {
    const CATEGORY: Category = Category::Sale;

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.objects.iter().map(move |object| {
            vec![
                self.registration_type.label().to_string(),
                date(&self.registration_date),
                date(&self.document_date),
                value(&self.price),
                object.cadastral_number.clone(),
                value(&object.price),
                value(&object.part_numerator),
                value(&object.part_denominator),
                value(&object.part_right_price),
                text(&object.share_description),
            ]
        })
    }
}

impl Flatten for LeaseContract {
    const CATEGORY: Category = Category::Lease;

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.objects.iter().map(move |object| {
            vec![
                self.registration_type.label().to_string(),
                date(&self.registration_date),
                date(&self.document_date),
                value(&self.price),
                date(&self.start_date),
                date(&self.end_date),
                text(&self.duration),
                object.cadastral_number.clone(),
            ]
        })
    }
}

impl Flatten for MortgageContract {
    const CATEGORY: Category = Category::Mortgage;

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.objects.iter().map(move |object| {
            vec![
                self.registration_type.label().to_string(),
                date(&self.registration_date),
                date(&self.document_date),
                date(&self.occurrence_date),
                date(&self.execution_obligations_date),
                text(&self.objects_price),
                object.cadastral_number.clone(),
            ]
        })
    }
}

impl Flatten for SharedConstructionContract {
    const CATEGORY: Category = Category::SharedConstruction;

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        iter::once(vec![
            self.registration_type.label().to_string(),
            date(&self.registration_date),
            date(&self.document_date),
            text(&self.subject),
            value(&self.objects_price),
            self.object.cadastral_number.clone(),
        ])
    }
}
