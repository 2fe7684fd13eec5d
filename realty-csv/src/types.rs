//! Document model of a real-estate transactions extract.
//!
//! The structs mirror the XML schema one-to-one. Readers decode into these; the
//! flatteners in [`crate::flatten`] turn them into table rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::registration::RegistrationType;

/// One deserialized extract file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionBatch {
    #[serde(default)]
    pub transactions: Option<Transactions>,
}

impl TransactionBatch {
    pub fn sale_contracts(&self) -> &[SaleContract] {
        self.transactions
            .as_ref()
            .map(|t| t.sale_contracts.as_slice())
            .unwrap_or_default()
    }

    pub fn lease_contracts(&self) -> &[LeaseContract] {
        self.transactions
            .as_ref()
            .map(|t| t.lease_contracts.as_slice())
            .unwrap_or_default()
    }

    pub fn mortgage_contracts(&self) -> &[MortgageContract] {
        self.transactions
            .as_ref()
            .map(|t| t.mortgage_contracts.as_slice())
            .unwrap_or_default()
    }

    pub fn shared_construction_contracts(&self) -> &[SharedConstructionContract] {
        self.transactions
            .as_ref()
            .map(|t| t.shared_construction_contracts.as_slice())
            .unwrap_or_default()
    }

    /// `true` when none of the four collections holds a contract.
    pub fn is_empty(&self) -> bool {
        self.sale_contracts().is_empty()
            && self.lease_contracts().is_empty()
            && self.mortgage_contracts().is_empty()
            && self.shared_construction_contracts().is_empty()
    }
}

/// The four contract collections. An absent collection element and an empty one
/// both decode to an empty `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transactions {
    #[serde(default, deserialize_with = "de::sale_contracts")]
    pub sale_contracts: Vec<SaleContract>,
    #[serde(default, deserialize_with = "de::lease_contracts")]
    pub lease_contracts: Vec<LeaseContract>,
    #[serde(default, deserialize_with = "de::mortgage_contracts")]
    pub mortgage_contracts: Vec<MortgageContract>,
    #[serde(default, deserialize_with = "de::shared_construction_contracts")]
    pub shared_construction_contracts: Vec<SharedConstructionContract>,
}

/// Purchase and sale agreement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaleContract {
    #[serde(default)]
    pub registration_type: RegistrationType,
    #[serde(default, deserialize_with = "de::date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub document_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "de::objects")]
    pub objects: Vec<SaleObject>,
}

/// A parcel (or share of one) transferred by a [`SaleContract`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaleObject {
    #[serde(default)]
    pub cadastral_number: String,
    #[serde(default, deserialize_with = "de::decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "de::integer")]
    pub part_numerator: Option<u64>,
    #[serde(default, alias = "part_denomenator", deserialize_with = "de::integer")]
    pub part_denominator: Option<u64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub part_right_price: Option<Decimal>,
    #[serde(default, deserialize_with = "de::text")]
    pub share_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeaseContract {
    #[serde(default)]
    pub registration_type: RegistrationType,
    #[serde(default, deserialize_with = "de::date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub document_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "de::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub end_date: Option<NaiveDate>,
    /// Free text as written in the agreement, e.g. "11 месяцев".
    #[serde(default, deserialize_with = "de::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "de::objects")]
    pub objects: Vec<CadastralObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MortgageContract {
    #[serde(default)]
    pub registration_type: RegistrationType,
    #[serde(default, deserialize_with = "de::date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub document_date: Option<NaiveDate>,
    #[serde(default, alias = "occurence_date", deserialize_with = "de::date")]
    pub occurrence_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub execution_obligations_date: Option<NaiveDate>,
    /// Valuation of the pledged objects. Free text, often multi-line.
    #[serde(default, deserialize_with = "de::text")]
    pub objects_price: Option<String>,
    #[serde(default, deserialize_with = "de::objects")]
    pub objects: Vec<CadastralObject>,
}

/// Agreement on participation in shared construction. References exactly one object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SharedConstructionContract {
    #[serde(default)]
    pub registration_type: RegistrationType,
    #[serde(default, deserialize_with = "de::date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::date")]
    pub document_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub objects_price: Option<Decimal>,
    #[serde(rename = "objects", deserialize_with = "de::single_object")]
    pub object: CadastralObject,
}

/// An object identified only by its cadastral number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CadastralObject {
    #[serde(default)]
    pub cadastral_number: String,
}

impl CadastralObject {
    pub fn new(cadastral_number: impl Into<String>) -> Self {
        Self {
            cadastral_number: cadastral_number.into(),
        }
    }
}

/// Parses a registry date: `YYYY-MM-DD`, anything starting with one (`xs:dateTime`,
/// zoned `xs:date`), or `DD.MM.YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        return Some(date);
    }
    let (head, rest) = (s.get(..10)?, s.get(10..)?);
    if !(rest.is_empty() || rest.starts_with(['T', ' ', 'Z', '+', '-'])) {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Parses a money amount. Tolerates a decimal comma and space digit grouping.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let normalized: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse().ok()
}

mod de {
    use std::fmt::Display;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn blank_to_none(raw: Option<String>) -> Option<String> {
        raw.filter(|s| !s.trim().is_empty())
    }

    fn invalid<E: serde::de::Error>(field: &'static str, value: impl Display) -> E {
        E::custom(crate::Error::InvalidValue {
            field,
            value: value.to_string(),
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(blank_to_none(Option::<String>::deserialize(d)?))
    }

    pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        blank_to_none(Option::<String>::deserialize(d)?)
            .map(|s| super::parse_date(&s).ok_or_else(|| invalid("date", s.trim())))
            .transpose()
    }

    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        blank_to_none(Option::<String>::deserialize(d)?)
            .map(|s| super::parse_decimal(&s).ok_or_else(|| invalid("amount", s.trim())))
            .transpose()
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        blank_to_none(Option::<String>::deserialize(d)?)
            .map(|s| s.trim().parse().map_err(|_| invalid("integer", s.trim())))
            .transpose()
    }

    #[derive(Deserialize)]
    struct ObjectList<T> {
        #[serde(rename = "object", default = "Vec::new")]
        items: Vec<T>,
    }

    pub fn objects<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(ObjectList::<T>::deserialize(d)?.items)
    }

    pub fn single_object<'de, D: Deserializer<'de>>(d: D) -> Result<CadastralObject, D::Error> {
        #[derive(Deserialize)]
        struct Single {
            object: CadastralObject,
        }
        Ok(Single::deserialize(d)?.object)
    }

    macro_rules! contract_list {
        ($fn_name:ident, $item:ty, $tag:tt) => {
            pub fn $fn_name<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<$item>, D::Error> {
                #[derive(Deserialize)]
                struct List {
                    #[serde(rename = $tag, default)]
                    items: Vec<$item>,
                }
                Ok(List::deserialize(d)?.items)
            }
        };
    }

    contract_list!(sale_contracts, SaleContract, "sale_contract");
    contract_list!(lease_contracts, LeaseContract, "lease_contract");
    contract_list!(mortgage_contracts, MortgageContract, "mortgage_contract");
    contract_list!(
        shared_construction_contracts,
        SharedConstructionContract,
        "shared_construction_contract"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2021-03-15"), NaiveDate::from_ymd_opt(2021, 3, 15));
    }

    #[test]
    fn test_parse_datetime_and_zoned_date() {
        let expected = NaiveDate::from_ymd_opt(2020, 12, 1);
        assert_eq!(parse_date("2020-12-01T10:15:00"), expected);
        assert_eq!(parse_date("2020-12-01+03:00"), expected);
        assert_eq!(parse_date(" 2020-12-01Z "), expected);
    }

    #[test]
    fn test_parse_russian_date() {
        assert_eq!(parse_date("05.07.2019"), NaiveDate::from_ymd_opt(2019, 7, 5));
    }

    #[test]
    fn test_reject_garbage_dates() {
        assert_eq!(parse_date("2021-13-01"), None);
        assert_eq!(parse_date("2021-03-15abc"), None);
        assert_eq!(parse_date("вчера"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal("1000000"), Some(Decimal::new(1_000_000, 0)));
        assert_eq!(parse_decimal("1500.50"), Some(Decimal::new(150_050, 2)));
        assert_eq!(parse_decimal("1 500,50"), Some(Decimal::new(150_050, 2)));
        assert_eq!(parse_decimal("дорого"), None);
    }

    #[test]
    fn test_empty_batch_has_no_contracts() {
        let batch = TransactionBatch::default();
        assert!(batch.is_empty());
        assert!(batch.sale_contracts().is_empty());
        assert!(batch.shared_construction_contracts().is_empty());
    }

    #[test]
    fn test_batch_accessors_expose_collections() {
        let batch = TransactionBatch {
            transactions: Some(Transactions {
                lease_contracts: vec![LeaseContract::default()],
                ..Default::default()
            }),
        };
        assert!(!batch.is_empty());
        assert_eq!(batch.lease_contracts().len(), 1);
        assert!(batch.sale_contracts().is_empty());
    }
}
