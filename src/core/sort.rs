//! Sort key resolution and record ordering
//!
//! A `sortBy` parameter has the shape `<key>-<direction>`, e.g. `amount-desc`
//! or `name-asc`. Unknown keys fall back to newest-first by date; they are
//! never an error.
//!
//! Names are ordered by English collation at secondary strength (accents
//! count, case does not), the same collation the MongoDB backend requests.
//! Dates are ordered by their full timestamp; dates that do not parse sort
//! as the oldest.

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::LazyLock;

use super::record::SaleRecord;

static NAME_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(locale!("en").into(), options)
        .inspect_err(|e| {
            tracing::warn!(error = %e, "English collator unavailable, names compare by case folding")
        })
        .ok()
});

/// Compare two customer names under English secondary-strength collation
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Date,
    Quantity,
    Name,
    Amount,
}

impl SortKey {
    /// Resolve a key token; unrecognized tokens yield `None`
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "quantity" => Some(SortKey::Quantity),
            "name" => Some(SortKey::Name),
            "amount" => Some(SortKey::Amount),
            _ => None,
        }
    }

    /// Store column backing this key
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Quantity => "Quantity",
            SortKey::Name => "Customer Name",
            SortKey::Amount => "Total Amount",
        }
    }

    /// Direction used when the request names the key without a direction
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKey::Name => SortDirection::Asc,
            SortKey::Date | SortKey::Quantity | SortKey::Amount => SortDirection::Desc,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Quantity => "quantity",
            SortKey::Name => "name",
            SortKey::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Any token starting with "asc" (case-insensitive) is ascending
    pub fn from_token(token: &str) -> Self {
        if token.trim().to_lowercase().starts_with("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// MongoDB sort order value
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A resolved ordering: key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

/// A selectable sort option, as offered to clients
#[derive(Debug, Clone, Serialize)]
pub struct SortOption {
    pub value: String,
    pub label: &'static str,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Resolve a `sortBy` parameter
    ///
    /// - absent or unknown key → date, descending
    /// - key without direction → the key's default direction
    /// - explicit direction → ascending iff it starts with "asc"
    pub fn parse(sort_by: Option<&str>) -> Self {
        let Some(raw) = sort_by.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        let (key_token, direction_token) = match raw.split_once('-') {
            Some((key, direction)) => (key, Some(direction)),
            None => (raw, None),
        };

        let Some(key) = SortKey::from_token(key_token) else {
            return Self::default();
        };

        let direction = direction_token
            .map(SortDirection::from_token)
            .unwrap_or_else(|| key.default_direction());

        Self { key, direction }
    }

    /// Canonical `<key>-<direction>` form
    pub fn as_param(&self) -> String {
        format!("{}-{}", self.key.token(), self.direction.token())
    }

    /// Compare two records under this ordering
    pub fn compare(&self, a: &SaleRecord, b: &SaleRecord) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.timestamp_millis().cmp(&b.timestamp_millis()),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Name => compare_names(&a.customer_name, &b.customer_name),
            SortKey::Amount => a.total_amount.total_cmp(&b.total_amount),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable in-place sort; records comparing equal keep their relative order
    pub fn sort<R: AsRef<SaleRecord>>(&self, records: &mut [R]) {
        records.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// The options offered by the sort dropdown
    pub fn options() -> Vec<SortOption> {
        [
            (SortKey::Date, SortDirection::Desc, "Date (Newest First)"),
            (SortKey::Date, SortDirection::Asc, "Date (Oldest First)"),
            (SortKey::Quantity, SortDirection::Desc, "Quantity (High to Low)"),
            (SortKey::Quantity, SortDirection::Asc, "Quantity (Low to High)"),
            (SortKey::Name, SortDirection::Asc, "Customer Name (A-Z)"),
            (SortKey::Name, SortDirection::Desc, "Customer Name (Z-A)"),
            (SortKey::Amount, SortDirection::Desc, "Total Amount (High to Low)"),
            (SortKey::Amount, SortDirection::Asc, "Total Amount (Low to High)"),
        ]
        .into_iter()
        .map(|(key, direction, label)| SortOption {
            value: SortSpec::new(key, direction).as_param(),
            label,
        })
        .collect()
    }
}

impl AsRef<SaleRecord> for SaleRecord {
    fn as_ref(&self) -> &SaleRecord {
        self
    }
}
