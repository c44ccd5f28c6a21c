//! Free-text search over customer name and phone number

use super::normalize::{is_all_digits, normalize_text};
use super::record::SaleRecord;

/// A non-empty search term, matched against customer name and phone number
///
/// Records arriving through [`SaleRecord`] already carry their phone number
/// as canonical text, so a case-insensitive substring test on that text
/// covers numeric and string storage alike. Store adapters that query raw
/// documents use [`SearchMatcher::numeric_value`] to add the numeric
/// equality alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatcher {
    query: String,
    lowered: String,
}

impl SearchMatcher {
    /// Build a matcher; blank input imposes no constraint and yields `None`
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            lowered: normalize_text(query),
        })
    }

    /// The trimmed search term
    pub fn query(&self) -> &str {
        &self.query
    }

    /// True when the term consists only of digits
    pub fn is_numeric(&self) -> bool {
        is_all_digits(&self.query)
    }

    /// The term as an integer, when it is all digits and fits in an `i64`
    pub fn numeric_value(&self) -> Option<i64> {
        if self.is_numeric() {
            self.query.parse().ok()
        } else {
            None
        }
    }

    /// OR-group: name contains the term, or phone contains the term
    pub fn matches(&self, record: &SaleRecord) -> bool {
        record.customer_name.to_lowercase().contains(&self.lowered)
            || record
                .phone_number
                .as_str()
                .to_lowercase()
                .contains(&self.lowered)
    }
}
