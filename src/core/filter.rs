//! Filter predicate builder
//!
//! A [`FilterTree`] is the declarative form of a [`FilterRequest`]: a
//! conjunction of independent clauses, one per active dimension, each of
//! which is internally an OR over the selected alternatives.
//!
//! The tree has two consumers that must agree on every record:
//! - [`FilterTree::matches`] evaluates it in memory
//! - the MongoDB backend lowers each [`Clause`] to a query document
//!
//! Clause order follows the request pipeline: search, facets, age, date, tags.

use chrono::NaiveDate;

use super::normalize::normalize_text;
use super::query::FilterRequest;
use super::record::SaleRecord;
use super::search::SearchMatcher;

/// Multi-select facet dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Region,
    Gender,
    Category,
    PaymentMethod,
}

impl FacetField {
    /// Store column backing this facet
    pub fn column(&self) -> &'static str {
        match self {
            FacetField::Region => "Customer Region",
            FacetField::Gender => "Gender",
            FacetField::Category => "Product Category",
            FacetField::PaymentMethod => "Payment Method",
        }
    }

    pub fn value<'a>(&self, record: &'a SaleRecord) -> &'a str {
        match self {
            FacetField::Region => &record.customer_region,
            FacetField::Gender => &record.gender,
            FacetField::Category => &record.product_category,
            FacetField::PaymentMethod => &record.payment_method,
        }
    }
}

/// One AND-ed condition of a filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Name or phone contains the search term
    Search(SearchMatcher),

    /// The normalized field equals one of the normalized values
    FacetIn { field: FacetField, values: Vec<String> },

    /// Inclusive age bounds; at least one is set
    AgeRange { min: Option<i64>, max: Option<i64> },

    /// Inclusive calendar-date bounds; at least one is set
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },

    /// The tags string contains any of the normalized tags
    TagsContainAny(Vec<String>),
}

impl Clause {
    pub fn matches(&self, record: &SaleRecord) -> bool {
        match self {
            Clause::Search(matcher) => matcher.matches(record),
            Clause::FacetIn { field, values } => {
                let value = normalize_text(field.value(record));
                values.iter().any(|candidate| *candidate == value)
            }
            Clause::AgeRange { min, max } => {
                min.is_none_or(|min| record.age >= min) && max.is_none_or(|max| record.age <= max)
            }
            Clause::DateRange { from, to } => match record.calendar_date() {
                Some(date) => {
                    from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
                }
                None => false,
            },
            Clause::TagsContainAny(tags) => {
                let haystack = normalize_text(&record.tags);
                tags.iter().any(|tag| haystack.contains(tag.as_str()))
            }
        }
    }
}

/// Conjunction of clauses; an empty tree accepts every record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterTree {
    clauses: Vec<Clause>,
}

impl FilterTree {
    /// Translate a request into its clauses, skipping inactive dimensions
    pub fn from_request(request: &FilterRequest) -> Self {
        let mut clauses = Vec::new();

        if let Some(matcher) = request.search.as_deref().and_then(SearchMatcher::new) {
            clauses.push(Clause::Search(matcher));
        }

        let facets = [
            (FacetField::Region, &request.regions),
            (FacetField::Gender, &request.genders),
            (FacetField::Category, &request.categories),
            (FacetField::PaymentMethod, &request.payment_methods),
        ];
        for (field, selected) in facets {
            let values = normalized_set(selected);
            if !values.is_empty() {
                clauses.push(Clause::FacetIn { field, values });
            }
        }

        if request.age_min.is_some() || request.age_max.is_some() {
            clauses.push(Clause::AgeRange {
                min: request.age_min,
                max: request.age_max,
            });
        }

        if request.date_from.is_some() || request.date_to.is_some() {
            clauses.push(Clause::DateRange {
                from: request.date_from,
                to: request.date_to,
            });
        }

        let tags = normalized_set(&request.tags);
        if !tags.is_empty() {
            clauses.push(Clause::TagsContainAny(tags));
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when the record satisfies every clause
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// The tree as a reusable predicate
    pub fn predicate(&self) -> impl Fn(&SaleRecord) -> bool + '_ {
        move |record| self.matches(record)
    }
}

/// Normalize, drop empties and dedupe while keeping first-seen order
fn normalized_set(values: &[String]) -> Vec<String> {
    let mut set: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| normalize_text(v)) {
        if !value.is_empty() && !set.contains(&value) {
            set.push(value);
        }
    }
    set
}
