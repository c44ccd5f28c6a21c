//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoSalesService`, which lowers the shared `FilterTree` and
//! `SortSpec` into a store query so filtering, sorting, counting and page
//! slicing all run inside MongoDB.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! retail-sales = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One collection holds one document per sale, keyed by the store column
//! names (`"Customer Name"`, `"Phone Number"`, ...). Documents may store the
//! phone number as an integer or as a string, and dates as `YYYY-MM-DD`
//! strings optionally followed by a time part.
//!
//! # Query lowering
//!
//! | Clause            | Store condition                                             |
//! |-------------------|-------------------------------------------------------------|
//! | search            | `$or` of name regex, phone equality (int and string), phone-as-text regex |
//! | facet selection   | anchored case-insensitive regex over the escaped values     |
//! | age range         | `Age: { $gte, $lte }`                                       |
//! | date range        | date-shaped `Date` with `$gte` from and `$lt` the day after to |
//! | tags              | `$or` of case-insensitive substring regexes on `Tags`       |
//!
//! Every clause is AND-ed under a single `$and`.
//!
//! Results are fetched with an aggregation pipeline (`$match`, `$sort`,
//! `$skip`, `$limit`). Date ordering sorts on the parsed `Date` rather than
//! its text, with unparseable dates as `null` (oldest); name ordering uses an
//! English collation at secondary strength.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{Collation, CollationStrength};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::core::normalize::escape_regex;
use crate::core::{
    Clause, FilterRequest, FilterTree, OverflowPolicy, PaginationMeta, Paginator, ResultPage,
    SaleRecord, SalesError, SalesQueryService, SearchMatcher, SortKey, SortSpec, StorageError,
};

const BACKEND: &str = "mongodb";

/// Matches date strings whose first ten characters are a calendar date
const DATE_SHAPE: &str = r"^\d{4}-\d{2}-\d{2}(?:$|[Tt ])";

/// Transient field holding the parsed `Date` while sorting by date
const DATE_SORT_FIELD: &str = "__sortDate";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a BSON Document into a serde_json::Value, dropping the store's `_id`
fn document_to_json(mut doc: Document) -> serde_json::Value {
    doc.remove("_id");
    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a MongoDB document into a sale record
fn document_to_record(doc: Document) -> Result<SaleRecord, StorageError> {
    serde_json::from_value(document_to_json(doc)).map_err(|e| StorageError::DecodeError {
        message: format!("Failed to decode sale document: {}", e),
    })
}

fn query_error(context: &str, e: mongodb::error::Error) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, e),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Filter and sort lowering
// ---------------------------------------------------------------------------

/// Lower a filter tree into a MongoDB filter document
///
/// An unconstrained tree lowers to `{}`.
pub fn filter_document(tree: &FilterTree) -> Document {
    let conditions: Vec<Document> = tree.clauses().iter().map(clause_document).collect();
    if conditions.is_empty() {
        doc! {}
    } else {
        doc! { "$and": conditions }
    }
}

fn clause_document(clause: &Clause) -> Document {
    match clause {
        Clause::Search(matcher) => search_document(matcher),
        Clause::FacetIn { field, values } => {
            let alternatives: Vec<String> = values.iter().map(|v| escape_regex(v)).collect();
            let pattern = format!(r"^\s*(?:{})\s*$", alternatives.join("|"));
            doc! { field.column(): { "$regex": pattern, "$options": "i" } }
        }
        Clause::AgeRange { min, max } => {
            let mut range = Document::new();
            if let Some(min) = min {
                range.insert("$gte", *min);
            }
            if let Some(max) = max {
                range.insert("$lte", *max);
            }
            doc! { "Age": range }
        }
        Clause::DateRange { from, to } => {
            let mut range = doc! { "$regex": DATE_SHAPE };
            if let Some(from) = from {
                range.insert("$gte", format_date(*from));
            }
            // Compare against the next day so "YYYY-MM-DDThh:mm" on `to` still matches
            if let Some(next) = to.and_then(|to| to.succ_opt()) {
                range.insert("$lt", format_date(next));
            }
            doc! { "Date": range }
        }
        Clause::TagsContainAny(tags) => {
            let alternatives: Vec<Document> = tags
                .iter()
                .map(|tag| doc! { "Tags": { "$regex": escape_regex(tag), "$options": "i" } })
                .collect();
            doc! { "$or": alternatives }
        }
    }
}

/// Name regex, plus phone matching that covers integer and string storage
fn search_document(matcher: &SearchMatcher) -> Document {
    let pattern = escape_regex(matcher.query());
    let mut alternatives = vec![doc! {
        "Customer Name": { "$regex": pattern.as_str(), "$options": "i" }
    }];

    if matcher.is_numeric() {
        if let Some(number) = matcher.numeric_value() {
            alternatives.push(doc! { "Phone Number": number });
        }
        alternatives.push(doc! { "Phone Number": matcher.query() });
        alternatives.push(doc! {
            "$expr": {
                "$regexMatch": {
                    "input": { "$ifNull": [{ "$toString": "$Phone Number" }, ""] },
                    "regex": pattern.as_str(),
                }
            }
        });
    } else {
        alternatives.push(doc! {
            "Phone Number": { "$regex": pattern.as_str(), "$options": "i" }
        });
    }

    doc! { "$or": alternatives }
}

/// Lower a `SortSpec` into a MongoDB sort document
///
/// Date ordering reads the parsed date from [`DATE_SORT_FIELD`]. `_id`
/// breaks ties so equal keys come back in insertion order.
pub fn sort_document(sort: &SortSpec) -> Document {
    let field = match sort.key {
        SortKey::Date => DATE_SORT_FIELD,
        key => key.column(),
    };
    doc! {
        field: sort.direction.as_i32(),
        "_id": 1,
    }
}

/// `Date` parsed to a BSON date; `null` when missing, not a string or unparseable
fn date_sort_expression() -> Document {
    doc! {
        "$cond": {
            "if": { "$eq": [{ "$type": "$Date" }, "string"] },
            "then": {
                "$dateFromString": {
                    "dateString": { "$trim": { "input": "$Date" } },
                    "onError": Bson::Null,
                    "onNull": Bson::Null,
                }
            },
            "else": Bson::Null,
        }
    }
}

/// Aggregation pipeline selecting one ordered page
pub fn page_pipeline(filter: Document, sort: &SortSpec, skip: i64, limit: i64) -> Vec<Document> {
    let by_date = sort.key == SortKey::Date;

    let mut pipeline = vec![doc! { "$match": filter }];
    if by_date {
        pipeline.push(doc! { "$addFields": { DATE_SORT_FIELD: date_sort_expression() } });
    }
    pipeline.push(doc! { "$sort": sort_document(sort) });
    pipeline.push(doc! { "$skip": skip });
    pipeline.push(doc! { "$limit": limit });
    if by_date {
        pipeline.push(doc! { "$project": { DATE_SORT_FIELD: 0 } });
    }
    pipeline
}

/// `$skip` and `$limit` for a resolved page, or `None` when it starts past the last match
fn page_window(pagination: &PaginationMeta, total: u64) -> Option<(i64, i64)> {
    let offset = u64::try_from(pagination.offset()).ok()?;
    if offset >= total {
        return None;
    }
    let skip = i64::try_from(offset).ok()?;
    let limit = i64::try_from(pagination.page_size).unwrap_or(i64::MAX);
    Some((skip, limit))
}

/// Case-insensitive collation for name ordering
fn sort_collation(sort: &SortSpec) -> Option<Collation> {
    (sort.key == SortKey::Name).then(|| {
        Collation::builder()
            .locale("en")
            .strength(CollationStrength::Secondary)
            .build()
    })
}

// ---------------------------------------------------------------------------
// MongoSalesService
// ---------------------------------------------------------------------------

/// Sales query service backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use retail_sales::storage::MongoSalesService;
///
/// let service = MongoSalesService::connect("mongodb://localhost:27017", "retail", "sales").await?;
/// service.ensure_indexes().await?;
/// let page = service.execute(&FilterRequest::new().with_search("asha")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoSalesService {
    database: Database,
    collection_name: String,
}

impl MongoSalesService {
    /// Create a new `MongoSalesService` over `collection_name` in `database`.
    pub fn new(database: Database, collection_name: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection_name.into(),
        }
    }

    /// Build a client from `uri` and bind to `database.collection`.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection_name: &str,
    ) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(client.database(database), collection_name))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.collection_name)
    }

    /// Create the indexes backing the filterable and sortable columns.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "Customer Name": 1 }).build(),
            IndexModel::builder().keys(doc! { "Phone Number": 1 }).build(),
            IndexModel::builder().keys(doc! { "Date": -1 }).build(),
            IndexModel::builder().keys(doc! { "Customer Region": 1 }).build(),
            IndexModel::builder().keys(doc! { "Product Category": 1 }).build(),
            IndexModel::builder().keys(doc! { "Payment Method": 1 }).build(),
            IndexModel::builder().keys(doc! { "Gender": 1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| query_error("Failed to create indexes on sales collection", e))?;

        Ok(())
    }
}

#[async_trait]
impl SalesQueryService for MongoSalesService {
    async fn execute(&self, request: &FilterRequest) -> Result<ResultPage, SalesError> {
        let filter = filter_document(&FilterTree::from_request(request));
        tracing::debug!(backend = BACKEND, filter = %filter, "Running sales query");

        let collection = self.collection();
        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(|e| query_error("Failed to count sales", e))?;

        let paginator = Paginator::new(request.page, request.page_size, OverflowPolicy::Passthrough);
        let pagination = paginator.resolve(usize::try_from(total).unwrap_or(usize::MAX));

        let Some((skip, limit)) = page_window(&pagination, total) else {
            tracing::debug!(
                backend = BACKEND,
                page = pagination.current_page,
                total,
                "Requested page is past the last match"
            );
            return Ok(ResultPage {
                data: Vec::new(),
                pagination,
            });
        };

        let mut aggregate = collection.aggregate(page_pipeline(filter, &request.sort, skip, limit));
        if let Some(collation) = sort_collation(&request.sort) {
            aggregate = aggregate.collation(collation);
        }

        let docs: Vec<Document> = aggregate
            .await
            .map_err(|e| query_error("Failed to fetch sales", e))?
            .try_collect()
            .await
            .map_err(|e| query_error("Failed to collect sales", e))?;

        let data = docs
            .into_iter()
            .map(document_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultPage { data, pagination })
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        OverflowPolicy::Passthrough
    }
}
