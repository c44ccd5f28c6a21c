//! Query parameters and the typed filter request built from them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize::{parse_leading_int, split_tokens};
use super::pagination::PaginationMeta;
use super::record::{SaleRecord, parse_calendar_date};
use super::sort::SortSpec;
use super::summary::PageSummary;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Raw query parameters of the sales listing endpoint
///
/// Every parameter is optional and kept as text: malformed values are
/// absorbed when the [`FilterRequest`] is built, they never reject the
/// request.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_sales(
///     Query(params): Query<SalesQueryParams>,
/// ) -> Json<SalesResponse> { ... }
///
/// // Usage:
/// GET /api/sales?region=North,South&ageMin=25&sortBy=amount-desc&page=2
/// GET /api/sales?search=9876543210&tags=wireless
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalesQueryParams {
    /// Free text matched against customer name and phone number
    pub search: Option<String>,

    /// Comma-separated multi-select facets
    pub region: Option<String>,
    pub gender: Option<String>,
    pub category: Option<String>,
    pub payment: Option<String>,
    pub tags: Option<String>,

    pub age_min: Option<String>,
    pub age_max: Option<String>,

    /// ISO-8601 dates, inclusive
    pub date_from: Option<String>,
    pub date_to: Option<String>,

    /// `<key>-<direction>`, e.g. `amount-desc`
    pub sort_by: Option<String>,

    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl SalesQueryParams {
    /// Collect parameters from decoded `key=value` pairs
    ///
    /// A repeated multi-select key (`region=North&region=South`) is merged
    /// into one comma-separated value; for any other repeated key the last
    /// occurrence wins. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        fn merge(slot: &mut Option<String>, value: String) {
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }

        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "search" => params.search = Some(value),
                "region" => merge(&mut params.region, value),
                "gender" => merge(&mut params.gender, value),
                "category" => merge(&mut params.category, value),
                "payment" => merge(&mut params.payment, value),
                "tags" => merge(&mut params.tags, value),
                "ageMin" => params.age_min = Some(value),
                "ageMax" => params.age_max = Some(value),
                "dateFrom" => params.date_from = Some(value),
                "dateTo" => params.date_to = Some(value),
                "sortBy" => params.sort_by = Some(value),
                "page" => params.page = Some(value),
                "pageSize" => params.page_size = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Strongly-typed selection criteria for one request
///
/// Absent or empty fields impose no constraint on their dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub search: Option<String>,
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub tags: Vec<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            search: None,
            regions: Vec::new(),
            genders: Vec::new(),
            categories: Vec::new(),
            payment_methods: Vec::new(),
            tags: Vec::new(),
            age_min: None,
            age_max: None,
            date_from: None,
            date_to: None,
            sort: SortSpec::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterRequest {
    /// An unconstrained request for the first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from raw parameters
    ///
    /// - multi-select tokens are trimmed and empty tokens dropped
    /// - non-numeric age bounds and unparseable dates are treated as absent
    /// - `page` below 1 or missing becomes 1
    /// - `pageSize` missing, non-numeric or zero becomes `default_page_size`;
    ///   a negative size is raised to 1
    pub fn from_params(params: &SalesQueryParams, default_page_size: usize) -> Self {
        let tokens = |value: &Option<String>| value.as_deref().map(split_tokens).unwrap_or_default();
        let int = |value: &Option<String>| value.as_deref().and_then(parse_leading_int);
        let date = |value: &Option<String>| value.as_deref().and_then(parse_calendar_date);

        let page = int(&params.page).unwrap_or(1).max(1);
        let page_size = match int(&params.page_size) {
            None | Some(0) => default_page_size.max(1) as i64,
            Some(size) => size.max(1),
        };

        Self {
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            regions: tokens(&params.region),
            genders: tokens(&params.gender),
            categories: tokens(&params.category),
            payment_methods: tokens(&params.payment),
            tags: tokens(&params.tags),
            age_min: int(&params.age_min),
            age_max: int(&params.age_max),
            date_from: date(&params.date_from),
            date_to: date(&params.date_to),
            sort: SortSpec::parse(params.sort_by.as_deref()),
            page: usize::try_from(page).unwrap_or(usize::MAX),
            page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_genders<I, S>(mut self, genders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genders = genders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payment_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_age_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.age_min = min;
        self.age_max = max;
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_sort(mut self, sort_by: &str) -> Self {
        self.sort = SortSpec::parse(Some(sort_by));
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }
}

impl From<&SalesQueryParams> for FilterRequest {
    fn from(params: &SalesQueryParams) -> Self {
        Self::from_params(params, DEFAULT_PAGE_SIZE)
    }
}

/// One page of matching records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub data: Vec<SaleRecord>,
    pub pagination: PaginationMeta,
}

impl ResultPage {
    /// Totals over the records on this page
    pub fn summary(&self) -> PageSummary {
        PageSummary::from_records(&self.data)
    }
}

/// Response envelope of the sales listing endpoint
#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub success: bool,
    pub data: Vec<SaleRecord>,
    pub pagination: PaginationMeta,
    pub summary: PageSummary,
}

impl From<ResultPage> for SalesResponse {
    fn from(page: ResultPage) -> Self {
        let summary = page.summary();
        Self {
            success: true,
            data: page.data,
            pagination: page.pagination,
            summary,
        }
    }
}
