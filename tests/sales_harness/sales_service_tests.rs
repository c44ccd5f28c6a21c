//! Macro-generated test suite for `SalesQueryService` contract validation.
//!
//! The `sales_service_tests!` macro generates a test module that validates any
//! `SalesQueryService` implementation over the shared fixtures: filtering,
//! search, ordering, pagination and determinism.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod sales_harness;
//!
//! use sales_harness::*;
//!
//! async fn in_memory(documents: Vec<serde_json::Value>) -> InMemorySalesService {
//!     InMemorySalesService::from_records(records_from(documents))
//! }
//!
//! sales_service_tests!(in_memory);
//! ```
//!
//! # Generated Tests
//!
//! ## Filtering
//! - `test_unconstrained_request` — every record, newest first
//! - `test_facet_selection` — case-insensitive multi-select, OR within a facet
//! - `test_facets_are_anded` — two facets narrow each other
//! - `test_age_bounds_are_inclusive` — min, max and min == max
//! - `test_date_range` — inclusive bounds, datetime strings by calendar day
//! - `test_tags_match_any` — substring, case-insensitive, any-of
//! - `test_empty_result` — one empty page
//!
//! ## Search
//! - `test_search_by_name` — case-insensitive substring
//! - `test_search_phone_dual_encoding` — integer and string phones
//! - `test_search_partial_phone` — digits inside the number
//! - `test_search_is_literal` — regex metacharacters match literally
//! - `test_search_combined_with_tags`
//!
//! ## Ordering
//! - `test_sort_orders` — every key in both directions
//! - `test_equal_keys_keep_insertion_order`
//! - `test_unknown_sort_falls_back_to_date_desc`
//! - `test_date_sort_uses_time_of_day` — same-day datetimes, unparseable dates oldest
//! - `test_name_sort_is_collated` — accented names sort with their base letter
//!
//! ## Pagination
//! - `test_pages_cover_result_exactly_once`
//! - `test_pagination_metadata`
//! - `test_identical_requests_are_idempotent`
//!
//! ## Scenarios
//! - `test_region_scenario_returns_single_record`

/// Generate a full `SalesQueryService` conformance test suite.
///
/// `$factory` must name an async function taking the fixture documents
/// (`Vec<serde_json::Value>`) and returning a service loaded with exactly
/// those documents, in order. It is called once per test for isolation.
#[macro_export]
macro_rules! sales_service_tests {
    ($factory:path) => {
        mod sales_service_contract_tests {
            use super::*;
            use chrono::NaiveDate;
            use retail_sales::core::{FilterRequest, PaginationMeta, ResultPage, SalesQueryService};

            async fn run(request: FilterRequest) -> ResultPage {
                run_over(fixture_documents(), request).await
            }

            async fn run_over(documents: Vec<serde_json::Value>, request: FilterRequest) -> ResultPage {
                let service = $factory(documents).await;
                service.execute(&request).await.unwrap()
            }

            fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
                NaiveDate::from_ymd_opt(y, m, d)
            }

            // ==================================================================
            // Filtering
            // ==================================================================

            #[tokio::test]
            async fn test_unconstrained_request() {
                let page = run(FilterRequest::new().with_page(1, 50)).await;
                assert_ids(&page, &[2, 6, 3, 4, 7, 1, 5, 8]);
                assert_eq!(page.pagination.total_items, 8);
            }

            #[tokio::test]
            async fn test_facet_selection() {
                let page = run(FilterRequest::new().with_regions(["north"])).await;
                assert_ids(&page, &[3, 1, 8]);

                let page = run(FilterRequest::new().with_regions([" NORTH ", "South"])).await;
                assert_ids(&page, &[2, 3, 7, 1, 8]);

                let page = run(FilterRequest::new().with_payment_methods(["credit card"])).await;
                assert_ids(&page, &[3]);
            }

            #[tokio::test]
            async fn test_facets_are_anded() {
                let request = FilterRequest::new()
                    .with_genders(["Female"])
                    .with_categories(["Beauty"]);
                let page = run(request).await;
                assert_ids(&page, &[1, 5, 8]);

                let request = FilterRequest::new()
                    .with_genders(["Male"])
                    .with_categories(["Beauty"]);
                assert_eq!(run(request).await.pagination.total_items, 0);
            }

            #[tokio::test]
            async fn test_age_bounds_are_inclusive() {
                let page = run(FilterRequest::new().with_age_range(Some(30), None)).await;
                assert_ids(&page, &[2, 6, 3, 4, 8]);

                let page = run(FilterRequest::new().with_age_range(None, Some(30))).await;
                assert_ids(&page, &[2, 3, 7, 1, 5]);

                let page = run(FilterRequest::new().with_age_range(Some(30), Some(30))).await;
                assert_ids(&page, &[2, 3]);
            }

            #[tokio::test]
            async fn test_date_range() {
                let page = run(FilterRequest::new().with_date_range(date(2024, 1, 1), date(2024, 1, 31))).await;
                assert_ids(&page, &[7, 1]);

                // Datetime strings count as their calendar day
                let page = run(FilterRequest::new().with_date_range(date(2023, 12, 31), date(2023, 12, 31))).await;
                assert_ids(&page, &[5]);

                let page = run(FilterRequest::new().with_date_range(date(2024, 3, 1), None)).await;
                assert_ids(&page, &[2, 6]);
            }

            #[tokio::test]
            async fn test_tags_match_any() {
                let page = run(FilterRequest::new().with_tags(["wireless"])).await;
                assert_ids(&page, &[2, 7]);

                let page = run(FilterRequest::new().with_tags(["smart", "CASUAL"])).await;
                assert_ids(&page, &[6, 3, 4]);

                let page = run(FilterRequest::new().with_tags(["care"])).await;
                assert_ids(&page, &[1, 5]);
            }

            #[tokio::test]
            async fn test_empty_result() {
                let page = run(FilterRequest::new().with_regions(["Antarctica"])).await;
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.total_items, 0);
                assert_eq!(page.pagination.total_pages, 1);
                assert!(!page.pagination.has_next_page);
                assert!(!page.pagination.has_previous_page);
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_by_name() {
                let page = run(FilterRequest::new().with_search("ASHA")).await;
                assert_ids(&page, &[6, 1]);
            }

            #[tokio::test]
            async fn test_search_phone_dual_encoding() {
                // Stored as an integer
                let page = run(FilterRequest::new().with_search("9876543210")).await;
                assert_ids(&page, &[2]);
                assert_eq!(page.data[0].phone_number.as_str(), "9876543210");

                // Stored as a string with a leading zero
                let page = run(FilterRequest::new().with_search("0987654321")).await;
                assert_ids(&page, &[1]);
                assert_eq!(page.data[0].phone_number.as_str(), "0987654321");
            }

            #[tokio::test]
            async fn test_search_partial_phone() {
                let page = run(FilterRequest::new().with_search("98765")).await;
                assert_ids(&page, &[2, 1]);
            }

            #[tokio::test]
            async fn test_search_is_literal() {
                let page = run(FilterRequest::new().with_search("a.a")).await;
                assert!(page.data.is_empty());

                let page = run(FilterRequest::new().with_search("(")).await;
                assert!(page.data.is_empty());
            }

            #[tokio::test]
            async fn test_search_combined_with_tags() {
                let request = FilterRequest::new().with_search("asha").with_tags(["casual"]);
                assert_ids(&run(request).await, &[6]);
            }

            // ==================================================================
            // Ordering
            // ==================================================================

            #[tokio::test]
            async fn test_sort_orders() {
                let cases: [(&str, [i64; 8]); 6] = [
                    ("date-asc", [8, 5, 1, 7, 3, 4, 2, 6]),
                    ("quantity-desc", [3, 7, 4, 1, 6, 2, 5, 8]),
                    ("quantity-asc", [2, 5, 8, 1, 6, 4, 7, 3]),
                    ("name-asc", [6, 1, 2, 3, 4, 5, 7, 8]),
                    ("name-desc", [8, 7, 5, 4, 3, 2, 1, 6]),
                    ("amount-desc", [7, 4, 3, 6, 2, 1, 5, 8]),
                ];
                for (sort_by, expected) in cases {
                    let page = run(FilterRequest::new().with_sort(sort_by).with_page(1, 50)).await;
                    assert_eq!(ids(&page), expected, "sortBy={}", sort_by);
                }
            }

            #[tokio::test]
            async fn test_equal_keys_keep_insertion_order() {
                // 2 and 6 share a date, as do 3 and 4
                let page = run(FilterRequest::new().with_sort("date-desc").with_page(1, 4)).await;
                assert_ids(&page, &[2, 6, 3, 4]);
            }

            #[tokio::test]
            async fn test_unknown_sort_falls_back_to_date_desc() {
                let fallback = run(FilterRequest::new().with_sort("price-desc").with_page(1, 50)).await;
                let default = run(FilterRequest::new().with_page(1, 50)).await;
                assert_eq!(ids(&fallback), ids(&default));
            }

            #[tokio::test]
            async fn test_date_sort_uses_time_of_day() {
                let page = run_over(ordering_documents(), FilterRequest::new().with_sort("date-asc")).await;
                assert_ids(&page, &[104, 103, 102, 101, 105]);

                let page = run_over(ordering_documents(), FilterRequest::new().with_sort("date-desc")).await;
                assert_ids(&page, &[105, 101, 102, 103, 104]);
            }

            #[tokio::test]
            async fn test_name_sort_is_collated() {
                let page = run_over(ordering_documents(), FilterRequest::new().with_sort("name-asc")).await;
                assert_ids(&page, &[103, 105, 102, 104, 101]);

                let page = run_over(ordering_documents(), FilterRequest::new().with_sort("name-desc")).await;
                assert_ids(&page, &[101, 104, 102, 105, 103]);
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_pages_cover_result_exactly_once() {
                let full = run(FilterRequest::new().with_page(1, 50)).await;

                let mut collected = Vec::new();
                for page_number in 1..=3 {
                    let page = run(FilterRequest::new().with_page(page_number, 3)).await;
                    assert_eq!(page.pagination.total_pages, 3);
                    collected.extend(ids(&page));
                }
                assert_eq!(collected, ids(&full));
            }

            #[tokio::test]
            async fn test_pagination_metadata() {
                let page = run(FilterRequest::new().with_page(2, 3)).await;
                assert_eq!(page.pagination.current_page, 2);
                assert_eq!(page.pagination.page_size, 3);
                assert_eq!(page.pagination.total_items, 8);
                assert!(page.pagination.has_next_page);
                assert!(page.pagination.has_previous_page);
                assert_ids(&page, &[4, 7, 1]);

                let last = run(FilterRequest::new().with_page(3, 3)).await;
                assert!(!last.pagination.has_next_page);
                assert_eq!(last.data.len(), 2);
            }

            #[tokio::test]
            async fn test_identical_requests_are_idempotent() {
                let service = $factory(fixture_documents()).await;
                let request = FilterRequest::new()
                    .with_regions(["North", "South"])
                    .with_sort("name-asc")
                    .with_page(1, 2);

                let first = service.execute(&request).await.unwrap();
                let second = service.execute(&request).await.unwrap();
                assert_eq!(first, second);
            }

            // ==================================================================
            // Scenarios
            // ==================================================================

            #[tokio::test]
            async fn test_region_scenario_returns_single_record() {
                let request = FilterRequest::new()
                    .with_regions(["North"])
                    .with_sort("amount-desc")
                    .with_page(1, 10);
                let page = run_over(asha_and_bala_documents(), request).await;

                assert_ids(&page, &[1]);
                assert_eq!(page.data[0].customer_name, "Asha");
                assert_eq!(
                    page.pagination,
                    PaginationMeta {
                        current_page: 1,
                        total_pages: 1,
                        total_items: 1,
                        page_size: 10,
                        has_next_page: false,
                        has_previous_page: false,
                    }
                );
            }
        }
    };
}
