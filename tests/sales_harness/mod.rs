//! Shared test harness for sales query backends
//!
//! Provides a fixed set of sale documents in store shape (some phone numbers
//! stored as integers, some as strings), helpers to turn them into records,
//! and the `sales_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod sales_harness;
//! use sales_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod sales_service_tests;

use retail_sales::core::{ResultPage, SaleRecord};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Eight sales in store shape, in insertion order.
///
/// | id | date                 | name          | phone        | age | region  | qty | total |
/// |----|----------------------|---------------|--------------|-----|---------|-----|-------|
/// | 1  | 2024-01-10           | Asha Verma    | "0987654321" | 25  | North   | 2   | 500   |
/// | 2  | 2024-03-05           | Bala Krishnan | 9876543210   | 30  | South   | 1   | 1200  |
/// | 3  | 2024-02-20           | Chitra Nair   | 9123456780   | 30  | North   | 5   | 2500  |
/// | 4  | 2024-02-20           | Dev Sharma    | "9988776655" | 41  | East    | 3   | 4500  |
/// | 5  | 2023-12-31T18:30:00Z | Esha Patel    | "9000012345" | 19  | West    | 1   | 300   |
/// | 6  | 2024-03-05           | asha Kapoor   | 9870012345   | 35  | Central | 2   | 1500  |
/// | 7  | 2024-01-31           | Farhan Ali    | "9812345670" | 29  | South   | 4   | 6000  |
/// | 8  | 2023-06-15           | Gita Rao      | "9555512345" | 50  | North   | 1   | 100   |
pub fn fixture_documents() -> Vec<Value> {
    vec![
        sale(1, "2024-01-10", "Asha Verma", json!("0987654321"), "Female", 25, "North", "Beauty", "organic,skincare", 2, 500.0, 450.0, "UPI"),
        sale(2, "2024-03-05", "Bala Krishnan", json!(9876543210_i64), "Male", 30, "South", "Electronics", "wireless,gadgets", 1, 1200.0, 1200.0, "Cash"),
        sale(3, "2024-02-20", "Chitra Nair", json!(9123456780_i64), "Female", 30, "North", "Clothing", "fashion,casual", 5, 2500.0, 2250.0, "Credit Card"),
        sale(4, "2024-02-20", "Dev Sharma", json!("9988776655"), "Male", 41, "East", "Electronics", "smart,portable", 3, 4500.0, 4000.0, "Debit Card"),
        sale(5, "2023-12-31T18:30:00Z", "Esha Patel", json!("9000012345"), "Female", 19, "West", "Beauty", "skincare", 1, 300.0, 300.0, "UPI"),
        sale(6, "2024-03-05", "asha Kapoor", json!(9870012345_i64), "Female", 35, "Central", "Clothing", "casual", 2, 1500.0, 1350.0, "Cash"),
        sale(7, "2024-01-31", "Farhan Ali", json!("9812345670"), "Male", 29, "South", "Electronics", "Wireless", 4, 6000.0, 5400.0, "UPI"),
        sale(8, "2023-06-15", "Gita Rao", json!("9555512345"), "Female", 50, "North", "Beauty", "", 1, 100.0, 100.0, "Cash"),
    ]
}

/// Five sales exercising date and name ordering edge cases.
///
/// | id  | date                 | name      |
/// |-----|----------------------|-----------|
/// | 101 | 2024-01-10T18:00:00Z | Zara Khan |
/// | 102 | 2024-01-10T09:00:00Z | Émile Roy |
/// | 103 | 2024-01-10           | Anil Das  |
/// | 104 | not a date           | éva Nagy  |
/// | 105 | 2024-01-11           | Emile Roy |
pub fn ordering_documents() -> Vec<Value> {
    vec![
        sale(101, "2024-01-10T18:00:00Z", "Zara Khan", json!("9100000101"), "Female", 28, "North", "Beauty", "", 1, 100.0, 100.0, "UPI"),
        sale(102, "2024-01-10T09:00:00Z", "Émile Roy", json!(9100000102_i64), "Male", 33, "West", "Clothing", "", 2, 200.0, 200.0, "Cash"),
        sale(103, "2024-01-10", "Anil Das", json!("9100000103"), "Male", 47, "East", "Electronics", "", 3, 300.0, 300.0, "UPI"),
        sale(104, "not a date", "éva Nagy", json!("9100000104"), "Female", 22, "South", "Beauty", "", 4, 400.0, 400.0, "Credit Card"),
        sale(105, "2024-01-11", "Emile Roy", json!(9100000105_i64), "Male", 39, "Central", "Clothing", "", 5, 500.0, 500.0, "Debit Card"),
    ]
}

/// Two sales: Asha in the North, Bala in the South.
pub fn asha_and_bala_documents() -> Vec<Value> {
    vec![
        sale(1, "2024-01-10", "Asha", json!("9000000001"), "Female", 25, "North", "Beauty", "", 2, 500.0, 500.0, "UPI"),
        sale(2, "2024-03-05", "Bala", json!("9000000002"), "Male", 41, "South", "Electronics", "", 1, 1200.0, 1200.0, "Cash"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sale(
    id: i64,
    date: &str,
    name: &str,
    phone: Value,
    gender: &str,
    age: i64,
    region: &str,
    category: &str,
    tags: &str,
    quantity: i64,
    total: f64,
    final_amount: f64,
    payment: &str,
) -> Value {
    json!({
        "Transaction ID": id,
        "Date": date,
        "Customer ID": format!("CUST-{:03}", id),
        "Customer Name": name,
        "Phone Number": phone,
        "Gender": gender,
        "Age": age,
        "Customer Region": region,
        "Product Category": category,
        "Tags": tags,
        "Quantity": quantity,
        "Total Amount": total,
        "Final Amount": final_amount,
        "Payment Method": payment,
    })
}

/// Decode store documents into records
pub fn records_from(documents: Vec<Value>) -> Vec<SaleRecord> {
    documents
        .into_iter()
        .map(|doc| serde_json::from_value(doc).expect("fixture decodes"))
        .collect()
}

/// The fixtures as records
pub fn fixtures() -> Vec<SaleRecord> {
    records_from(fixture_documents())
}

// ---------------------------------------------------------------------------
// Assertions helpers
// ---------------------------------------------------------------------------

/// Transaction ids of a page, in order
pub fn ids(page: &ResultPage) -> Vec<i64> {
    page.data.iter().map(|r| r.transaction_id).collect()
}

/// Assert the page holds exactly `expected`, in order
pub fn assert_ids(page: &ResultPage, expected: &[i64]) {
    assert_eq!(
        ids(page),
        expected,
        "Expected ids {:?}, got {:?}",
        expected,
        ids(page)
    );
}
