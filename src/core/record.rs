//! Sale transaction record as read from the backing store
//!
//! Records are read-only. Field names on the wire match the store's column
//! names (`"Customer Name"`, `"Phone Number"`, ...), so the same type
//! deserializes from a CSV snapshot, a MongoDB document, or a JSON fixture.
//!
//! Stores are not consistent about numeric encoding: CSV cells are text,
//! legacy documents keep phone numbers as integers, ages may arrive as
//! doubles. Deserialization is therefore lenient and coerces every field to
//! its canonical Rust type at this boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalize::parse_leading_int;

/// A customer phone number in canonical text form
///
/// Accepts a string, an integer or an integral float when deserializing and
/// always serializes back as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhoneNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for PhoneNumber {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(lenient::TextVisitor).map(Self)
    }
}

/// A single sale transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Transaction ID", default, deserialize_with = "lenient::int")]
    pub transaction_id: i64,

    /// ISO-8601 date, kept as stored
    #[serde(rename = "Date", default, deserialize_with = "lenient::text")]
    pub date: String,

    #[serde(rename = "Customer ID", default, deserialize_with = "lenient::text")]
    pub customer_id: String,

    #[serde(rename = "Customer Name", default, deserialize_with = "lenient::text")]
    pub customer_name: String,

    #[serde(rename = "Phone Number", default)]
    pub phone_number: PhoneNumber,

    #[serde(rename = "Gender", default, deserialize_with = "lenient::text")]
    pub gender: String,

    #[serde(rename = "Age", default, deserialize_with = "lenient::int")]
    pub age: i64,

    #[serde(rename = "Customer Region", default, deserialize_with = "lenient::text")]
    pub customer_region: String,

    #[serde(rename = "Product Category", default, deserialize_with = "lenient::text")]
    pub product_category: String,

    /// Comma-separated free-form tags
    #[serde(rename = "Tags", default, deserialize_with = "lenient::text")]
    pub tags: String,

    #[serde(rename = "Quantity", default, deserialize_with = "lenient::int")]
    pub quantity: i64,

    #[serde(rename = "Total Amount", default, deserialize_with = "lenient::float")]
    pub total_amount: f64,

    #[serde(rename = "Final Amount", default, deserialize_with = "lenient::float")]
    pub final_amount: f64,

    #[serde(rename = "Payment Method", default, deserialize_with = "lenient::text")]
    pub payment_method: String,

    // Pass-through descriptive fields
    #[serde(
        rename = "Customer Type",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_type: Option<String>,

    #[serde(
        rename = "Product ID",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<String>,

    #[serde(
        rename = "Product Name",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_name: Option<String>,

    #[serde(
        rename = "Brand",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,

    #[serde(
        rename = "Price per Unit",
        default,
        deserialize_with = "lenient::opt_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_unit: Option<f64>,

    #[serde(
        rename = "Discount Percentage",
        default,
        deserialize_with = "lenient::opt_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<f64>,

    #[serde(
        rename = "Order Status",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_status: Option<String>,

    #[serde(
        rename = "Delivery Type",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_type: Option<String>,

    #[serde(
        rename = "Store ID",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<String>,

    #[serde(
        rename = "Store Location",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_location: Option<String>,

    #[serde(
        rename = "Salesperson ID",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub salesperson_id: Option<String>,

    #[serde(
        rename = "Employee Name",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_name: Option<String>,
}

impl SaleRecord {
    /// Store column names, in display order
    pub const COLUMNS: &'static [&'static str] = &[
        "Transaction ID",
        "Date",
        "Customer ID",
        "Customer Name",
        "Phone Number",
        "Gender",
        "Age",
        "Customer Region",
        "Customer Type",
        "Product ID",
        "Product Name",
        "Brand",
        "Product Category",
        "Tags",
        "Quantity",
        "Price per Unit",
        "Discount Percentage",
        "Total Amount",
        "Final Amount",
        "Payment Method",
        "Order Status",
        "Delivery Type",
        "Store ID",
        "Store Location",
        "Salesperson ID",
        "Employee Name",
    ];

    /// The calendar date of the sale, or `None` if the stored date does not parse
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Milliseconds since the Unix epoch (UTC) of the sale, for chronological ordering
    ///
    /// A bare date counts as midnight; `None` if the stored date does not parse.
    pub fn timestamp_millis(&self) -> Option<i64> {
        parse_timestamp(&self.date).map(|t| t.and_utc().timestamp_millis())
    }

    /// Discount granted on this sale; negative when the final amount exceeds the total
    pub fn discount(&self) -> f64 {
        self.total_amount - self.final_amount
    }
}

/// Parse the calendar-date part of an ISO-8601 date or datetime string
///
/// Only the `YYYY-MM-DD` prefix is considered, so `2024-01-10T18:30:00Z`
/// and `2024-01-10` denote the same calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let prefix = value.get(..10)?;
    if value.len() > 10 && !matches!(value.as_bytes()[10], b'T' | b't' | b' ') {
        return None;
    }
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Parse an ISO-8601 date or datetime string into a UTC timestamp
///
/// Offsets are normalized to UTC, datetimes without an offset are taken as
/// UTC, and a bare `YYYY-MM-DD` is midnight of that day.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Lenient field deserializers used at the storage boundary
mod lenient {
    use super::*;

    pub(super) struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            if v.fract() == 0.0 && v.abs() < 1e18 {
                Ok((v as i64).to_string())
            } else {
                Ok(v.to_string())
            }
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<f64, D::Error> {
            d.deserialize_any(FloatVisitor)
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        d.deserialize_any(TextVisitor)
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = d.deserialize_any(TextVisitor)?;
        Ok((!value.is_empty()).then_some(value))
    }

    pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        d.deserialize_any(FloatVisitor)
    }

    pub fn opt_float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = d.deserialize_any(TextVisitor)?;
        Ok(raw.trim().parse().ok())
    }

    /// Integers also accept integral floats and leading-integer strings
    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let raw = d.deserialize_any(TextVisitor)?;
        Ok(parse_leading_int(&raw).unwrap_or(0))
    }
}
