//! Totals shown alongside a page of sales

use serde::Serialize;

use super::record::SaleRecord;

/// Units sold, gross amount and discount granted over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub total_units: i64,
    pub total_amount: f64,
    /// Sum of `total - final`; individual negative discounts are included as-is
    pub total_discount: f64,
}

impl PageSummary {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, record| Self {
            total_units: acc.total_units + record.quantity,
            total_amount: acc.total_amount + record.total_amount,
            total_discount: acc.total_discount + record.discount(),
        })
    }
}
