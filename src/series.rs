use crate::dates::{day_label, day_timestamp, resolve_invoice_date, DayOrder};
use crate::types::{DailyPoint, SalesRow};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Net revenue per calendar day, ascending.
///
/// Rows whose invoice date cannot be resolved are left out of the series
/// only; they still count everywhere else.
pub fn daily_series(rows: &[SalesRow], order: DayOrder) -> Vec<DailyPoint> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut unresolved = 0usize;
    for r in rows {
        match resolve_invoice_date(&r.invoice_date, order) {
            Some(day) => *buckets.entry(day).or_insert(0.0) += r.net_value(),
            None => unresolved += 1,
        }
    }
    if unresolved > 0 {
        log::debug!("daily series: {} rows without a usable invoice date", unresolved);
    }
    buckets
        .into_iter()
        .map(|(date, omset)| DailyPoint {
            label: day_label(date),
            date,
            timestamp: day_timestamp(date),
            omset,
        })
        .collect()
}
