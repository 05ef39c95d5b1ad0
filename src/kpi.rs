use crate::types::{KpiSnapshot, SalesRow};
use crate::util::ratio_or_zero;
use std::collections::HashSet;

/// Summary scalars over the filtered set, in one pass.
pub fn compute_kpis(rows: &[SalesRow]) -> KpiSnapshot {
    let mut total_omset = 0.0;
    let mut total_quantity = 0.0;
    let mut invoices: HashSet<&str> = HashSet::new();
    let mut outlets: HashSet<&str> = HashSet::new();
    let mut total_line_sold = 0usize;

    for r in rows {
        total_omset += r.net_value();
        total_quantity += r.net_qty();
        outlets.insert(r.retailer_code.as_str());
        if r.status.is_invoice() {
            invoices.insert(r.invoice_no.as_str());
            total_line_sold += 1;
        }
    }

    let total_invoice = invoices.len();
    KpiSnapshot {
        total_omset,
        total_invoice,
        total_quantity,
        outlet_active: outlets.len(),
        avg_sku_per_invoice: ratio_or_zero(total_line_sold as f64, total_invoice as f64),
        total_line_sold,
    }
}
