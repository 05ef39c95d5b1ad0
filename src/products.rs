use crate::types::{Contribution, ProductPerformance, SalesRow};
use crate::util::ratio_or_zero;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Size of the published product ranking.
pub const TOP_PRODUCTS: usize = 15;
/// Size of the contribution tables (products and outlets).
pub const TOP_CONTRIBUTIONS: usize = 30;

/// Descending by value; equal values keep first-seen order.
pub(crate) fn by_value_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Per-product net quantity and revenue, top `limit` by revenue.
pub fn product_performance(rows: &[SalesRow], limit: usize) -> Vec<ProductPerformance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<ProductPerformance> = Vec::new();
    for r in rows {
        let i = *index.entry(r.sku_code.as_str()).or_insert_with(|| {
            out.push(ProductPerformance {
                sku_code: r.sku_code.clone(),
                total_qty: 0.0,
                total_omset: 0.0,
            });
            out.len() - 1
        });
        out[i].total_qty += r.net_qty();
        out[i].total_omset += r.net_value();
    }
    out.sort_by(|a, b| by_value_desc(a.total_omset, b.total_omset));
    out.truncate(limit);
    out
}

/// Ranked revenue share per key. Blank keys are grouped as `Unknown`; the
/// share is taken against `total_omset`, or against 1 when that is zero.
pub fn contribution_ranking<F>(
    rows: &[SalesRow],
    key: F,
    total_omset: f64,
    limit: usize,
) -> Vec<Contribution>
where
    F: Fn(&SalesRow) -> &str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for r in rows {
        let k = match key(r) {
            "" => "Unknown",
            k => k,
        };
        let i = *index.entry(k).or_insert_with(|| {
            groups.push((k, 0.0));
            groups.len() - 1
        });
        groups[i].1 += r.net_value();
    }
    groups.sort_by(|a, b| by_value_desc(a.1, b.1));

    let denom = if total_omset == 0.0 { 1.0 } else { total_omset };
    groups
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (code, omset))| Contribution {
            rank: i + 1,
            code: code.to_string(),
            omset,
            contribution_pct: ratio_or_zero(omset, denom) * 100.0,
        })
        .collect()
}

pub fn top_product_contributions(rows: &[SalesRow], total_omset: f64) -> Vec<Contribution> {
    contribution_ranking(rows, |r| r.sku_code.as_str(), total_omset, TOP_CONTRIBUTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn row(sku: &str, status: &str, value: f64, qty: f64) -> SalesRow {
        SalesRow {
            sku_code: sku.into(),
            status: Status::parse(status),
            line_value: value,
            invoice_qty: qty,
            ..SalesRow::default()
        }
    }

    #[test]
    fn groups_and_ranks_by_net_revenue() {
        let rows = vec![
            row("A", "I", 100.0, 10.0),
            row("B", "I", 300.0, 1.0),
            row("A", "R", 40.0, 4.0),
            row("C", "I", 200.0, 2.0),
        ];
        let p = product_performance(&rows, TOP_PRODUCTS);
        let codes: Vec<&str> = p.iter().map(|x| x.sku_code.as_str()).collect();
        assert_eq!(codes, vec!["B", "C", "A"]);
        assert_eq!(p[2].total_omset, 60.0);
        assert_eq!(p[2].total_qty, 6.0);
    }

    #[test]
    fn truncates_to_limit() {
        let rows: Vec<SalesRow> = (0..20)
            .map(|i| row(&format!("SKU{:02}", i), "I", i as f64, 1.0))
            .collect();
        let p = product_performance(&rows, TOP_PRODUCTS);
        assert_eq!(p.len(), 15);
        assert_eq!(p[0].sku_code, "SKU19");
        assert_eq!(p[14].sku_code, "SKU05");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let rows = vec![
            row("Z", "I", 50.0, 1.0),
            row("M", "I", 50.0, 1.0),
            row("A", "I", 50.0, 1.0),
        ];
        let p = product_performance(&rows, TOP_PRODUCTS);
        let codes: Vec<&str> = p.iter().map(|x| x.sku_code.as_str()).collect();
        assert_eq!(codes, vec!["Z", "M", "A"]);
    }

    #[test]
    fn contributions_group_blank_codes_and_rank_from_one() {
        let rows = vec![
            row("A", "I", 150.0, 1.0),
            row("", "I", 50.0, 1.0),
            row("", "I", 50.0, 1.0),
        ];
        let c = top_product_contributions(&rows, 250.0);
        assert_eq!(c[0].rank, 1);
        assert_eq!(c[0].code, "A");
        assert_eq!(c[0].contribution_pct, 60.0);
        assert_eq!(c[1].code, "Unknown");
        assert_eq!(c[1].omset, 100.0);
        assert_eq!(c[1].contribution_pct, 40.0);
    }

    #[test]
    fn contributions_against_zero_total_use_unit_denominator() {
        let rows = vec![row("A", "I", 5.0, 1.0), row("B", "R", 5.0, 1.0)];
        let c = top_product_contributions(&rows, 0.0);
        assert_eq!(c[0].contribution_pct, 500.0);
        assert_eq!(c[1].contribution_pct, -500.0);
    }
}
