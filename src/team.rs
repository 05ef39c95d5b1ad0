use crate::products::by_value_desc;
use crate::types::{SalesRow, SalesTeamPerformance};
use crate::util::ratio_or_zero;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct Acc<'a> {
    user_code: &'a str,
    omset: f64,
    qty: f64,
    invoices: HashSet<&'a str>,
    outlets: HashSet<&'a str>,
    invoice_lines: usize,
}

/// Per-representative performance, descending by net revenue.
///
/// The returned order doubles as the representative roster for the
/// product-focus grid.
pub fn sales_team_performance(rows: &[SalesRow]) -> Vec<SalesTeamPerformance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accs: Vec<Acc> = Vec::new();
    for r in rows {
        let i = *index.entry(r.user_code.as_str()).or_insert_with(|| {
            accs.push(Acc {
                user_code: r.user_code.as_str(),
                ..Acc::default()
            });
            accs.len() - 1
        });
        let e = &mut accs[i];
        e.omset += r.net_value();
        e.qty += r.net_qty();
        e.outlets.insert(r.retailer_code.as_str());
        if r.status.is_invoice() {
            e.invoices.insert(r.invoice_no.as_str());
            e.invoice_lines += 1;
        }
    }

    let mut out: Vec<SalesTeamPerformance> = accs
        .into_iter()
        .map(|acc| {
            let invoice = acc.invoices.len();
            SalesTeamPerformance {
                user_code: acc.user_code.to_string(),
                omset: acc.omset,
                invoice,
                qty: acc.qty,
                oa: acc.outlets.len(),
                avg_sku_inv: ratio_or_zero(acc.invoice_lines as f64, invoice as f64),
                total_sku: acc.invoice_lines,
            }
        })
        .collect();
    out.sort_by(|a, b| by_value_desc(a.omset, b.omset));
    out
}

/// Representative codes in ranking order.
pub fn roster(team: &[SalesTeamPerformance]) -> Vec<String> {
    team.iter().map(|t| t.user_code.clone()).collect()
}
