use crate::products::{by_value_desc, contribution_ranking, TOP_CONTRIBUTIONS};
use crate::types::{Contribution, OutletPareto, SalesRow};
use std::collections::HashMap;

/// Cumulative share at or under which an outlet is in the top band.
pub const PARETO_CUTOFF_PCT: f64 = 80.0;

/// Outlets ranked by net revenue with running cumulative share.
///
/// The grand total is floored at zero; with a zero total every percentage
/// is zero (and so every outlet is flagged).
pub fn outlet_pareto(rows: &[SalesRow]) -> Vec<OutletPareto> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for r in rows {
        let i = *index.entry(r.retailer_code.as_str()).or_insert_with(|| {
            groups.push((r.retailer_code.as_str(), 0.0));
            groups.len() - 1
        });
        groups[i].1 += r.net_value();
    }
    groups.sort_by(|a, b| by_value_desc(a.1, b.1));

    let total = groups.iter().map(|g| g.1).sum::<f64>().max(0.0);
    let mut cumulative = 0.0;
    groups
        .into_iter()
        .map(|(code, omset)| {
            cumulative += omset;
            let pct = if total == 0.0 {
                0.0
            } else {
                cumulative / total * 100.0
            };
            OutletPareto {
                retailer_code: code.to_string(),
                omset,
                cumulative_omset: cumulative,
                cumulative_percentage: pct,
                is_top80: pct <= PARETO_CUTOFF_PCT,
            }
        })
        .collect()
}

pub fn top_outlet_contributions(rows: &[SalesRow], total_omset: f64) -> Vec<Contribution> {
    contribution_ranking(rows, |r| r.retailer_code.as_str(), total_omset, TOP_CONTRIBUTIONS)
}
