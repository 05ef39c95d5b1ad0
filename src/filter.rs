use crate::types::SalesRow;
use std::collections::BTreeSet;

/// Sentinel accepted by [`BranchFilter::parse`] for "no branch restriction".
pub const ALL_BRANCHES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BranchFilter {
    #[default]
    All,
    Only(String),
}

impl BranchFilter {
    pub fn parse(s: &str) -> BranchFilter {
        if s == ALL_BRANCHES {
            BranchFilter::All
        } else {
            BranchFilter::Only(s.to_string())
        }
    }

    fn matches(&self, row: &SalesRow) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Only(b) => row.branch_code == *b,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search: String,
    pub branch: BranchFilter,
}

impl FilterParams {
    /// Case-insensitive substring search on invoice, rep and outlet codes,
    /// ANDed with exact branch equality.
    pub fn matches(&self, row: &SalesRow) -> bool {
        self.matches_search(row) && self.branch.matches(row)
    }

    fn matches_search(&self, row: &SalesRow) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&row.invoice_no, &row.user_code, &row.retailer_code]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// The working subset every aggregator consumes. Input rows are cloned,
/// never modified.
pub fn filter_rows(rows: &[SalesRow], params: &FilterParams) -> Vec<SalesRow> {
    rows.iter().filter(|r| params.matches(r)).cloned().collect()
}

/// Distinct non-empty branch codes over *all* rows, ascending.
pub fn branch_options(rows: &[SalesRow]) -> Vec<String> {
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.branch_code.as_str())
        .filter(|b| !b.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Distinct trimmed non-empty product codes over *all* rows, ascending.
pub fn sku_options(rows: &[SalesRow]) -> Vec<String> {
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.sku_code.trim())
        .filter(|s| !s.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}
