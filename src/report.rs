// Display rows for the console previews and the exported CSV files.
//
// Values are pre-formatted strings, the same rows feed `tabled` and `csv`.
use crate::focus::{FocusRow, FocusSlots};
use crate::types::{
    Contribution, DailyPoint, KpiSnapshot, OutletPareto, ProductPerformance, SalesRow,
    SalesTeamPerformance, Status,
};
use crate::util::{format_idr, format_int, format_number, format_shorthand};
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TeamRow {
    #[serde(rename = "User Code")]
    #[tabled(rename = "User Code")]
    pub user_code: String,
    #[serde(rename = "Net Omset")]
    #[tabled(rename = "Net Omset")]
    pub omset: String,
    #[serde(rename = "Invoices (I)")]
    #[tabled(rename = "Invoices (I)")]
    pub invoice: usize,
    #[serde(rename = "Net Qty")]
    #[tabled(rename = "Net Qty")]
    pub qty: String,
    #[serde(rename = "OA")]
    #[tabled(rename = "OA")]
    pub oa: usize,
    #[serde(rename = "Total SKU")]
    #[tabled(rename = "Total SKU")]
    pub total_sku: usize,
    #[serde(rename = "Avg SKU/INV")]
    #[tabled(rename = "Avg SKU/INV")]
    pub avg_sku_inv: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ProductRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "SKU Code")]
    #[tabled(rename = "SKU Code")]
    pub sku_code: String,
    #[serde(rename = "Net Qty")]
    #[tabled(rename = "Net Qty")]
    pub qty: String,
    #[serde(rename = "Net Omset")]
    #[tabled(rename = "Net Omset")]
    pub omset: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ParetoRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Retailer Code")]
    #[tabled(rename = "Retailer Code")]
    pub retailer_code: String,
    #[serde(rename = "Net Omset")]
    #[tabled(rename = "Net Omset")]
    pub omset: String,
    #[serde(rename = "Cumulative Omset")]
    #[tabled(rename = "Cumulative Omset")]
    pub cumulative_omset: String,
    #[serde(rename = "Cumulative %")]
    #[tabled(rename = "Cumulative %")]
    pub cumulative_pct: String,
    #[serde(rename = "Top 80%")]
    #[tabled(rename = "Top 80%")]
    pub top80: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DailyRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub label: String,
    #[serde(rename = "Day")]
    #[tabled(rename = "Day")]
    pub date: String,
    #[serde(rename = "Net Omset")]
    #[tabled(rename = "Net Omset")]
    pub omset: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ContributionRow {
    #[serde(rename = "No")]
    #[tabled(rename = "No")]
    pub rank: usize,
    #[serde(rename = "Code")]
    #[tabled(rename = "Code")]
    pub code: String,
    #[serde(rename = "Net Omset")]
    #[tabled(rename = "Net Omset")]
    pub omset: String,
    #[serde(rename = "Contribution (%)")]
    #[tabled(rename = "Contribution (%)")]
    pub contribution: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TransactionRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "No Inv")]
    #[tabled(rename = "No Inv")]
    pub invoice_no: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales")]
    pub user_code: String,
    #[serde(rename = "Outlet")]
    #[tabled(rename = "Outlet")]
    pub retailer_code: String,
    #[serde(rename = "Product")]
    #[tabled(rename = "Product")]
    pub sku_code: String,
    #[serde(rename = "Price")]
    #[tabled(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Qty")]
    #[tabled(rename = "Qty")]
    pub qty: f64,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: f64,
}

pub fn kpi_rows(k: &KpiSnapshot) -> Vec<KpiRow> {
    let row = |metric: &str, value: String| KpiRow {
        metric: metric.to_string(),
        value,
    };
    vec![
        row("Total Net Omset", format_idr(k.total_omset)),
        row("Total Invoices", format_int(k.total_invoice)),
        row("Total Quantity", format_number(k.total_quantity, 2)),
        row("Outlet Active (OA)", format_int(k.outlet_active)),
        row("Total Line Sold", format_int(k.total_line_sold)),
        row("Avg SKU/Invoice", format_number(k.avg_sku_per_invoice, 2)),
    ]
}

pub fn team_rows(team: &[SalesTeamPerformance]) -> Vec<TeamRow> {
    team.iter()
        .map(|t| TeamRow {
            user_code: t.user_code.clone(),
            omset: format!("Rp {}", format_shorthand(t.omset)),
            invoice: t.invoice,
            qty: format_number(t.qty, 2),
            oa: t.oa,
            total_sku: t.total_sku,
            avg_sku_inv: format_number(t.avg_sku_inv, 2),
        })
        .collect()
}

pub fn product_rows(products: &[ProductPerformance]) -> Vec<ProductRow> {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| ProductRow {
            rank: i + 1,
            sku_code: p.sku_code.clone(),
            qty: format_number(p.total_qty, 2),
            omset: format_number(p.total_omset, 2),
        })
        .collect()
}

pub fn pareto_rows(pareto: &[OutletPareto]) -> Vec<ParetoRow> {
    pareto
        .iter()
        .enumerate()
        .map(|(i, o)| ParetoRow {
            rank: i + 1,
            retailer_code: o.retailer_code.clone(),
            omset: format_number(o.omset, 2),
            cumulative_omset: format_number(o.cumulative_omset, 2),
            cumulative_pct: format_number(o.cumulative_percentage, 2),
            top80: if o.is_top80 { "Yes" } else { "No" }.to_string(),
        })
        .collect()
}

pub fn daily_rows(daily: &[DailyPoint]) -> Vec<DailyRow> {
    daily
        .iter()
        .map(|p| DailyRow {
            label: p.label.clone(),
            date: p.date.format("%Y-%m-%d").to_string(),
            omset: format_number(p.omset, 2),
        })
        .collect()
}

pub fn contribution_rows(items: &[Contribution]) -> Vec<ContributionRow> {
    items
        .iter()
        .map(|c| ContributionRow {
            rank: c.rank,
            code: c.code.clone(),
            omset: format_number(c.omset, 2),
            contribution: format!("{:.2}%", c.contribution_pct),
        })
        .collect()
}

/// Transaction detail with signed quantity and value.
pub fn transaction_rows(rows: &[SalesRow]) -> Vec<TransactionRow> {
    rows.iter()
        .map(|r| TransactionRow {
            date: r.invoice_date.to_string(),
            invoice_no: r.invoice_no.clone(),
            status: match r.status {
                Status::Return => "Return",
                _ => "Invoice",
            }
            .to_string(),
            user_code: r.user_code.clone(),
            retailer_code: r.retailer_code.clone(),
            sku_code: r.sku_code.clone(),
            price: r.sku_price,
            qty: r.net_qty(),
            value: r.net_value(),
        })
        .collect()
}

/// Header and body of the focus grid. Unconfigured slots render as `-`,
/// configured ones as their count (including `0`).
pub fn focus_table(grid: &[FocusRow], slots: &FocusSlots) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = vec!["Kode Sales".to_string()];
    header.extend(
        slots
            .iter()
            .enumerate()
            .map(|(i, code)| format!("PF{} ({})", i + 1, code.unwrap_or("-"))),
    );
    let body = grid
        .iter()
        .map(|row| {
            let mut cells = vec![row.user_code.clone()];
            cells.extend(row.cells.iter().map(|c| match c {
                Some(n) => n.to_string(),
                None => "-".to_string(),
            }));
            cells
        })
        .collect();
    (header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceDate;

    #[test]
    fn focus_table_marks_unconfigured_slots() {
        let slots = FocusSlots::from_codes(&["P1", ""]).unwrap();
        let grid = vec![FocusRow {
            user_code: "S1".into(),
            cells: slots.iter().map(|s| s.map(|_| 0)).collect(),
        }];
        let (header, body) = focus_table(&grid, &slots);
        assert_eq!(header.len(), 9);
        assert_eq!(header[1], "PF1 (P1)");
        assert_eq!(header[2], "PF2 (-)");
        assert_eq!(body[0][0], "S1");
        assert_eq!(body[0][1], "0");
        assert_eq!(body[0][2], "-");
    }

    #[test]
    fn transaction_rows_carry_signed_values() {
        let rows = vec![SalesRow {
            invoice_date: InvoiceDate::Text("02/01/2023".into()),
            status: Status::Return,
            line_value: 25.0,
            invoice_qty: 2.0,
            sku_price: 12.5,
            ..SalesRow::default()
        }];
        let t = transaction_rows(&rows);
        assert_eq!(t[0].status, "Return");
        assert_eq!(t[0].date, "02/01/2023");
        assert_eq!(t[0].qty, -2.0);
        assert_eq!(t[0].value, -25.0);
        assert_eq!(t[0].price, 12.5);
    }

    #[test]
    fn kpi_rows_are_formatted() {
        let k = KpiSnapshot {
            total_omset: 1_234_567.0,
            total_invoice: 1200,
            total_quantity: 10.0,
            outlet_active: 3,
            avg_sku_per_invoice: 1.5,
            total_line_sold: 1800,
        };
        let rows = kpi_rows(&k);
        assert_eq!(rows[0].value, "Rp 1.234.567");
        assert_eq!(rows[1].value, "1,200");
        assert_eq!(rows[5].value, "1.50");
    }
}
