use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::focus::FocusSlots;
use crate::report;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV with an explicit header, for tables whose columns are only known at
/// runtime.
pub fn write_csv_records<P: AsRef<Path>>(
    path: P,
    header: &[String],
    body: &[Vec<String>],
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(header)?;
    for r in body {
        wtr.write_record(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn preview_records(header: &[String], body: &[Vec<String>], max_rows: usize) {
    if body.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(header.iter().cloned());
    for r in body.iter().take(max_rows) {
        builder.push_record(r.iter().cloned());
    }
    let table_str = builder.build().with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Write every report file into `dir`, creating it if needed. Returns the
/// paths written, in order.
pub fn export_reports(d: &Dashboard, focus: &FocusSlots, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    let mut path = |name: &str| {
        let p = dir.join(name);
        written.push(p.clone());
        p
    };

    write_json(path("summary.json"), &d.kpi)?;
    write_csv(path("sales_team.csv"), &report::team_rows(&d.team))?;
    write_csv(path("top_products.csv"), &report::product_rows(&d.products))?;
    write_csv(path("outlet_pareto.csv"), &report::pareto_rows(&d.pareto))?;
    write_csv(path("daily_omset.csv"), &report::daily_rows(&d.daily))?;
    let (header, body) = report::focus_table(&d.focus_grid, focus);
    write_csv_records(path("product_focus.csv"), &header, &body)?;
    write_csv(
        path("top30_products.csv"),
        &report::contribution_rows(&d.top_products),
    )?;
    write_csv(
        path("top30_outlets.csv"),
        &report::contribution_rows(&d.top_outlets),
    )?;
    write_csv(
        path("transactions.csv"),
        &report::transaction_rows(&d.filtered),
    )?;

    log::info!("wrote {} report files to {}", written.len(), dir.display());
    Ok(written)
}
