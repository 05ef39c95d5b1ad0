use crate::error::Result;
use crate::normalize::normalize_record;
use crate::types::{RawRecord, SalesRow};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

/// Decode a delimited sales export. Records the decoder cannot map at all
/// are counted and skipped; everything else is normalized, never rejected.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<SalesRow>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut rows: Vec<SalesRow> = Vec::new();

    for result in rdr.deserialize::<RawRecord>() {
        total_rows += 1;
        match result {
            Ok(raw) => rows.push(normalize_record(&raw)),
            Err(e) => {
                log::debug!("skipping record {}: {}", total_rows, e);
                parse_errors += 1;
            }
        }
    }

    let report = LoadReport {
        total_rows,
        loaded_rows: rows.len(),
        parse_errors,
    };
    log::info!(
        "loaded {} of {} rows ({} skipped)",
        report.loaded_rows,
        report.total_rows,
        report.parse_errors
    );
    Ok((rows, report))
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<(Vec<SalesRow>, LoadReport)> {
    let file = File::open(path.as_ref())?;
    log::info!("reading {}", path.as_ref().display());
    load_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InvoiceDate, Status};
    use std::io::Cursor;

    const HEADER: &str = "Distributor_Code,Retailer_Code,Branch_Code,User_Code,Invoice_No,Invoice_Date,SKU_Code,Invoice_Qty,SKU_Price,Line_Value,Status\n";

    #[test]
    fn reads_and_normalizes_rows() {
        let data = format!(
            "{}D1,007,JKT,S1,INV1,44927,P1,2,50,100,I\nD1,008,JKT,S1,INV1,15/01/2023,P1,x,,30,R\n",
            HEADER
        );
        let (rows, report) = load_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 0);

        assert_eq!(rows[0].retailer_code, "007");
        assert_eq!(rows[0].invoice_date, InvoiceDate::Serial(44927.0));
        assert_eq!(rows[0].line_value, 100.0);
        assert_eq!(rows[0].status, Status::Invoice);

        assert_eq!(rows[1].invoice_date, InvoiceDate::Text("15/01/2023".into()));
        assert_eq!(rows[1].invoice_qty, 0.0);
        assert_eq!(rows[1].sku_price, 0.0);
        assert_eq!(rows[1].net_value(), -30.0);
    }

    #[test]
    fn short_rows_fill_missing_columns_with_defaults() {
        let data = format!("{}D1,O1,JKT\n", HEADER);
        let (rows, _) = load_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].branch_code, "JKT");
        assert_eq!(rows[0].line_value, 0.0);
        assert_eq!(rows[0].invoice_date, InvoiceDate::Missing);
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() {
        let (rows, report) = load_from_reader(Cursor::new(HEADER.to_string())).unwrap();
        assert!(rows.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, crate::error::ReportError::Io(_)));
    }
}
