use sales_report::focus::FocusSlots;
use sales_report::loader::load_from_reader;
use sales_report::output::export_reports;
use sales_report::{Dashboard, DashboardConfig};
use std::fs;
use std::io::Cursor;

const SAMPLE: &str = "\
Retailer_Code,Branch_Code,User_Code,Invoice_No,Invoice_Date,SKU_Code,Invoice_Qty,SKU_Price,Line_Value,Status
R1,JKT,S01,A1,44927,P1,2,50,100,I
R2,JKT,S02,A2,44928,P2,1,30,30,I
R2,JKT,S02,A2,44928,P2,1,30,10,R
";

#[test]
fn writes_every_report_file() {
    let (rows, _) = load_from_reader(Cursor::new(SAMPLE)).unwrap();
    let config = DashboardConfig {
        focus: FocusSlots::from_codes(&["P1", "", "P2"]).unwrap(),
        ..DashboardConfig::default()
    };
    let d = Dashboard::compute(&rows, &config);

    let dir = std::env::temp_dir().join(format!("sales_report_export_{}", std::process::id()));
    let files = export_reports(&d, &config.focus, &dir).unwrap();
    assert_eq!(files.len(), 9);
    assert!(files.iter().all(|f| f.exists()));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["totalOmset"], 120.0);
    assert_eq!(summary["totalInvoice"], 2);

    let focus_csv = fs::read_to_string(dir.join("product_focus.csv")).unwrap();
    let mut lines = focus_csv.lines();
    assert!(lines.next().unwrap().starts_with("Kode Sales,PF1 (P1),PF2 (-),PF3 (P2)"));
    // roster order: S01 (100) before S02 (20)
    assert!(lines.next().unwrap().starts_with("S01,1,-,0"));
    assert!(lines.next().unwrap().starts_with("S02,0,-,1"));

    let tx = fs::read_to_string(dir.join("transactions.csv")).unwrap();
    assert_eq!(tx.lines().count(), 4);
    assert!(tx.lines().last().unwrap().contains("Return"));

    fs::remove_dir_all(&dir).ok();
}
