use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely typed cell as it comes out of a spreadsheet or CSV decoder.
///
/// Decoders that infer types (CSV field inference, JSON) hand us either a
/// number or a piece of text; anything else (booleans) is kept as text so
/// the normalizer can decide what to do with it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawValueVisitor;

        impl<'de> Visitor<'de> for RawValueVisitor {
            type Value = RawValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawValue, E> {
                Ok(RawValue::Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawValue, E> {
                Ok(RawValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawValue, E> {
                Ok(RawValue::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawValue, E> {
                Ok(RawValue::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
                Ok(RawValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
                Ok(RawValue::Text(v))
            }
        }

        deserializer.deserialize_any(RawValueVisitor)
    }
}

/// One decoded source record, before normalization.
///
/// Code columns are read as text so leading zeros survive; numeric columns
/// and the invoice date keep whatever type the decoder inferred.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Distributor_Code")]
    pub distributor_code: Option<String>,
    #[serde(rename = "Retailer_Code")]
    pub retailer_code: Option<String>,
    #[serde(rename = "Branch_Code")]
    pub branch_code: Option<String>,
    #[serde(rename = "User_Code")]
    pub user_code: Option<String>,
    #[serde(rename = "Invoice_No")]
    pub invoice_no: Option<String>,
    #[serde(rename = "Invoice_Date")]
    pub invoice_date: Option<RawValue>,
    #[serde(rename = "SKU_Code")]
    pub sku_code: Option<String>,
    #[serde(rename = "Batch_Code")]
    pub batch_code: Option<String>,
    #[serde(rename = "UOM")]
    pub uom: Option<String>,
    #[serde(rename = "Invoice_Qty")]
    pub invoice_qty: Option<RawValue>,
    #[serde(rename = "SKU_Price")]
    pub sku_price: Option<RawValue>,
    #[serde(rename = "Line_Value")]
    pub line_value: Option<RawValue>,
    #[serde(rename = "Sku_Weight")]
    pub sku_weight: Option<RawValue>,
    #[serde(rename = "Total_Amount")]
    pub total_amount: Option<RawValue>,
    #[serde(rename = "Net_Amount")]
    pub net_amount: Option<RawValue>,
    #[serde(rename = "Total_Discount")]
    pub total_discount: Option<RawValue>,
    #[serde(rename = "Total_Tax")]
    pub total_tax: Option<RawValue>,
    #[serde(rename = "Total_Return")]
    pub total_return: Option<RawValue>,
    #[serde(rename = "Total_Weight")]
    pub total_weight: Option<RawValue>,
    #[serde(rename = "Total_Lines")]
    pub total_lines: Option<RawValue>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Delivery_Status")]
    pub delivery_status: Option<String>,
}

/// Transaction status. Only the exact codes `I` and `R` are recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Invoice,
    Return,
    Other(String),
}

impl Status {
    pub fn parse(code: &str) -> Status {
        match code {
            "I" => Status::Invoice,
            "R" => Status::Return,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn is_invoice(&self) -> bool {
        matches!(self, Status::Invoice)
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Status::Return)
    }
}

/// The invoice date exactly as the source carried it.
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceDate {
    /// Spreadsheet serial day number (days since 1899-12-30).
    Serial(f64),
    Text(String),
    Missing,
}

impl fmt::Display for InvoiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceDate::Serial(v) => write!(f, "{}", v),
            InvoiceDate::Text(s) => f.write_str(s),
            InvoiceDate::Missing => Ok(()),
        }
    }
}

/// A normalized transaction row. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub distributor_code: String,
    pub retailer_code: String,
    pub branch_code: String,
    pub user_code: String,
    pub invoice_no: String,
    pub invoice_date: InvoiceDate,
    pub sku_code: String,
    pub batch_code: String,
    pub uom: String,
    pub invoice_qty: f64,
    pub sku_price: f64,
    pub line_value: f64,
    pub sku_weight: f64,
    pub total_amount: f64,
    pub net_amount: f64,
    pub total_discount: f64,
    pub total_tax: f64,
    pub total_return: f64,
    pub total_weight: f64,
    pub total_lines: f64,
    pub status: Status,
    pub delivery_status: String,
}

impl Default for SalesRow {
    fn default() -> Self {
        SalesRow {
            distributor_code: String::new(),
            retailer_code: String::new(),
            branch_code: String::new(),
            user_code: String::new(),
            invoice_no: String::new(),
            invoice_date: InvoiceDate::Missing,
            sku_code: String::new(),
            batch_code: String::new(),
            uom: String::new(),
            invoice_qty: 0.0,
            sku_price: 0.0,
            line_value: 0.0,
            sku_weight: 0.0,
            total_amount: 0.0,
            net_amount: 0.0,
            total_discount: 0.0,
            total_tax: 0.0,
            total_return: 0.0,
            total_weight: 0.0,
            total_lines: 0.0,
            status: Status::Other(String::new()),
            delivery_status: String::new(),
        }
    }
}

impl SalesRow {
    /// Signed revenue contribution: returns subtract, everything else adds.
    pub fn net_value(&self) -> f64 {
        if self.status.is_return() {
            -self.line_value
        } else {
            self.line_value
        }
    }

    /// Signed quantity, same sign law as [`SalesRow::net_value`].
    pub fn net_qty(&self) -> f64 {
        if self.status.is_return() {
            -self.invoice_qty
        } else {
            self.invoice_qty
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_omset: f64,
    pub total_invoice: usize,
    pub total_quantity: f64,
    pub outlet_active: usize,
    pub avg_sku_per_invoice: f64,
    pub total_line_sold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    /// `DD/MM` of the bucket day.
    pub label: String,
    pub date: NaiveDate,
    /// Milliseconds since the Unix epoch at midnight UTC of `date`. Bucket
    /// days are calendar days in UTC, independent of the host time zone.
    pub timestamp: i64,
    pub omset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub sku_code: String,
    pub total_qty: f64,
    pub total_omset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTeamPerformance {
    pub user_code: String,
    pub omset: f64,
    pub invoice: usize,
    pub qty: f64,
    pub oa: usize,
    pub avg_sku_inv: f64,
    pub total_sku: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletPareto {
    pub retailer_code: String,
    pub omset: f64,
    pub cumulative_omset: f64,
    pub cumulative_percentage: f64,
    pub is_top80: bool,
}

/// A ranked entry of a top-N contribution table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub rank: usize,
    pub code: String,
    pub omset: f64,
    pub contribution_pct: f64,
}
