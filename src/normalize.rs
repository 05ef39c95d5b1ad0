// Row normalization: raw decoded records -> `SalesRow`.
//
// Every field has its own conversion so the zero-default policy can be read
// (and tested) field by field. Nothing here fails: dirty cells become `0`
// or empty text.
use crate::types::{InvoiceDate, RawRecord, RawValue, SalesRow, Status};

/// Parse a loosely typed cell as a number.
///
/// - Missing cells, blank text and unparsable text give `0`.
/// - NaN and infinities (numeric or spelled out) give `0`.
/// - Surrounding whitespace is ignored.
pub fn coerce_number(v: Option<&RawValue>) -> f64 {
    let n = match v {
        None => return 0.0,
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return 0.0,
        },
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Keep the invoice date's shape: numbers (including purely numeric text)
/// are spreadsheet serials, other non-blank text is kept for later parsing.
pub fn coerce_invoice_date(v: Option<&RawValue>) -> InvoiceDate {
    match v {
        Some(RawValue::Number(n)) if n.is_finite() => InvoiceDate::Serial(*n),
        Some(RawValue::Text(s)) => {
            let t = s.trim();
            if t.is_empty() {
                return InvoiceDate::Missing;
            }
            match t.parse::<f64>() {
                Ok(n) if n.is_finite() => InvoiceDate::Serial(n),
                _ => InvoiceDate::Text(t.to_string()),
            }
        }
        _ => InvoiceDate::Missing,
    }
}

fn text(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

pub fn normalize_record(raw: &RawRecord) -> SalesRow {
    SalesRow {
        distributor_code: text(&raw.distributor_code),
        retailer_code: text(&raw.retailer_code),
        branch_code: text(&raw.branch_code),
        user_code: text(&raw.user_code),
        invoice_no: text(&raw.invoice_no),
        invoice_date: coerce_invoice_date(raw.invoice_date.as_ref()),
        sku_code: text(&raw.sku_code),
        batch_code: text(&raw.batch_code),
        uom: text(&raw.uom),
        invoice_qty: coerce_number(raw.invoice_qty.as_ref()),
        sku_price: coerce_number(raw.sku_price.as_ref()),
        line_value: coerce_number(raw.line_value.as_ref()),
        sku_weight: coerce_number(raw.sku_weight.as_ref()),
        total_amount: coerce_number(raw.total_amount.as_ref()),
        net_amount: coerce_number(raw.net_amount.as_ref()),
        total_discount: coerce_number(raw.total_discount.as_ref()),
        total_tax: coerce_number(raw.total_tax.as_ref()),
        total_return: coerce_number(raw.total_return.as_ref()),
        total_weight: coerce_number(raw.total_weight.as_ref()),
        total_lines: coerce_number(raw.total_lines.as_ref()),
        status: Status::parse(raw.status.as_deref().unwrap_or_default()),
        delivery_status: text(&raw.delivery_status),
    }
}

pub fn normalize_all(raw: &[RawRecord]) -> Vec<SalesRow> {
    raw.iter().map(normalize_record).collect()
}
