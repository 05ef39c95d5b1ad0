// Number helpers shared by the aggregators and the report printers.
//
// Aggregators only need `ratio_or_zero`; the rest is display formatting for
// the console tables and exported files.
use num_format::{Locale, ToFormattedString};

/// `num / den`, or `0` when `den` is zero so callers never see NaN.
pub fn ratio_or_zero(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus `en` thousands separators, e.g. `1,234,567.89`.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Whole rupiah with Indonesian grouping: `Rp 1.234.567`.
pub fn format_idr(n: f64) -> String {
    let rounded = n.round() as i64;
    let grouped = rounded.abs().to_formatted_string(&Locale::id);
    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Indonesian financial shorthand: K (ribu), M (juta), B (miliar).
///
/// One decimal is kept unless it is zero, so `1_500_000` is `1.5M` and
/// `2_000_000` is `2M`. Values under a thousand are printed as-is.
pub fn format_shorthand(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();
    let scaled = |div: f64, suffix: &str| {
        let s = format!("{:.1}", abs / div);
        let s = s.strip_suffix(".0").unwrap_or(&s).to_string();
        format!("{}{}{}", sign, s, suffix)
    };
    if abs >= 1_000_000_000.0 {
        scaled(1_000_000_000.0, "B")
    } else if abs >= 1_000_000.0 {
        scaled(1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        scaled(1_000.0, "K")
    } else {
        format!("{}{}", sign, abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(5.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(6.0, 4.0), 1.5);
    }

    #[test]
    fn number_formatting_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_int(9855usize), "9,855");
    }

    #[test]
    fn rupiah_uses_dot_grouping() {
        assert_eq!(format_idr(1234567.4), "Rp 1.234.567");
        assert_eq!(format_idr(-2500.0), "-Rp 2.500");
    }

    #[test]
    fn shorthand_scales_and_drops_zero_decimal() {
        assert_eq!(format_shorthand(1_500_000.0), "1.5M");
        assert_eq!(format_shorthand(2_000_000_000.0), "2B");
        assert_eq!(format_shorthand(-12_300.0), "-12.3K");
        assert_eq!(format_shorthand(999.0), "999");
        assert_eq!(format_shorthand(12.5), "12.5");
    }
}
