//! Rupiah display formatting.

use rust_decimal::Decimal;

/// Format like `Rp 2.452.382` or `Rp 50,5`; negatives get a leading `-`.
pub fn format_rupiah(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    let abs = amount.abs().round_dp(2).normalize();

    let text = abs.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}Rp {grouped},{f}"),
        None => format!("{sign}Rp {grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(dec!(0)), "Rp 0");
        assert_eq!(format_rupiah(dec!(999)), "Rp 999");
        assert_eq!(format_rupiah(dec!(10000)), "Rp 10.000");
        assert_eq!(format_rupiah(dec!(2452382)), "Rp 2.452.382");
        assert_eq!(format_rupiah(dec!(50.5)), "Rp 50,5");
        assert_eq!(format_rupiah(dec!(1500.00)), "Rp 1.500");
        assert_eq!(format_rupiah(dec!(-5000)), "-Rp 5.000");
    }
}
