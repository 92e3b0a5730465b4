use crate::model::Cell;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Coerce a resolved cell into a number.
///
/// Handles:
/// - numbers -> exact decimal
/// - "12.5" -> 12.5
/// - "  12.5 kg" -> 12.5 (longest leading numeric literal)
/// - "1e3" -> 1000
/// - "abc", "", null, booleans, missing -> 0
///
/// Never fails: unparseable input counts as zero.
pub fn parse_number(cell: Option<&Cell>) -> Decimal {
    match cell {
        Some(Cell::Number(n)) => number_to_decimal(&n.to_string()),
        Some(Cell::Text(s)) => parse_leading_decimal(s).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Parse the longest numeric literal at the start of `s`.
pub fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start {
            frac_digits = &s[frac_start..j];
            i = j;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = "";
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            exponent = &s[i + 1..j];
        }
    }

    let mut literal = String::with_capacity(i + 2);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }
    if !exponent.is_empty() {
        literal.push('e');
        literal.push_str(exponent.trim_start_matches('+'));
    }

    Some(number_to_decimal(&literal))
}

/// Convert a printed number to a decimal. Magnitudes beyond the decimal
/// range saturate to `Decimal::MAX`/`MIN`; values too small to represent
/// become zero.
fn number_to_decimal(s: &str) -> Decimal {
    let parsed = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s)
    } else {
        Decimal::from_str(s)
    };

    parsed.unwrap_or_else(|_| match s.parse::<f64>() {
        Ok(f) if f >= 1.0 => Decimal::MAX,
        Ok(f) if f <= -1.0 => Decimal::MIN,
        Ok(f) => Decimal::from_f64(f).unwrap_or_default(),
        Err(_) => Decimal::ZERO,
    })
}

/// Ordering key of a skid: its leading integer, or 0 when there is none.
///
/// "12A" -> 12, "1.9" -> 1, "A1" -> 0. Only used for sorting; grouping
/// always uses the skid text itself.
pub fn skid_ordinal(skid: &str) -> i64 {
    let s = skid.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer_text() {
        assert_eq!(parse_number(Some(&Cell::from("10"))), dec!(10));
    }

    #[test]
    fn test_decimal_text() {
        assert_eq!(parse_number(Some(&Cell::from("2.108"))), dec!(2.108));
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(parse_number(Some(&Cell::from(7))), dec!(7));
        assert_eq!(parse_number(Some(&Cell::from(1.03))), dec!(1.03));
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_number(Some(&Cell::from("  12.5 kg"))), dec!(12.5));
        assert_eq!(parse_number(Some(&Cell::from("3."))), dec!(3));
    }

    #[test]
    fn test_leading_dot_and_sign() {
        assert_eq!(parse_number(Some(&Cell::from(".5"))), dec!(0.5));
        assert_eq!(parse_number(Some(&Cell::from("-4"))), dec!(-4));
        assert_eq!(parse_number(Some(&Cell::from("+4"))), dec!(4));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_number(Some(&Cell::from("1e3"))), dec!(1000));
        assert_eq!(parse_number(Some(&Cell::from("2.5E-1"))), dec!(0.25));
        // Dangling exponent marker is not part of the literal
        assert_eq!(parse_number(Some(&Cell::from("7e"))), dec!(7));
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(
            parse_number(Some(&Cell::from("99999999999999999999999999999999"))),
            Decimal::MAX
        );
        assert_eq!(parse_number(Some(&Cell::from("-1e40 pcs"))), Decimal::MIN);
        assert_eq!(parse_number(Some(&Cell::from(1e300))), Decimal::MAX);
        assert_eq!(parse_number(Some(&Cell::from("1e-300"))), Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(parse_number(Some(&Cell::from("abc"))), Decimal::ZERO);
        assert_eq!(parse_number(Some(&Cell::from(""))), Decimal::ZERO);
        assert_eq!(parse_number(Some(&Cell::from("."))), Decimal::ZERO);
        assert_eq!(parse_number(Some(&Cell::Null)), Decimal::ZERO);
        assert_eq!(parse_number(Some(&Cell::Bool(true))), Decimal::ZERO);
        assert_eq!(parse_number(None), Decimal::ZERO);
    }

    #[test]
    fn test_skid_ordinal() {
        assert_eq!(skid_ordinal("12"), 12);
        assert_eq!(skid_ordinal("12A"), 12);
        assert_eq!(skid_ordinal(" 3"), 3);
        assert_eq!(skid_ordinal("1.9"), 1);
        assert_eq!(skid_ordinal("A1"), 0);
        assert_eq!(skid_ordinal(""), 0);
        assert_eq!(skid_ordinal("-2"), -2);
    }
}
