// src/cell.rs
//! Best-guess typing of scraped cell text.
//!
//! Strip-then-parse, in this order:
//! 1. keep ASCII digits and `.`, parse as `f64` → [`CellValue::Number`]
//! 2. keep ASCII digits only, parse as `i64` → [`CellValue::Integer`]
//! 3. otherwise the raw text, untouched → [`CellValue::Text`]
//!
//! Anything with a digit in it becomes a number: `"$1,234.50"` → `1234.5`,
//! but also `"Room 12B"` → `12.0`. Step 2 only fires when step 1 sees more
//! than one `.` (`"1.2.3"` → `123`).

#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Integer(i64),
    Text(String),
}

pub fn normalize(raw: &str) -> CellValue {
    let decimal: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if let Ok(v) = decimal.parse::<f64>() {
        if v.is_finite() {
            return CellValue::Number(v);
        }
    }

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if let Ok(v) = digits.parse::<i64>() {
        return CellValue::Integer(v);
    }

    CellValue::Text(raw.to_string())
}

pub fn normalize_row(row: &[String]) -> Vec<CellValue> {
    row.iter().map(|c| normalize(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use CellValue::*;

    #[test]
    fn float_is_tried_first() {
        assert_eq!(normalize("12kg"), Number(12.0));
        assert_eq!(normalize("3.5cm"), Number(3.5));
        assert_eq!(normalize("$208,000"), Number(208_000.0));
        assert_eq!(normalize("0.15"), Number(0.15));
        assert_eq!(normalize(".5"), Number(0.5));
        assert_eq!(normalize("7."), Number(7.0));
    }

    #[test]
    fn integer_when_dots_break_the_float() {
        assert_eq!(normalize("1.2.3"), Integer(123));
        assert_eq!(normalize("v10.0.1"), Integer(1001));
    }

    #[test]
    fn text_when_no_digits() {
        assert_eq!(normalize("Management Occupations"), Text("Management Occupations".into()));
        assert_eq!(normalize("*"), Text("*".into()));
        assert_eq!(normalize("."), Text(".".into()));
        assert_eq!(normalize(""), Text("".into()));
        assert_eq!(normalize("  "), Text("  ".into()));
    }

    #[test]
    fn stray_digits_still_become_numbers() {
        assert_eq!(normalize("Room 12B"), Number(12.0));
        assert_eq!(normalize("11-0000"), Number(110_000.0));
        assert_eq!(normalize("(8)"), Number(8.0));
    }

    #[test]
    fn digit_runs_too_long_for_i64_stay_text() {
        let long = format!("{}.{}.", "9".repeat(30), "9");
        assert_eq!(normalize(&long), Text(long.clone()));
    }

    #[test]
    fn non_ascii_digits_are_not_digits() {
        assert_eq!(normalize("٣"), Text("٣".into()));
    }

    #[test]
    fn row_keeps_order() {
        let row = vec!["12kg".to_string(), "3.5cm".to_string(), "n/a".to_string()];
        assert_eq!(normalize_row(&row), vec![Number(12.0), Number(3.5), Text("n/a".into())]);
    }

    proptest! {
        #[test]
        fn digitless_text_is_untouched(s in "[^0-9]*") {
            prop_assert_eq!(normalize(&s), Text(s.clone()));
        }

        #[test]
        fn plain_integers_parse_exactly(n in 0u64..1_000_000_000_000) {
            prop_assert_eq!(normalize(&n.to_string()), Number(n as f64));
        }

        #[test]
        fn plain_decimals_parse_exactly(int in 0u32..1_000_000, frac in "[0-9]{1,6}") {
            let s = format!("{int}.{frac}");
            let expected: f64 = s.parse().unwrap();
            prop_assert_eq!(normalize(&s), Number(expected));
        }
    }
}
