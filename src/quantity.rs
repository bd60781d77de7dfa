/// Scale an ingredient quantity string by a serving multiplier.
///
/// Accepts a plain number ("1.5", "8") or a single fraction ("1/2"). Whole
/// results print without a decimal point, anything else with one decimal
/// place. Empty stays empty; anything unparseable comes back unchanged.
pub fn format_quantity(quantity: &str, multiplier: f64) -> String {
    if quantity.is_empty() {
        return String::new();
    }

    match parse_quantity(quantity) {
        Some(value) => format_amount(value * multiplier),
        None => quantity.to_string(),
    }
}

/// Numeric value of a quantity string, if it is a number or `a/b`.
pub fn parse_quantity(quantity: &str) -> Option<f64> {
    let value = match quantity.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => quantity.trim().parse().ok()?,
    };
    value.is_finite().then_some(value)
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value}")
    } else {
        format!("{value:.1}")
    }
}

/// Serving count after scaling.
pub fn scale_servings(servings: u32, multiplier: f64) -> String {
    format_amount(f64::from(servings) * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_scale_to_whole_or_one_decimal() {
        assert_eq!(format_quantity("1/2", 2.0), "1");
        assert_eq!(format_quantity("1/2", 3.0), "1.5");
        assert_eq!(format_quantity("1/2", 1.0), "0.5");
    }

    #[test]
    fn plain_numbers_scale() {
        assert_eq!(format_quantity("1.5", 2.0), "3");
        assert_eq!(format_quantity("8", 3.0), "24");
        assert_eq!(format_quantity("1.5", 3.0), "4.5");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(format_quantity("", 3.0), "");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(format_quantity("a pinch", 2.0), "a pinch");
        assert_eq!(format_quantity("1/0", 2.0), "1/0");
        assert_eq!(format_quantity("one/two", 2.0), "one/two");
        assert_eq!(format_quantity("1/2/3", 2.0), "1/2/3");
        assert_eq!(format_quantity("inf", 2.0), "inf");
    }

    #[test]
    fn servings_scale() {
        assert_eq!(scale_servings(4, 2.0), "8");
        assert_eq!(scale_servings(3, 1.5), "4.5");
    }
}
