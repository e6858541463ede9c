// src/util.rs
use crate::defaults::Defaults;
use crate::error::AmountError;

const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

/// Convert a human amount ("2", "1.5", "1,000.25", ".5") to yoctoNEAR.
pub fn parse_near_amount(input: &str) -> Result<u128, AmountError> {
    let fail = |reason| AmountError { input: input.to_string(), reason };

    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));

    if frac.contains('.') {
        return Err(fail("more than one decimal point"));
    }
    if whole.is_empty() && frac.is_empty() {
        return Err(fail("empty amount"));
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(fail("only decimal digits are allowed"));
    }
    if frac.len() > Defaults::NEAR_NOMINATION_EXP {
        return Err(fail("more than 24 fractional digits"));
    }

    let padded = format!("{whole}{frac:0<width$}", width = Defaults::NEAR_NOMINATION_EXP);
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse::<u128>().map_err(|_| fail("amount too large"))
}

/// Render yoctoNEAR as a NEAR decimal without trailing zeros.
pub fn format_near_amount(yocto: u128) -> String {
    let whole = yocto / YOCTO_PER_NEAR;
    let frac = yocto % YOCTO_PER_NEAR;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0>width$}", width = Defaults::NEAR_NOMINATION_EXP);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(parse_near_amount("2").unwrap(), 2 * YOCTO_PER_NEAR);
        assert_eq!(parse_near_amount("1.5").unwrap(), 1_500_000_000_000_000_000_000_000);
        assert_eq!(parse_near_amount(".5").unwrap(), YOCTO_PER_NEAR / 2);
        assert_eq!(parse_near_amount("1,000").unwrap(), 1000 * YOCTO_PER_NEAR);
        assert_eq!(parse_near_amount(" 0.000000000000000000000001 ").unwrap(), 1);
        assert_eq!(parse_near_amount("0").unwrap(), 0);
        assert_eq!(parse_near_amount("0.0").unwrap(), 0);
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", ".", "1.2.3", "abc", "-1", "1e3", "0.0000000000000000000000001"] {
            assert!(parse_near_amount(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflow() {
        let err = parse_near_amount("1000000000000000").unwrap_err();
        assert_eq!(err.reason, "amount too large");
    }

    #[test]
    fn formats_back_to_near() {
        assert_eq!(format_near_amount(0), "0");
        assert_eq!(format_near_amount(2 * YOCTO_PER_NEAR), "2");
        assert_eq!(format_near_amount(1_500_000_000_000_000_000_000_000), "1.5");
        assert_eq!(format_near_amount(1), "0.000000000000000000000001");
    }
}
