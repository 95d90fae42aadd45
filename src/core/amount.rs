//! Exact decimal-string to base-unit conversion.
//!
//! Amounts never pass through floating point: the decimal string is shifted by
//! `decimals` digits and parsed as an integer, which is `floor(amount * 10^decimals)`.

use ethers::types::U256;

use crate::core::errors::WalletError;
use crate::core::validation::validate_amount_strict;

/// Convert a human amount such as `"0.0001"` to base units (wei, lamports, token units).
///
/// Fractional digits beyond `decimals` are truncated. A result of zero is rejected.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, WalletError> {
    let amount = amount.trim();
    validate_amount_strict(amount)?;

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    let decimals = decimals as usize;
    let kept = &frac_part[..frac_part.len().min(decimals)];

    let mut digits = String::with_capacity(int_part.len() + decimals);
    digits.push_str(int_part);
    digits.push_str(kept);
    digits.extend(std::iter::repeat('0').take(decimals - kept.len()));

    let value = U256::from_dec_str(&digits).map_err(|_| {
        WalletError::InvalidAmount(format!("{} with {} decimals exceeds uint256", amount, decimals))
    })?;
    if value.is_zero() {
        return Err(WalletError::InvalidAmount(format!(
            "{} is below the smallest unit for {} decimals",
            amount, decimals
        )));
    }
    Ok(value)
}

/// Same as [`to_base_units`] but for chains whose amounts are `u64` (Solana).
pub fn to_base_units_u64(amount: &str, decimals: u8) -> Result<u64, WalletError> {
    let value = to_base_units(amount, decimals)?;
    if value > U256::from(u64::MAX) {
        return Err(WalletError::InvalidAmount(format!("{} does not fit in a u64", amount)));
    }
    Ok(value.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("0.0001", 9 => 100_000u64; "tenth of a milli sol")]
    #[test_case("1", 9 => 1_000_000_000u64; "one sol")]
    #[test_case("1.5", 6 => 1_500_000u64; "usdc style")]
    #[test_case("0.1234567", 6 => 123_456u64; "truncates extra digits")]
    #[test_case("42", 0 => 42u64; "zero decimals")]
    #[test_case("12.999", 0 => 12u64; "floor with zero decimals")]
    fn converts_exactly(amount: &str, decimals: u8) -> u64 {
        to_base_units_u64(amount, decimals).unwrap()
    }

    #[test]
    fn eighteen_decimals_do_not_lose_precision() {
        let v = to_base_units("1.000000000000000001", 18).unwrap();
        assert_eq!(v, U256::from_dec_str("1000000000000000001").unwrap());
        let v = to_base_units("123456789.123456789123456789", 18).unwrap();
        assert_eq!(v, U256::from_dec_str("123456789123456789123456789").unwrap());
    }

    #[test]
    fn rejects_malformed_and_dust() {
        assert!(matches!(to_base_units("abc", 18), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(to_base_units("-1", 18), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(to_base_units("1e18", 18), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(to_base_units("0.0000000001", 9), Err(WalletError::InvalidAmount(_))));
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        // Arabic-Indic and fullwidth digits are Unicode `Nd` but not decimal input
        for amount in ["0.\u{0661}\u{0662}", "\u{0661}", "1.\u{FF15}", "\u{0663}.5"] {
            assert!(matches!(to_base_units(amount, 1), Err(WalletError::InvalidAmount(_))), "{:?}", amount);
            assert!(matches!(to_base_units(amount, 18), Err(WalletError::InvalidAmount(_))), "{:?}", amount);
        }
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(to_base_units("1", 255).is_err());
        assert!(to_base_units_u64("18446744073709551616", 0).is_err());
        assert_eq!(to_base_units_u64("18446744073709551615", 0).unwrap(), u64::MAX);
    }

    proptest! {
        // integer part * 10^d + first d fractional digits, computed in u128
        #[test]
        fn prop_matches_reference(int_part in 1u64..1_000_000, frac in "[0-9]{0,12}", d in 0u8..=18) {
            let amount = if frac.is_empty() { int_part.to_string() } else { format!("{}.{}", int_part, frac) };
            let kept: String = frac.chars().take(d as usize).collect();
            let padded = format!("{:0<width$}", kept, width = d as usize);
            let frac_value: u128 = if padded.is_empty() { 0 } else { padded.parse().unwrap() };
            let expected = (int_part as u128) * 10u128.pow(d as u32) + frac_value;
            let got = to_base_units(&amount, d).unwrap();
            prop_assert_eq!(got, U256::from(expected));
        }
    }
}
