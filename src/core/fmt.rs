//! Fixed-point number formatting for values shown on the page.
//!
//! Float `Display` has produced wasm-side panics on some toolchain/browser
//! combinations, so these helpers never `format!` a float. Finite values are
//! decomposed into mantissa and exponent, scaled and rounded in integer
//! arithmetic, and the integer parts are printed.

/// Formats `v` with exactly `decimals` fractional digits (clamped to 9).
///
/// Rounds the exact binary value of `v`, so `20.15` (stored just below) gives
/// `20.1`. Exact ties go away from zero. Non-finite input renders as `NaN`,
/// `Inf` or `-Inf`.
pub fn fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return non_finite(v);
    }

    let decimals = decimals.min(9) as u32;
    let Some(scaled) = scaled_abs(v, decimals) else {
        return non_finite(if v.is_sign_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    };
    let scale = 10_u128.pow(decimals);

    let mut out = String::new();
    if v.is_sign_negative() && scaled != 0 {
        out.push('-');
    }
    out.push_str(&(scaled / scale).to_string());

    if decimals > 0 {
        let frac = (scaled % scale).to_string();
        out.push('.');
        for _ in 0..(decimals as usize).saturating_sub(frac.len()) {
            out.push('0');
        }
        out.push_str(&frac);
    }
    out
}

/// CSS percentage, e.g. `34.6%`.
pub fn percent(v: f64, decimals: usize) -> String {
    let mut s = fixed(v, decimals);
    s.push('%');
    s
}

/// Rounds to `decimals` places with the same rule as [`fixed`].
pub fn round_to(v: f64, decimals: u32) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let decimals = decimals.min(9);
    match scaled_abs(v, decimals) {
        Some(n) => {
            let r = n as f64 / 10_f64.powi(decimals as i32);
            if v.is_sign_negative() {
                -r
            } else {
                r
            }
        }
        None => v,
    }
}

/// `|v| * 10^decimals` rounded to an integer from the exact binary value.
/// `None` when the result does not fit in an `i64`.
fn scaled_abs(v: f64, decimals: u32) -> Option<u128> {
    let bits = v.abs().to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1 << 52) - 1);
    let (mantissa, exp) = if biased == 0 {
        (frac, -1074)
    } else {
        (frac | (1 << 52), biased - 1075)
    };

    // mantissa < 2^53 and 10^9 < 2^30: no overflow.
    let num = u128::from(mantissa) * 10_u128.pow(decimals);
    let n = if exp >= 0 {
        if exp > 63 {
            return None;
        }
        num.checked_mul(1_u128 << exp)?
    } else {
        let shift = exp.unsigned_abs();
        if shift >= 127 {
            // num < 2^83, far below half a unit.
            0
        } else {
            let q = num >> shift;
            let rem = num - (q << shift);
            if rem >= 1_u128 << (shift - 1) {
                q + 1
            } else {
                q
            }
        }
    };
    (n <= i64::MAX as u128).then_some(n)
}

fn non_finite(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_sign_positive() {
        "Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pads_fraction_with_zeros() {
        assert_eq!(fixed(22.857, 1), "22.9");
        assert_eq!(fixed(3.05, 2), "3.05");
        assert_eq!(fixed(7.0, 3), "7.000");
        assert_eq!(fixed(12.4, 0), "12");
    }

    #[test]
    fn fixed_keeps_sign_for_negative_values() {
        assert_eq!(fixed(-1.25, 1), "-1.3");
        // Rounds to zero: no sign.
        assert_eq!(fixed(-0.01, 1), "0.0");
    }

    #[test]
    fn non_finite_values_render_as_words() {
        assert_eq!(fixed(f64::NAN, 1), "NaN");
        assert_eq!(fixed(f64::INFINITY, 1), "Inf");
        assert_eq!(fixed(f64::NEG_INFINITY, 1), "-Inf");
        assert_eq!(fixed(1e300, 5), "Inf");
    }

    #[test]
    fn percent_appends_sign() {
        assert_eq!(percent(34.615, 1), "34.6%");
        assert_eq!(percent(100.0, 0), "100%");
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round_to(22.857, 1), 22.9);
        assert_eq!(round_to(18.449, 1), 18.4);
        assert_eq!(round_to(22.45, 1), 22.4);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }

    #[test]
    fn fixed_rounds_the_stored_value() {
        // Both literals sit just below the written tie.
        assert_eq!(fixed(22.45, 1), "22.4");
        assert_eq!(fixed(80.6 / 4.0, 1), "20.1");
        assert_eq!(fixed(1.005, 2), "1.00");
        // Exact binary ties round away from zero.
        assert_eq!(fixed(0.25, 1), "0.3");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(0.125, 2), "0.13");
    }

    #[test]
    fn fixed_handles_tiny_and_subnormal_values() {
        assert_eq!(fixed(f64::MIN_POSITIVE, 3), "0.000");
        assert_eq!(fixed(5e-324, 1), "0.0");
        assert_eq!(fixed(0.0005, 3), "0.001");
    }
}
