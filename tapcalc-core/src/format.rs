//! General-notation number formatting
//!
//! Produces the same text as C's `%.{p}g`: fixed notation for moderate
//! exponents, scientific notation otherwise, trailing zeros trimmed.
//! Output is locale-free.

use core::fmt::{self, Write};

use heapless::String;

/// Scratch size for one formatted number (sign, digits, exponent)
const SCRATCH_LEN: usize = 40;

/// Largest precision accepted; higher values are clamped
pub const MAX_PRECISION: usize = 17;

/// Write `value` with `precision` significant digits in general notation
pub fn write_general<W: Write>(out: &mut W, value: f64, precision: usize) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value < 0.0 { "-inf" } else { "inf" });
    }

    let precision = precision.clamp(1, MAX_PRECISION);

    // Scientific rendering gives the exponent after rounding
    let mut sci: String<SCRATCH_LEN> = String::new();
    write!(sci, "{:.*e}", precision - 1, value)?;
    let (mantissa, exponent) = sci.split_once('e').ok_or(fmt::Error)?;
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

    if exponent < -4 || exponent >= precision as i32 {
        out.write_str(trim_fraction(mantissa))?;
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(out, "e{}{:02}", sign, exponent.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        let mut fixed: String<SCRATCH_LEN> = String::new();
        write!(fixed, "{:.*}", decimals, value)?;
        out.write_str(trim_fraction(&fixed))
    }
}

/// Strip trailing zeros after a decimal point, then a bare point
fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

/// Format into a fixed-capacity string
///
/// Returns `Err` only if `N` is too small for the rendered number.
pub fn format_general<const N: usize>(value: f64, precision: usize) -> Result<String<N>, fmt::Error> {
    let mut out = String::new();
    write_general(&mut out, value, precision)?;
    Ok(out)
}
