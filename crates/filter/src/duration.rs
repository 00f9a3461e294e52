//! Duration literals such as `1h30m`, `250ms` or `-1.5s`.
//!
//! A literal is an optional sign followed by one or more `<number><unit>`
//! segments. Numbers may have a fraction. Units are `ns`, `us` (also `µs`
//! and `μs`), `ms`, `s`, `m` and `h`. A bare `0` needs no unit.

use time::Duration;

const UNITS: [(&str, u128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Fraction digits past this point cannot change the nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let overflow = || format!("duration '{}' is out of range", input);
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after) = rest.split_at(int_len);
        let (frac_digits, after) = match after.strip_prefix('.') {
            Some(after) => {
                let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(format!("expected a number at '{}'", rest));
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration '{}'", input));
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| format!("unknown unit '{}' in duration '{}'", unit, input))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;
        if !frac_digits.is_empty() {
            let kept = &frac_digits[..frac_digits.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = kept.parse().map_err(|_| overflow())?;
            nanos += numerator * scale / 10u128.pow(kept.len() as u32);
        }
        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = after;
    }

    let signed = i128::try_from(total).map_err(|_| overflow())?;
    let signed = if negative { -signed } else { signed };
    let nanos = i64::try_from(signed).map_err(|_| overflow())?;
    Ok(Duration::nanoseconds(nanos))
}
