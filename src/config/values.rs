//! Literal coercion for directive arguments.
//!
//! The literal grammars follow the command-line flag syntax the directives
//! were first exposed as: the boolean spellings of a flag parser and
//! compound durations such as `23h23m` or `1.5s`.

use std::time::Duration;

/// Parse a boolean literal.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse an unsigned count.
pub fn parse_count(value: &str) -> Option<u32> {
    value.parse().ok()
}

/// Parse a duration made of `<decimal><unit>` terms.
///
/// Units: `ns`, `us`/`µs`/`μs`, `ms`, `s`, `m`, `h`. A bare `0` is accepted.
/// There is no day unit, and negative durations are rejected.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let mut rest = value.strip_prefix('+').unwrap_or(value);
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() || rest.starts_with('-') {
        return None;
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_len);
        let scale = unit_nanos(unit)?;

        if !whole.is_empty() {
            let whole: u128 = whole.parse().ok()?;
            total_nanos = total_nanos.checked_add(whole.checked_mul(scale)?)?;
        }
        if !fraction.is_empty() {
            // Digits past 18 are below nanosecond precision for every unit.
            let digits = &fraction[..fraction.len().min(18)];
            let numerator: u128 = digits.parse().ok()?;
            let denominator = 10u128.pow(digits.len() as u32);
            total_nanos = total_nanos.checked_add(numerator * scale / denominator)?;
        }
        rest = tail;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000).ok()?;
    let nanos = (total_nanos % 1_000_000_000) as u32;
    Some(Duration::new(secs, nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("42d"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_duration_simple_units() {
        assert_eq!(parse_duration("42h"), Some(Duration::from_secs(42 * 3600)));
        assert_eq!(parse_duration("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("3us"), Some(Duration::from_micros(3)));
        assert_eq!(parse_duration("3µs"), Some(Duration::from_micros(3)));
        assert_eq!(parse_duration("7ns"), Some(Duration::from_nanos(7)));
    }

    #[test]
    fn test_duration_compound_and_fractional() {
        assert_eq!(
            parse_duration("23h23m"),
            Some(Duration::from_secs(23 * 3600 + 23 * 60))
        );
        assert_eq!(parse_duration("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration(".5m"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("+1m"), Some(Duration::from_secs(60)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("0s"), Some(Duration::ZERO));
    }

    #[test]
    fn test_duration_rejects_invalid() {
        for v in ["42d", "", "h", "5", ".s", "-1h", "1h-", "1x", "true"] {
            assert_eq!(parse_duration(v), None, "{v}");
        }
    }

    #[test]
    fn test_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("many"), None);
    }
}
