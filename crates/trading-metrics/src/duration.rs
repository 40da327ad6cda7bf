//! Human-readable durations such as `1h30m0s`.

use chrono::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Format a duration with hour, minute and second components.
///
/// Leading zero units are omitted (`1m30s`, `45s`), seconds keep their
/// fraction without trailing zeros (`2.5s`), and durations under a second
/// use the largest fitting unit (`250ms`, `1.5µs`). Zero is `0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos: i128 = match duration.num_nanoseconds() {
        Some(n) => i128::from(n),
        None => i128::from(duration.num_milliseconds()) * 1_000_000,
    };
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let mut rest = nanos.unsigned_abs();

    if rest < NANOS_PER_SEC {
        let (scale, unit) = if rest < NANOS_PER_MICRO {
            (1, "ns")
        } else if rest < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "µs")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        out.push_str(&with_fraction(rest, scale));
        out.push_str(unit);
        return out;
    }

    let hours = rest / NANOS_PER_HOUR;
    rest %= NANOS_PER_HOUR;
    let minutes = rest / NANOS_PER_MIN;
    rest %= NANOS_PER_MIN;

    if hours > 0 {
        out.push_str(&format!("{}h{}m", hours, minutes));
    } else if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&with_fraction(rest, NANOS_PER_SEC));
    out.push('s');
    out
}

/// `value / scale` as a decimal string, trailing zeros dropped.
fn with_fraction(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.to_string().len() - 1;
    let digits = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
