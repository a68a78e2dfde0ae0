//! Numeric conversions.
//!
//! Numbers are scalars holding their printable form. Parsing is lenient the
//! way C's `%i` and `%lf` scanning is: leading blanks are skipped, the longest
//! numeric prefix wins and anything unparsable is zero.

/// Parse the integer prefix of `bytes`.
///
/// Accepts an optional sign, then `0x`/`0X` hex, a leading-`0` octal, or
/// decimal digits. Overflow wraps.
pub fn parse_int(bytes: &[u8]) -> i64 {
    let mut rest = trim_start(bytes);

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', d, ..] if d.is_ascii_hexdigit() => (16, &rest[2..]),
        [b'0', ..] => (8, rest),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    for &b in digits {
        let Some(digit) = char::from(b).to_digit(radix) else {
            break;
        };
        value = value
            .wrapping_mul(i64::from(radix))
            .wrapping_add(i64::from(digit));
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Parse the floating-point prefix of `bytes`.
pub fn parse_real(bytes: &[u8]) -> f64 {
    let rest = trim_start(bytes);
    let len = real_prefix_len(rest);

    std::str::from_utf8(&rest[..len])
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Printable form of an integer.
pub fn format_int(value: i64) -> String {
    value.to_string()
}

/// Printable form of a real: fixed notation, six decimals.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    format!("{value:.6}")
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Length of the longest prefix shaped like a decimal float, or of a
/// leading `inf`/`infinity`/`nan` word.
fn real_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    for word in [&b"infinity"[..], b"inf", b"nan"] {
        let end = i + word.len();
        if bytes.len() >= end && bytes[i..end].eq_ignore_ascii_case(word) {
            return end;
        }
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
