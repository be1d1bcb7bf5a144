//! Number formatting for chart labels.

/// Format like an en-US locale number: thousands grouped with `,`, at most three fraction digits,
/// trailing fraction zeros dropped.
pub fn locale_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let rounded = (v * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format a fraction as a whole-number percentage (`0.925` → `"93%"`).
///
/// Rounds the product `fraction * 100` as computed in binary, so `0.145` reads `"14%"` because the
/// product lands just under `14.5`.
pub fn percent_whole(fraction: f64) -> String {
    if !fraction.is_finite() {
        return format!("{}%", locale_number(fraction));
    }
    let pct = (fraction * 100.0).round();
    if pct == 0.0 {
        return "0%".to_owned();
    }
    format!("{pct:.0}%")
}

/// Shortest plain rendering: integral values without a fraction, `NaN` for missing numbers.
pub fn plain_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
