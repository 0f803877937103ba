//! Number formatting shared by the JSON and CSV writers

fn strip_trailing_zeros(mut text: String) -> String {
    if text.contains('.') {
        let kept = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(kept);
    }
    if text.is_empty() || text == "-0" {
        return "0".to_string();
    }
    text
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("nan".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

/// Fixed number of decimals, like `%.3f`
pub fn format_fixed(value: f64, decimals: usize) -> String {
    non_finite(value).unwrap_or_else(|| format!("{value:.decimals$}"))
}

/// `precision` significant digits, switching to scientific notation for
/// very small or very large magnitudes, like `%g`.
///
/// `format_general(27394.5, 3)` is `2.74e+04`, `format_general(0.5, 3)` is `0.5`.
pub fn format_general(value: f64, precision: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let significant = precision as i32;
    if exponent < -4 || exponent >= significant {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa.to_string()),
            exponent.unsigned_abs()
        )
    } else {
        #[allow(clippy::cast_sign_loss)]
        let decimals = (significant - 1 - exponent) as usize;
        strip_trailing_zeros(format!("{value:.decimals$}"))
    }
}

/// Up to ten decimals, never scientific, trailing zeros removed
pub fn format_plain(value: f64) -> String {
    non_finite(value).unwrap_or_else(|| strip_trailing_zeros(format!("{value:.10}")))
}

/// Rounded to `digits` significant digits, never scientific.
///
/// Fewer than two digits falls back to [`format_plain`].
pub fn format_significant(value: f64, digits: usize) -> String {
    if digits < 2 {
        return format_plain(value);
    }
    if let Some(text) = non_finite(value) {
        return text;
    }
    if value == 0.0 {
        return "0".to_string();
    }

    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let scale = digits as i32 - magnitude - 1;

    if scale >= 0 {
        #[allow(clippy::cast_sign_loss)]
        let decimals = scale as usize;
        strip_trailing_zeros(format!("{value:.decimals$}"))
    } else {
        let step = 10f64.powi(-scale);
        format!("{:.0}", (value / step).round() * step)
    }
}
