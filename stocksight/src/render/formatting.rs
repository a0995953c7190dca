//! Shared label formatting for axes and reference lines.

/// Format a linear tick value.
///
/// Axis values are already rescaled below 1000, so no suffix is used and
/// float noise from stepping (`0.30000000000000004`) is rounded away.
pub fn format_tick(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        trim_decimals(format!("{:.4}", rounded))
    }
}

/// Label for a power of ten on a log axis: `"0.01"`, `"1"`, `"1000"`, `"1e+06"`.
pub fn format_power_of_ten(exponent: i32) -> String {
    match exponent {
        e if e < 0 => format!("{:.*}", (-e) as usize, 10f64.powi(e)),
        e if e <= 5 => format!("{:.0}", 10f64.powi(e)),
        e => format!("1e+{:02}", e),
    }
}

fn trim_decimals(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
