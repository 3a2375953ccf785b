//! Number formatting for axis ticks and tooltips.

/// Formats a tick value with thousands separators and as many decimals as the
/// tick `step` needs (none for whole-number steps).
pub fn format_tick(value: f64, step: Option<f64>) -> String {
    let decimals = step
        .filter(|step| step.is_finite() && *step > 0.0)
        .map(|step| (-step.log10().floor()).max(0.0) as usize)
        .unwrap_or(0);
    group_thousands(&format!("{:.*}", decimals, value))
}

/// Formats a raw count the way it came from the backend: integers without a
/// fractional part, everything else with the shortest exact representation.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
