use std::time::Duration;

/// Parses a duration argument of the form `<value><unit>` where the unit is
/// one of `s`, `m`, `h`, `d` — e.g. `90s`, `2.5h`, `7d`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    if input.len() < 2 {
        return None;
    }
    let (value_part, unit) = input.split_at(input.len() - 1);
    let value: f64 = value_part.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let factor = match unit {
        "s" => 1.0,
        "m" => 60.0,
        "h" => 3600.0,
        "d" => 86_400.0,
        _ => return None,
    };
    Some(Duration::from_secs_f64(value * factor))
}

/// Human-readable rendering for command feedback.
pub fn pretty(duration: Duration) -> String {
    let total = duration.as_secs();
    if total >= 86_400 {
        format!("{:.1}d", total as f64 / 86_400.0)
    } else if total >= 3600 {
        format!("{:.1}h", total as f64 / 3600.0)
    } else if total >= 60 {
        format!("{:.1}m", total as f64 / 60.0)
    } else {
        format!("{total}s")
    }
}
