use crate::flights::FlightRecord;

/// Parse an XC points value.
///
/// Scores are parsed at single precision. Text that is not a number, or that
/// parses to NaN or infinity, counts as zero points instead of failing the run.
/// Negative zero is folded into zero so it ties with it.
pub fn parse_score(text: &str) -> f64 {
    match text.parse::<f32>() {
        Ok(v) if v.is_finite() => f64::from(v) + 0.0,
        _ => 0.0,
    }
}

/// Sort records by descending score. Equal scores keep their API order.
pub fn rank(records: &mut [FlightRecord]) {
    records.sort_by(|a, b| parse_score(&b.points).total_cmp(&parse_score(&a.points)));
}
