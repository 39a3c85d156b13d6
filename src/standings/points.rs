//! Position-to-points lookup. Called for every outcome of every race, so it stays a
//! pure function with no allocation and no failure path.

/// Point value for finishing (or qualifying) in `position` against a points table.
///
/// Position 1 maps to the first table cell. Anything that cannot award points — a
/// non-finite or non-positive position, a fractional position, an index past the end
/// of the table, or a NaN table cell — scores zero rather than erroring.
pub fn points_for(position: f64, table: &[f64]) -> f64 {
    if !position.is_finite() || position <= 0.0 || position.fract() != 0.0 {
        return 0.0;
    }
    // Cast is safe: position is a positive finite integer-valued f64.
    let index = (position - 1.0) as usize;
    match table.get(index) {
        Some(value) if value.is_finite() => *value,
        _ => 0.0,
    }
}
