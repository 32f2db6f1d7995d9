/// Resolves where the scroll should head next.
///
/// This is the only place the first/last section bound is enforced for new
/// targets. Non-finite contributions are treated as zero so a bad event can
/// never poison the state.
pub fn resolve_target(current_offset: f64, delta: f64, momentum: f64, max_offset: f64) -> f64 {
    let max = if max_offset.is_finite() { max_offset.max(0.0) } else { 0.0 };
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let raw = finite(current_offset) + finite(delta) + finite(momentum);
    raw.clamp(0.0, max)
}
