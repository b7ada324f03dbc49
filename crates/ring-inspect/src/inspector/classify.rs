use super::Classification;

/// Classify the deviation extremes against the noise band `[-threshold, threshold]`.
///
/// Rules are evaluated top to bottom, first match wins:
///
/// | condition                                   | result |
/// |---------------------------------------------|--------|
/// | `max_pos <= t` and `max_neg >= -t`          | Good   |
/// | `max_neg < -t` and `max_pos <= t`           | Cut    |
/// | `max_pos > t` and `max_neg >= -t`           | Flash  |
/// | otherwise (`max_pos > t` and `max_neg < -t`) | Mixed  |
///
/// The four branches partition the `(max_pos, max_neg)` plane, so every
/// input lands in exactly one of them.
pub fn classify(max_pos: f64, max_neg: f64, threshold: f64) -> Classification {
    let excess = max_pos > threshold;
    let missing = max_neg < -threshold;
    match (missing, excess) {
        (false, false) => Classification::Good,
        (true, false) => Classification::Cut,
        (false, true) => Classification::Flash,
        (true, true) => Classification::Mixed,
    }
}
