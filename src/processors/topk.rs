//! Top-k selection over classification score vectors.

/// The single highest-scoring class prediction from a score vector.
///
/// `index` is `-1` with zero confidence for an empty vector (a
/// misconfigured model); ties resolve to the first maximum encountered in a
/// left-to-right scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Top1 {
    /// Class index of the maximum score, or `-1` for an empty vector.
    pub index: i64,
    /// The maximum score, or `0.0` for an empty vector.
    pub confidence: f32,
}

/// Selects the top-1 class from a score vector.
pub fn top1(scores: &[f32]) -> Top1 {
    let mut best = Top1 {
        index: -1,
        confidence: 0.0,
    };
    for (i, &score) in scores.iter().enumerate() {
        if best.index < 0 || score > best.confidence {
            best = Top1 {
                index: i as i64,
                confidence: score,
            };
        }
    }
    best
}

/// Returns the `k` best `(index, score)` pairs, highest score first.
///
/// Ties keep ascending index order. `k` is clamped to the vector length.
pub fn topk(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);
    ranked
}
