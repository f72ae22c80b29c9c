use std::cmp::Ordering;

use crate::labels::LabelVocabulary;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub best: Prediction,
    pub ranked: Vec<Prediction>,
}

/// Orders raw scores into the top-k predictions.
///
/// `k` is clamped to the number of scorable classes. Ties are broken by the
/// lowest class index at every rank position, so the result is fully
/// deterministic. Confidences are the raw scores, never re-normalized.
/// Returns `None` only for an empty score vector.
pub fn rank(
    probabilities: &[f32],
    labels: &LabelVocabulary,
    k: usize,
) -> Option<ClassificationResult> {
    let class_count = probabilities.len().min(labels.len());
    if class_count == 0 {
        return None;
    }
    let k = k.clamp(1, class_count);

    let mut order: Vec<usize> = (0..class_count).collect();
    order.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });

    let ranked: Vec<Prediction> = order[..k]
        .iter()
        .map(|&index| Prediction {
            class_index: index,
            label: labels.name(index).unwrap_or("unknown").to_string(),
            confidence: probabilities[index],
        })
        .collect();
    let best = ranked[0].clone();

    Some(ClassificationResult { best, ranked })
}
