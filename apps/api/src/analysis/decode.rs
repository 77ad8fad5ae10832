//! Strict decode of the model's raw text into an `AnalysisResult`.

use crate::analysis::models::AnalysisResult;
use crate::analysis::AnalysisError;

/// Decodes `raw` as a single JSON `AnalysisResult` and checks the count invariant.
///
/// No repair is attempted: surrounding prose, code fences, missing fields or negative counts
/// are all `Decode` errors. A structurally valid payload whose total differs from
/// positive + negative is a `CountMismatch`. Array order is preserved as received.
pub fn decode(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult = serde_json::from_str(raw.trim())?;
    check_counts(&result)?;
    Ok(result)
}

pub fn check_counts(result: &AnalysisResult) -> Result<(), AnalysisError> {
    let sum = u64::from(result.positive_review_count) + u64::from(result.negative_review_count);
    if u64::from(result.total_review_count) == sum {
        Ok(())
    } else {
        Err(AnalysisError::CountMismatch {
            total: result.total_review_count,
            positive: result.positive_review_count,
            negative: result.negative_review_count,
        })
    }
}
