// Review analysis: request validation, model invocation and strict decoding of the result.
// The model call goes through llm_client::CompletionModel; decoding never repairs output.

pub mod analyzer;
pub mod decode;
pub mod handlers;
pub mod models;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model output is not a valid analysis payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "review counts are inconsistent: total {total} != positive {positive} + negative {negative}"
    )]
    CountMismatch {
        total: u32,
        positive: u32,
        negative: u32,
    },
}
