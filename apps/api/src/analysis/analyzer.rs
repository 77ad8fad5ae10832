//! Review analysis pipeline.
//!
//! Flow: validate request → resolve active prompt → substitute request variables →
//!       model call → strict decode (shape + count invariant).

use tracing::info;

use crate::analysis::decode::decode;
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::errors::{run_blocking, AppError};
use crate::llm_client::CompletionModel;
use crate::prompts::{substitute, PromptResolver};

/// Runs one analysis request end to end.
pub async fn run_analysis(
    request: &AnalysisRequest,
    resolver: &PromptResolver,
    model: &dyn CompletionModel,
) -> Result<AnalysisResult, AppError> {
    request.validate()?;

    info!(
        "Analysis requested: group={}, name={}, review_chars={}",
        request.product_service_group,
        request.product_service_name,
        request.customer_review.chars().count()
    );

    let resolver = resolver.clone();
    let template = run_blocking("prompt resolution", move || resolver.resolve()).await?;
    let prompt = substitute(&template.content, &request.prompt_variables());

    let raw = model
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Review analysis call failed: {e}")))?;

    let result = decode(&raw)?;

    info!(
        "Analysis decoded: product={}, total={}, positive={}, negative={}, keywords={}+{}",
        result.product,
        result.total_review_count,
        result.positive_review_count,
        result.negative_review_count,
        result.positive_keywords.len(),
        result.negative_keywords.len()
    );

    Ok(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::analysis::AnalysisError;
    use crate::llm_client::LlmError;
    use crate::prompts::{FileTemplateStore, RuntimeMode};

    /// Returns a canned reply and records every prompt it was sent.
    pub(crate) struct StubModel {
        reply: Result<String, ()>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }
    }

    pub(crate) const VALID_REPLY: &str = r#"{
        "product": "X1",
        "analysisDate": "2026-10-19",
        "totalReviewCount": 10,
        "positiveReviewCount": 7,
        "negativeReviewCount": 3,
        "positiveKeywords": [{"keyword": "배송", "frequency": 4, "sampleReviews": ["빨라요"]}],
        "negativeKeywords": [{"keyword": "가격", "frequency": 2, "sampleReviews": ["비싸요"]}],
        "insights": {
            "improvementIdeas": ["가격 조정"],
            "marketingStrategy": "빠른 배송 강조",
            "promoCopies": ["오늘 주문, 내일 도착"]
        }
    }"#;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            customer_review: "Great!".to_string(),
            product_service_group: "Phones".to_string(),
            product_service_name: "X1".to_string(),
        }
    }

    fn resolver_with_env(env: &str) -> (PromptResolver, TempDir) {
        let dir = tempdir().unwrap();
        let resolver = PromptResolver::new(
            Arc::new(FileTemplateStore::new(dir.path())),
            RuntimeMode::Production,
            Some(env.to_string()),
        );
        (resolver, dir)
    }

    #[tokio::test]
    async fn test_prompt_is_substituted_before_model_call() {
        let (resolver, _dir) = resolver_with_env(
            "Review: {customerReview}, Group: {productServiceGroup}, Name: {productServiceName}",
        );
        let model = StubModel::replying(VALID_REPLY);

        let result = run_analysis(&request(), &resolver, &model).await.unwrap();

        assert_eq!(result.positive_review_count, 7);
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(
            prompts.as_slice(),
            ["Review: Great!, Group: Phones, Name: X1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_model() {
        let (resolver, _dir) = resolver_with_env("{customerReview}");
        let model = StubModel::replying(VALID_REPLY);
        let mut req = request();
        req.product_service_group = String::new();

        let err = run_analysis(&req, &resolver, &model).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_llm_error() {
        let (resolver, _dir) = resolver_with_env("{customerReview}");
        let err = run_analysis(&request(), &resolver, &StubModel::failing())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_malformed_reply_maps_to_decode_error() {
        let (resolver, _dir) = resolver_with_env("{customerReview}");
        let model = StubModel::replying("Sorry, I cannot help with that.");
        let err = run_analysis(&request(), &resolver, &model).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ModelOutput(AnalysisError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_inconsistent_counts_map_to_count_mismatch() {
        let (resolver, _dir) = resolver_with_env("{customerReview}");
        let reply = VALID_REPLY.replace("\"totalReviewCount\": 10", "\"totalReviewCount\": 11");
        let model = StubModel::replying(&reply);
        let err = run_analysis(&request(), &resolver, &model).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ModelOutput(AnalysisError::CountMismatch { .. })
        ));
    }
}
