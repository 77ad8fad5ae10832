use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::prompts::substitute::{CUSTOMER_REVIEW, PRODUCT_SERVICE_GROUP, PRODUCT_SERVICE_NAME};

/// Body of `POST /api/analyze`. Missing and null fields deserialize as empty and are rejected
/// by `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub customer_review: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub product_service_group: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub product_service_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            (CUSTOMER_REVIEW, &self.customer_review),
            (PRODUCT_SERVICE_GROUP, &self.product_service_group),
            (PRODUCT_SERVICE_NAME, &self.product_service_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Placeholder bindings for `prompts::substitute`.
    pub fn prompt_variables(&self) -> [(&str, &str); 3] {
        [
            (CUSTOMER_REVIEW, self.customer_review.as_str()),
            (PRODUCT_SERVICE_GROUP, self.product_service_group.as_str()),
            (PRODUCT_SERVICE_NAME, self.product_service_name.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub keyword: String,
    /// Raw mention count, not de-duplicated.
    pub frequency: u32,
    /// Verbatim excerpts; three by convention, not enforced.
    pub sample_reviews: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub improvement_ideas: Vec<String>,
    /// Prose; paragraphs separated by newlines.
    pub marketing_strategy: String,
    pub promo_copies: Vec<String>,
}

impl Insights {
    /// Non-empty, trimmed paragraphs of the marketing strategy, in order.
    pub fn marketing_paragraphs(&self) -> Vec<&str> {
        self.marketing_strategy
            .lines()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Structured analysis returned by the model. Immutable after decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub product: String,
    pub analysis_date: String,
    pub total_review_count: u32,
    pub positive_review_count: u32,
    pub negative_review_count: u32,
    pub positive_keywords: Vec<Keyword>,
    pub negative_keywords: Vec<Keyword>,
    pub insights: Insights,
}

impl AnalysisResult {
    pub fn positive_percentage(&self) -> f64 {
        percentage(self.positive_review_count, self.total_review_count)
    }

    pub fn negative_percentage(&self) -> f64 {
        percentage(self.negative_review_count, self.total_review_count)
    }
}

/// `part / total * 100`, defined as 0.0 when `total` is zero.
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total) * 100.0
    }
}

/// One decimal place with a percent sign, e.g. `70.0%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights(strategy: &str) -> Insights {
        Insights {
            improvement_ideas: vec![],
            marketing_strategy: strategy.to_string(),
            promo_copies: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let req = AnalysisRequest {
            customer_review: "배송이 빨라요".to_string(),
            product_service_group: "전자제품".to_string(),
            product_service_name: "X1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_names_every_missing_field() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"customerReview":"  ","productServiceName":"X1"}"#).unwrap();
        match req.validate() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("customerReview"));
                assert!(msg.contains("productServiceGroup"));
                assert!(!msg.contains("productServiceName"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_null_fields_reach_validation() {
        let req: AnalysisRequest = serde_json::from_str(
            r#"{"customerReview":null,"productServiceGroup":"g","productServiceName":"n"}"#,
        )
        .unwrap();
        assert_eq!(req.customer_review, "");
        match req.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("customerReview")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_variables_bind_request_fields() {
        let req = AnalysisRequest {
            customer_review: "Great!".to_string(),
            product_service_group: "Phones".to_string(),
            product_service_name: "X1".to_string(),
        };
        assert_eq!(
            req.prompt_variables(),
            [
                ("customerReview", "Great!"),
                ("productServiceGroup", "Phones"),
                ("productServiceName", "X1"),
            ]
        );
    }

    #[test]
    fn test_percentage_handles_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(format_percentage(percentage(5, 0)), "0.0%");
    }

    #[test]
    fn test_percentage_formatting() {
        assert_eq!(format_percentage(percentage(7, 10)), "70.0%");
        assert_eq!(format_percentage(percentage(3, 10)), "30.0%");
        assert_eq!(format_percentage(percentage(1, 3)), "33.3%");
        assert_eq!(format_percentage(percentage(2, 3)), "66.7%");
    }

    #[test]
    fn test_marketing_paragraphs_split_on_blank_and_single_newlines() {
        let i = insights("  First idea.  \n\nSecond idea.\nThird idea.\n\n   \n");
        assert_eq!(
            i.marketing_paragraphs(),
            vec!["First idea.", "Second idea.", "Third idea."]
        );
    }

    #[test]
    fn test_marketing_paragraphs_handle_crlf_and_empty() {
        assert_eq!(insights("A\r\n\r\nB").marketing_paragraphs(), vec!["A", "B"]);
        assert!(insights("").marketing_paragraphs().is_empty());
    }
}
