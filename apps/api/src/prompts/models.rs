use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the built-in template. Not a user-created record.
pub const DEFAULT_PROMPT_ID: &str = "default";
/// Id assigned to a template resolved from `CUSTOM_PROMPT`. Never editable.
pub const ENV_PROMPT_ID: &str = "env_prompt";

/// A named instruction template. `content` may contain `{customerReview}`,
/// `{productServiceGroup}` and `{productServiceName}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromptTemplate {
    /// Merges the fields present in `update` into this template. The id is never changed.
    pub fn apply(&mut self, update: UpdatePromptRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }
}

/// Which precedence tier produced the active template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    Environment,
    Store,
    Default,
}

/// Body of `POST /api/admin/prompts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePromptRequest {
    pub name: String,
    pub description: Option<String>,
    pub content: String,
    pub is_active: Option<bool>,
}

/// Body of `PUT /api/admin/prompts`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePromptRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

/// Response of `GET /api/admin/prompts?type=active`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePromptResponse {
    pub prompt: PromptTemplate,
    pub source: PromptSource,
    pub editable: bool,
}
