//! Prompt Resolver: picks the single active template and owns the save path.
//!
//! Precedence (first hit wins):
//! 1. `CUSTOM_PROMPT` environment override (always read-only)
//! 2. the stored active record
//! 3. the built-in default, which is seeded into the store outside production
//!
//! `resolve` never fails: every tier error is logged and falls through to the next tier.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::prompts::builtin::default_template;
use crate::prompts::models::{
    ActivePromptResponse, PromptSource, PromptTemplate, UpdatePromptRequest, ENV_PROMPT_ID,
};
use crate::prompts::store::{validate_id, TemplateStore};
use crate::prompts::PromptError;

const ENV_PROMPT_NAME: &str = "환경 변수 프롬프트";
const ENV_PROMPT_DESCRIPTION: &str = "환경 변수에서 로드된 프롬프트";

/// Tiers tried before the built-in default, in order.
const RESOLUTION_CHAIN: [PromptSource; 2] = [PromptSource::Environment, PromptSource::Store];

/// Deployment mode. Production disables every write to the template store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// `production` (any case) → Production; everything else → Development.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn allows_writes(self) -> bool {
        self == RuntimeMode::Development
    }
}

/// A resolved template together with the tier that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub template: PromptTemplate,
    pub source: PromptSource,
}

#[derive(Clone)]
pub struct PromptResolver {
    store: Arc<dyn TemplateStore>,
    mode: RuntimeMode,
    env_override: Option<String>,
}

impl PromptResolver {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        mode: RuntimeMode,
        env_override: Option<String>,
    ) -> Self {
        Self {
            store,
            mode,
            env_override,
        }
    }

    /// Returns the active template.
    pub fn resolve(&self) -> PromptTemplate {
        self.resolve_with_source().template
    }

    pub fn resolve_with_source(&self) -> Resolution {
        let now = Utc::now();

        for source in RESOLUTION_CHAIN {
            let candidate = match source {
                PromptSource::Environment => from_env_override(self.env_override.as_deref(), now),
                PromptSource::Store => from_store(self.store.as_ref()),
                PromptSource::Default => None,
            };
            if let Some(template) = candidate {
                info!("Prompt resolved from {:?}: {}", source, template.name);
                return Resolution { template, source };
            }
        }

        let template = default_template(now);
        info!("Prompt resolved from built-in default: {}", template.name);
        if self.mode.allows_writes() {
            // Best effort: resolution must succeed even when seeding cannot.
            if let Err(e) = self.store.write_active(&template) {
                warn!("Failed to seed default prompt into the store: {e}");
            }
        }

        Resolution {
            template,
            source: PromptSource::Default,
        }
    }

    /// The active template plus whether the admin surface may edit it.
    pub fn active_prompt(&self) -> ActivePromptResponse {
        let Resolution { template, source } = self.resolve_with_source();
        let editable = self.mode.allows_writes() && source != PromptSource::Environment;
        ActivePromptResponse {
            prompt: template,
            source,
            editable,
        }
    }

    /// Active template first, then every archived template not already listed.
    pub fn list_templates(&self) -> Result<Vec<PromptTemplate>, PromptError> {
        let active = self.resolve();
        let mut templates = vec![active];
        for template in self.store.list()? {
            if template.id != templates[0].id {
                templates.push(template);
            }
        }
        Ok(templates)
    }

    /// Persists `template` into the archive and, if it is flagged active, into the active slot.
    ///
    /// An empty id is replaced with a generated one. `createdAt` of an existing record with the
    /// same id is kept; `updatedAt` is always refreshed.
    pub fn save(&self, template: PromptTemplate) -> Result<PromptTemplate, PromptError> {
        let as_active = template.is_active;
        self.persist(template, as_active)
    }

    /// Merges `update` into the currently active template and stores the result as active.
    pub fn update_active(&self, update: UpdatePromptRequest) -> Result<PromptTemplate, PromptError> {
        self.ensure_writable()?;
        let Resolution { mut template, source } = self.resolve_with_source();
        if source == PromptSource::Environment {
            return Err(PromptError::WriteDisabled);
        }
        template.apply(update);
        self.persist(template, true)
    }

    fn persist(
        &self,
        mut template: PromptTemplate,
        as_active: bool,
    ) -> Result<PromptTemplate, PromptError> {
        self.ensure_writable()?;
        if template.id == ENV_PROMPT_ID {
            return Err(PromptError::WriteDisabled);
        }
        if template.id.trim().is_empty() {
            template.id = generate_prompt_id();
        }
        validate_id(&template.id)?;

        if let Some(existing) = self.store.load(&template.id)? {
            template.created_at = existing.created_at;
        }
        template.updated_at = Utc::now();

        self.store.write_template(&template).inspect_err(|e| {
            error!("Failed to save prompt template {}: {e}", template.id);
        })?;
        if as_active {
            self.store.write_active(&template).inspect_err(|e| {
                error!("Failed to save active prompt {}: {e}", template.id);
            })?;
        }

        info!(
            "Saved prompt template {} (active: {})",
            template.id, as_active
        );
        Ok(template)
    }

    fn ensure_writable(&self) -> Result<(), PromptError> {
        if self.mode.allows_writes() {
            Ok(())
        } else {
            warn!("Rejected prompt write in production mode");
            Err(PromptError::WriteDisabled)
        }
    }
}

pub fn generate_prompt_id() -> String {
    format!("prompt_{}", Uuid::new_v4().simple())
}

#[derive(Debug, Deserialize)]
struct EnvPromptPayload {
    name: Option<String>,
    description: Option<String>,
    content: Option<String>,
}

/// Tier 1. Parses the override as `{name?, description?, content?}`; when that fails, or the
/// payload has no usable `content`, the raw value itself becomes the content.
pub fn from_env_override(raw: Option<&str>, now: DateTime<Utc>) -> Option<PromptTemplate> {
    let raw = raw.filter(|value| !value.trim().is_empty())?;

    let (name, description, content) = match serde_json::from_str::<EnvPromptPayload>(raw) {
        Ok(payload) => {
            let content = payload
                .content
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| {
                    warn!("CUSTOM_PROMPT has no content field; using the raw value");
                    raw.to_string()
                });
            (payload.name, payload.description, content)
        }
        Err(_) => {
            warn!("CUSTOM_PROMPT is not a JSON object; using it verbatim as prompt content");
            (None, None, raw.to_string())
        }
    };

    Some(PromptTemplate {
        id: ENV_PROMPT_ID.to_string(),
        name: name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| ENV_PROMPT_NAME.to_string()),
        description: description.unwrap_or_else(|| ENV_PROMPT_DESCRIPTION.to_string()),
        content,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Tier 2. Any read or decode failure counts as "no stored record".
pub fn from_store(store: &dyn TemplateStore) -> Option<PromptTemplate> {
    match store.load_active() {
        Ok(template) => template,
        Err(e) => {
            error!("Failed to load stored active prompt: {e}");
            None
        }
    }
}
