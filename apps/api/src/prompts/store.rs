//! Durable template storage.
//!
//! Two logical slots: the archive of every saved template (one `<id>.json` per record)
//! and the single active record (`active.json`). Writes are last-writer-wins; each file
//! is replaced atomically so readers never observe a partial record.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::prompts::models::PromptTemplate;
use crate::prompts::PromptError;

const ACTIVE_FILE: &str = "active.json";

/// Storage backend for prompt templates. Carried by `PromptResolver` as `Arc<dyn TemplateStore>`.
pub trait TemplateStore: Send + Sync {
    /// Returns the active record, or `None` if nothing has been saved as active yet.
    fn load_active(&self) -> Result<Option<PromptTemplate>, PromptError>;

    /// Returns the archived record with `id`, if any.
    fn load(&self, id: &str) -> Result<Option<PromptTemplate>, PromptError>;

    /// Returns every archived record, oldest first.
    fn list(&self) -> Result<Vec<PromptTemplate>, PromptError>;

    /// Writes (or overwrites) the archive entry keyed by `template.id`.
    fn write_template(&self, template: &PromptTemplate) -> Result<(), PromptError>;

    /// Overwrites the active slot.
    fn write_active(&self, template: &PromptTemplate) -> Result<(), PromptError>;
}

/// File-backed store rooted at `PROMPTS_DIR`.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn template_path(&self, id: &str) -> Result<PathBuf, PromptError> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), PromptError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| PromptError::Storage(e.error))?;
        debug!("Wrote prompt record {}", path.display());
        Ok(())
    }
}

impl TemplateStore for FileTemplateStore {
    fn load_active(&self) -> Result<Option<PromptTemplate>, PromptError> {
        read_record(&self.dir.join(ACTIVE_FILE))
    }

    fn load(&self, id: &str) -> Result<Option<PromptTemplate>, PromptError> {
        read_record(&self.template_path(id)?)
    }

    fn list(&self) -> Result<Vec<PromptTemplate>, PromptError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut templates = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let is_active_slot = path.file_name().is_some_and(|name| name == ACTIVE_FILE);
            if !is_json || is_active_slot {
                continue;
            }
            match read_record(&path) {
                Ok(Some(template)) => templates.push(template),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable prompt record {}: {e}", path.display()),
            }
        }

        templates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(templates)
    }

    fn write_template(&self, template: &PromptTemplate) -> Result<(), PromptError> {
        let path = self.template_path(&template.id)?;
        self.write_json(&path, template)
    }

    fn write_active(&self, template: &PromptTemplate) -> Result<(), PromptError> {
        self.write_json(&self.dir.join(ACTIVE_FILE), template)
    }
}

fn read_record(path: &Path) -> Result<Option<PromptTemplate>, PromptError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

/// Template ids double as file names: ASCII alphanumerics, `_` and `-` only.
pub fn validate_id(id: &str) -> Result<(), PromptError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(PromptError::InvalidId(id.to_string()))
    }
}
