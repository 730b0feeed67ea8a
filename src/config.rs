//! Configuration file (`cg.config.json`) loading, saving and compilation.
//!
//! The raw [`Config`] mirrors the JSON file one-to-one. [`Config::compile`]
//! turns its pattern strings into regexes once, at process entry; the
//! resulting [`CompiledConfig`] is passed by reference to every stage.

use std::path::{Path, PathBuf};

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "cg.config.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "CG_CONFIG";

/// Raw configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Branch the changelog is generated from.
    pub changelog_branch: String,
    pub changelog_file_name: String,
    /// Base URL of the task tracker, e.g. `https://jira.com/browse/`.
    pub jira_link: String,
    /// Marker prepended to every rendered change row.
    pub template_row_prefix: String,
    /// Regex gating which commits count as task-linked.
    pub commit_prefix: String,
    /// Regex matching the task tag inside a message, e.g. `[TASK-1234]`.
    pub task_prefix: String,
    pub without_task_prefix: String,
    /// Regex of commits that are always skipped. Empty disables it.
    pub escape_tasks_prefix: String,
    #[serde(rename = "fixTaskKeyword")]
    pub fix_task_keywords: String,
    #[serde(rename = "changeTaskKeyword")]
    pub change_task_keywords: String,
    #[serde(rename = "addedTaskKeyword")]
    pub added_task_keywords: String,
    /// Optional path to a custom release template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_file_name: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            changelog_branch: "master".to_string(),
            changelog_file_name: "CHANGELOG.md".to_string(),
            jira_link: "https://jira.com/browse/".to_string(),
            template_row_prefix: "- ".to_string(),
            commit_prefix: r"^(\[TASK\-\d+\]|\[NO-TASK\])".to_string(),
            task_prefix: r"(\[TASK\-\d+\])".to_string(),
            without_task_prefix: r"(\[NO-TASK\])".to_string(),
            escape_tasks_prefix: String::new(),
            fix_task_keywords: "Исправлен, Поправлен".to_string(),
            change_task_keywords: "Обновлен, Заменен, Рефакторинг, Выполнен".to_string(),
            added_task_keywords: "Добавлен, Реализован".to_string(),
            template_file_name: None,
        }
    }
}

/// Configuration with every pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub changelog_branch: String,
    pub changelog_file_name: String,
    pub jira_link: String,
    pub template_row_prefix: String,
    pub commit_prefix: Regex,
    /// Matches change rows of a rendered release: the row prefix followed by
    /// the commit prefix.
    pub change_row: Regex,
    pub task_prefix: Regex,
    pub escape_tasks_prefix: Option<Regex>,
    pub fix_keywords: Option<Regex>,
    pub change_keywords: Option<Regex>,
    pub added_keywords: Option<Regex>,
    pub template_file_name: Option<PathBuf>,
}

impl Config {
    /// Load the config from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "loading config");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config from `path` if it exists, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;

        std::fs::write(path, json + "\n").map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Compile all pattern fields.
    pub fn compile(&self) -> Result<CompiledConfig, ConfigError> {
        let commit_prefix = compile_pattern("commitPrefix", &self.commit_prefix)?;
        let change_row = compile_pattern(
            "commitPrefix",
            &change_row_pattern(&self.template_row_prefix, &self.commit_prefix),
        )?;
        let task_prefix = compile_pattern("taskPrefix", &self.task_prefix)?;

        let escape_tasks_prefix = if self.escape_tasks_prefix.trim().is_empty() {
            None
        } else {
            Some(compile_pattern("escapeTasksPrefix", &self.escape_tasks_prefix)?)
        };

        let fix_keywords = keywords_to_regex(&self.fix_task_keywords)
            .map(|p| compile_pattern("fixTaskKeyword", &p))
            .transpose()?;
        let change_keywords = keywords_to_regex(&self.change_task_keywords)
            .map(|p| compile_pattern("changeTaskKeyword", &p))
            .transpose()?;
        let added_keywords = keywords_to_regex(&self.added_task_keywords)
            .map(|p| compile_pattern("addedTaskKeyword", &p))
            .transpose()?;

        Ok(CompiledConfig {
            changelog_branch: self.changelog_branch.clone(),
            changelog_file_name: self.changelog_file_name.clone(),
            jira_link: self.jira_link.clone(),
            template_row_prefix: self.template_row_prefix.clone(),
            commit_prefix,
            change_row,
            task_prefix,
            escape_tasks_prefix,
            fix_keywords,
            change_keywords,
            added_keywords,
            template_file_name: self.template_file_name.clone(),
        })
    }
}

/// Resolve which config file to use.
///
/// An explicit path wins, then `CG_CONFIG`, then `cg.config.json` in `cwd`.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => cwd.join(CONFIG_FILE_NAME),
    }
}

/// Convert a comma-separated keyword list into an alternation pattern.
///
/// `"Исправлен, Поправлен"` becomes `(Исправлен|Поправлен)`. Returns `None`
/// when the list has no non-empty entries.
pub fn keywords_to_regex(keywords: &str) -> Option<String> {
    let parts: Vec<&str> = keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join("|")))
    }
}

/// Pattern for change rows: `^<row prefix>(?:<commit prefix without ^>)`.
fn change_row_pattern(row_prefix: &str, commit_prefix: &str) -> String {
    format!(
        "^{}(?:{})",
        regex_lite::escape(row_prefix),
        commit_prefix.trim_start_matches('^')
    )
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { field, source })
}
