//! Interactive `init` command: collect settings and write `cg.config.json`.

use std::path::Path;

use dialoguer::{Confirm, Input};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ConfigError;

/// Prompt for every setting and save the config to `path`.
///
/// Returns `false` if the user declined to overwrite an existing file.
pub fn run_init(path: &Path) -> Result<bool, ConfigError> {
    let defaults = if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            return Ok(false);
        }

        existing_defaults(path)
    } else {
        Config::default()
    };

    let config = prompt_config(&defaults)?;
    config.save(path)?;

    Ok(true)
}

/// Current values of an existing config, offered as defaults when
/// reconfiguring. An unreadable file falls back to the built-in defaults.
pub fn existing_defaults(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "ignoring unreadable config, proposing defaults"
            );
            Config::default()
        }
    }
}

/// Ask for each field, proposing the values in `defaults`.
pub fn prompt_config(defaults: &Config) -> Result<Config, ConfigError> {
    let config = Config {
        changelog_branch: ask(
            "Choose the branch where from generate a changelog",
            &defaults.changelog_branch,
        )?,
        changelog_file_name: ask("What's your changelog file name", &defaults.changelog_file_name)?,
        jira_link: ask("Enter link to your jira", &defaults.jira_link)?,
        template_row_prefix: ask("Enter template row prefix", &defaults.template_row_prefix)?,
        commit_prefix: ask("Enter your commits prefix (RegExp)", &defaults.commit_prefix)?,
        task_prefix: ask("Enter your task commits prefix", &defaults.task_prefix)?,
        without_task_prefix: ask(
            "Enter your without task commits prefix",
            &defaults.without_task_prefix,
        )?,
        escape_tasks_prefix: ask(
            "Enter regex for commits to be skipped",
            &defaults.escape_tasks_prefix,
        )?,
        fix_task_keywords: ask("Enter fix task keywords", &defaults.fix_task_keywords)?,
        change_task_keywords: ask("Enter change task keywords", &defaults.change_task_keywords)?,
        added_task_keywords: ask("Enter added task keywords", &defaults.added_task_keywords)?,
        template_file_name: defaults.template_file_name.clone(),
    };

    // Patterns must compile before they are saved.
    config.compile()?;
    debug!("config answers collected");

    Ok(config)
}

fn ask(prompt: &str, default: &str) -> Result<String, ConfigError> {
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(answer)
}
