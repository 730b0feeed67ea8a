//! Release block rendering.
//!
//! Templates use `${name}` placeholders. Substitution is a single left-to-right
//! pass over a closed set of names: substituted text is never re-scanned, and
//! unknown placeholders are left untouched.

use super::format::ReleaseCategory;

/// Values for one rendered release block.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub release_version: String,
    pub release_date: String,
    pub added_commits: Vec<String>,
    pub fixed_commits: Vec<String>,
    pub changed_commits: Vec<String>,
}

impl TemplateContext {
    fn messages(&self, category: ReleaseCategory) -> &[String] {
        match category {
            ReleaseCategory::Added => &self.added_commits,
            ReleaseCategory::Fixed => &self.fixed_commits,
            ReleaseCategory::Changed => &self.changed_commits,
        }
    }
}

pub fn format_row(message: &str, prefix: &str) -> String {
    format!("{}{}", prefix, message)
}

/// Newline-joined rows; no messages renders as an empty string.
pub fn format_rows(messages: &[String], prefix: &str) -> String {
    messages
        .iter()
        .map(|m| format_row(m, prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill `template` from `context`, prefixing every row with `row_prefix`.
pub fn render(template: &str, context: &TemplateContext, row_prefix: &str) -> String {
    let value = |name: &str| -> Option<String> {
        match name {
            "releaseVersion" => Some(context.release_version.clone()),
            "releaseDate" => Some(context.release_date.clone()),
            _ => ReleaseCategory::ALL
                .into_iter()
                .find(|c| c.placeholder() == name)
                .map(|c| format_rows(context.messages(c), row_prefix)),
        }
    };

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match value(name.trim()) {
                    Some(v) => rendered.push_str(&v),
                    None => rendered.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                rendered.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
