//! Task-tracker link decoration for change rows.
//!
//! `[TASK-99]: fix bug` becomes `[TASK-99](https://x/TASK-99): fix bug`.

use regex_lite::Regex;

/// Remove a `(<link><rest>)` decoration from a row.
///
/// Only the first decoration is removed; rows without one are returned as is.
pub fn strip_task_link(row: &str, link: &str) -> String {
    if link.is_empty() {
        return row.to_string();
    }

    match Regex::new(&format!(r"\({}\S+\)", regex_lite::escape(link))) {
        Ok(pattern) => pattern.replace(row, "").into_owned(),
        Err(_) => row.to_string(),
    }
}

/// Insert `(<link><task id>)` right after the first task tag in `row`.
///
/// The task id is the matched tag with `[`, `]` and `|` removed.
pub fn add_task_link(row: &str, link: &str, task_pattern: &Regex) -> String {
    let Some(tag) = task_pattern.find(row) else {
        return row.to_string();
    };

    let task_id: String = tag
        .as_str()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '|'))
        .collect();

    format!(
        "{}({}{}){}",
        &row[..tag.end()],
        link,
        task_id,
        &row[tag.end()..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://jira.example.com/browse/";

    fn task_pattern() -> Regex {
        Regex::new(r"(\[TASK-\d+\])").unwrap()
    }

    #[test]
    fn test_add_task_link() {
        let row = add_task_link("[TASK-99]: fix bug", "https://x/", &Regex::new(r"\[TASK-\d+\]").unwrap());
        assert_eq!(row, "[TASK-99](https://x/TASK-99): fix bug");
    }

    #[test]
    fn test_add_task_link_cyrillic_message() {
        let row = add_task_link(
            "[TASK-1876]: Исправлена валидация поля email при восстановлении пароля",
            LINK,
            &task_pattern(),
        );
        assert_eq!(
            row,
            "[TASK-1876](https://jira.example.com/browse/TASK-1876): Исправлена валидация поля email при восстановлении пароля"
        );
    }

    #[test]
    fn test_add_task_link_without_task_tag() {
        let row = "[NO-TASK]: Исправлена валидация поля email";
        assert_eq!(add_task_link(row, LINK, &task_pattern()), row);
    }

    #[test]
    fn test_add_task_link_uses_first_tag_only() {
        let row = add_task_link("[TASK-1] [TASK-2]: merged", LINK, &task_pattern());
        assert_eq!(row, "[TASK-1](https://jira.example.com/browse/TASK-1) [TASK-2]: merged");
    }

    #[test]
    fn test_add_task_link_tag_in_middle() {
        let row = add_task_link("Hotfix [TASK-7]: crash", LINK, &task_pattern());
        assert_eq!(row, "Hotfix [TASK-7](https://jira.example.com/browse/TASK-7): crash");
    }

    #[test]
    fn test_strip_task_link() {
        let row = "[TASK-1876](https://jira.example.com/browse/TASK-1876): Исправлена валидация";
        assert_eq!(strip_task_link(row, LINK), "[TASK-1876]: Исправлена валидация");
    }

    #[test]
    fn test_strip_task_link_without_link() {
        let row = "[TASK-1876]: Исправлена валидация (см. задачу)";
        assert_eq!(strip_task_link(row, LINK), row);
    }

    #[test]
    fn test_strip_task_link_with_empty_link_is_noop() {
        let row = "[TASK-1](x): y";
        assert_eq!(strip_task_link(row, ""), row);
    }

    #[test]
    fn test_add_then_strip_recovers_row() {
        for row in [
            "[TASK-1]: Добавлен экран",
            "- [TASK-42]: Поправлен отступ",
            "Hotfix [TASK-7]: crash",
            "[NO-TASK]: untouched",
        ] {
            let linked = add_task_link(row, LINK, &task_pattern());
            assert_eq!(strip_task_link(&linked, LINK), row);
        }
    }
}
