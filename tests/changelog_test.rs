//! Integration tests for changelog parsing, splicing and writing against
//! fixture files.

mod common;

use changelog_gen::changelog::parser::{document_head, release_headers};
use changelog_gen::changelog::{
    CHANGELOG_HEADER, all_releases, read_changelog, splice_new_release, split_lines,
    write_changelog,
};
use changelog_gen::release::boundary::previous_release_messages;
use common::{changelog_fixture, read_fixture, test_config};

const NEW_RELEASE: &str = "## [2.1.0] - 2020-12-01\n### Added\n- [TASK-30]: Добавлен поиск\n";

#[test]
fn test_release_headers_from_fixture() {
    let content = read_fixture(changelog_fixture("with_versions.md"));
    let lines = split_lines(&content);

    assert_eq!(
        release_headers(&lines),
        vec![
            "## [2.0.0] - 2020-11-02",
            "## [1.10.0] - 2020-10-15",
            "## [1.0.0] - 2020-10-01",
        ]
    );
    assert_eq!(all_releases(&lines).len(), 3);
}

#[test]
fn test_no_releases_in_empty_fixture() {
    let content = read_fixture(changelog_fixture("empty.md"));
    let lines = split_lines(&content);

    assert!(all_releases(&lines).is_empty());
    assert_eq!(document_head(&lines), content.trim_end());
}

#[test]
fn test_previous_release_messages_strip_links() {
    let content = read_fixture(changelog_fixture("with_versions.md"));

    let messages = previous_release_messages(&content, &test_config());

    assert_eq!(
        messages,
        vec![
            "[TASK-20]: Добавлен экспорт отчётов",
            "[TASK-21]: Исправлена пагинация",
            "[NO-TASK]: Поправлен отступ в шапке",
        ]
    );
}

#[test]
fn test_splice_preserves_existing_releases() {
    let content = read_fixture(changelog_fixture("with_versions.md"));
    let releases_start = content.find("## [2.0.0]").unwrap();
    let head = content[..releases_start].trim_end();
    let existing = &content[releases_start..];

    let spliced = splice_new_release(&content, NEW_RELEASE);

    let expected = format!("{}\n\n{}\n\n{}", head, NEW_RELEASE.trim(), existing);
    assert_eq!(spliced, expected);
}

#[test]
fn test_splice_normalises_crlf() {
    let content = read_fixture(changelog_fixture("with_versions.md"));
    let crlf = content.replace('\n', "\r\n");

    assert_eq!(
        splice_new_release(&crlf, NEW_RELEASE),
        splice_new_release(&content, NEW_RELEASE)
    );
}

#[test]
fn test_splice_into_empty_fixture() {
    let content = read_fixture(changelog_fixture("empty.md"));

    let spliced = splice_new_release(&content, NEW_RELEASE);

    assert_eq!(
        spliced,
        format!("{}\n\n{}", CHANGELOG_HEADER.trim_end(), NEW_RELEASE)
    );
}

#[test]
fn test_repeated_splices_keep_order() {
    let first = splice_new_release(CHANGELOG_HEADER, "## [1.0.0] - 2020-10-01\n### Added\n- [TASK-1]: A\n");
    let second = splice_new_release(&first, "## [1.1.0] - 2020-10-02\n### Added\n- [TASK-2]: B\n");
    let third = splice_new_release(&second, "## [1.2.0] - 2020-10-03\n### Added\n- [TASK-3]: C\n");

    let lines = split_lines(&third);
    assert_eq!(
        release_headers(&lines),
        vec![
            "## [1.2.0] - 2020-10-03",
            "## [1.1.0] - 2020-10-02",
            "## [1.0.0] - 2020-10-01",
        ]
    );
    assert!(third.starts_with(CHANGELOG_HEADER.trim_end()));
}

#[test]
fn test_write_fixture_copy_with_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CHANGELOG.md");
    let original = read_fixture(changelog_fixture("with_versions.md"));
    std::fs::write(&path, &original).unwrap();

    let spliced = splice_new_release(&original, NEW_RELEASE);
    write_changelog(&path, &spliced).unwrap();

    assert_eq!(read_changelog(&path).unwrap().as_deref(), Some(spliced.as_str()));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("CHANGELOG.md.bak")).unwrap(),
        original
    );
}
