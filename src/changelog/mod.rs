//! Changelog parsing, rendering and writing.

pub mod format;
pub mod links;
pub mod parser;
pub mod template;
pub mod writer;

pub use format::{CHANGELOG_HEADER, DEFAULT_TEMPLATE, ReleaseCategory};
pub use links::{add_task_link, strip_task_link};
pub use parser::{all_releases, splice_new_release, split_lines};
pub use template::{TemplateContext, render};
pub use writer::{load_template, read_changelog, write_changelog};
