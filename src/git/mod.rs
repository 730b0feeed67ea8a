//! Commit history: the commit record, selection utilities and the
//! repository provider.

pub mod commits;
pub mod history;
pub mod select;

pub use commits::{Commit, date_of, hash_of, matches, message_of};
pub use history::{GitHistory, HistoryProvider};
pub use select::{
    commits_with_messages, exclude_by_match, filter_by_match, index_by_hash, next_commit_after,
    slice_between_hashes, sort_by_date_descending,
};
