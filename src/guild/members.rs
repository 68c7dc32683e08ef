//! Member search.

use super::model::Member;
use crate::consts::cli_consts::MAX_MEMBER_RESULTS;

/// Case-insensitive substring match against id, tag or nickname.
///
/// An empty query matches everyone. At most [`MAX_MEMBER_RESULTS`] members are
/// returned; the snapshot itself is untouched.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    members
        .iter()
        .filter(|member| needle.is_empty() || matches(member, &needle))
        .take(MAX_MEMBER_RESULTS)
        .collect()
}

fn matches(member: &Member, needle: &str) -> bool {
    member.id.to_lowercase().contains(needle)
        || member.tag.to_lowercase().contains(needle)
        || member
            .nickname
            .as_deref()
            .is_some_and(|nick| nick.to_lowercase().contains(needle))
}
