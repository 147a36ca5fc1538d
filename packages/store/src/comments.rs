//! Two-level comment threading.
//!
//! Comments form a tree of depth two: top-level comments and their direct
//! replies. Replies are grouped under their parent in arrival order. A
//! reply whose parent is missing from the listing (deleted parent, or a
//! two-level reply minted by some other client) is promoted to top level
//! rather than hidden.
//!
//! When the user replies to a reply, [`resolve_parent`] flattens the new
//! comment onto the thread's top-level comment, keeping the tree at one
//! level of nesting.

use crate::models::{Comment, Identity};

/// A top-level comment with its direct replies.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}

/// Group a task's comments into threads, preserving arrival order for both
/// roots and replies.
pub fn threads(comments: &[Comment]) -> Vec<CommentThread> {
    let top_level: Vec<&str> = comments
        .iter()
        .filter(|c| !c.is_reply())
        .map(|c| c.id.as_str())
        .collect();

    let mut out: Vec<CommentThread> = Vec::new();
    for comment in comments {
        let parent = comment.parent_id.as_deref();
        let is_root = match parent {
            None => true,
            // Orphaned reply: promote instead of dropping it.
            Some(pid) => !top_level.contains(&pid),
        };
        if is_root {
            out.push(CommentThread {
                root: comment.clone(),
                replies: Vec::new(),
            });
        }
    }

    for comment in comments {
        if let Some(pid) = comment.parent_id.as_deref() {
            if let Some(thread) = out.iter_mut().find(|t| t.root.id == pid) {
                thread.replies.push(comment.clone());
            }
        }
    }

    out
}

/// Resolve which comment a new reply should attach to. Replying to a reply
/// attaches to that reply's own top-level parent. Returns `None` when the
/// requested parent is not in the listing at all.
pub fn resolve_parent(comments: &[Comment], reply_to: &str) -> Option<String> {
    let parent = comments.iter().find(|c| c.id == reply_to)?;
    match &parent.parent_id {
        None => Some(parent.id.clone()),
        Some(grandparent) => Some(grandparent.clone()),
    }
}

/// Edit and delete are allowed only on the caller's own comments.
pub fn can_modify(identity: &Identity, comment: &Comment) -> bool {
    identity.id == comment.author_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.into(),
            task_id: "t1".into(),
            author_id: "u1".into(),
            author_name: "User One".into(),
            content: format!("comment {id}"),
            parent_id: parent.map(|p| p.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn replies_group_under_their_parent_in_arrival_order() {
        let listing = vec![
            comment("c1", None),
            comment("c2", Some("c1")),
            comment("c3", None),
            comment("c4", Some("c1")),
        ];
        let grouped = threads(&listing);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].root.id, "c1");
        let replies: Vec<&str> = grouped[0].replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(replies, ["c2", "c4"]);
        assert!(grouped[1].replies.is_empty());
    }

    #[test]
    fn orphaned_replies_are_promoted_to_top_level() {
        let listing = vec![comment("c1", None), comment("c2", Some("gone"))];
        let grouped = threads(&listing);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1].root.id, "c2");
    }

    #[test]
    fn replying_to_a_reply_flattens_to_the_thread_root() {
        let listing = vec![comment("c1", None), comment("c2", Some("c1"))];

        assert_eq!(resolve_parent(&listing, "c1"), Some("c1".into()));
        assert_eq!(resolve_parent(&listing, "c2"), Some("c1".into()));
        assert_eq!(resolve_parent(&listing, "missing"), None);
    }

    #[test]
    fn only_the_author_may_modify() {
        let c = comment("c1", None);
        let author = Identity {
            id: "u1".into(),
            name: "User One".into(),
            email: "u1@example.com".into(),
            role: "Team Member".into(),
        };
        let other = Identity { id: "u2".into(), ..author.clone() };

        assert!(can_modify(&author, &c));
        assert!(!can_modify(&other, &c));
    }
}
