use std::collections::HashMap;

use crate::domains::comment::models::{Comment, CommentNode};

/// Build the one-level response tree from a flat comment list.
///
/// Roots (id == parent_id) keep the input order; each root carries the
/// comments whose parent_id names it, also in input order. Children keyed
/// by a non-root parent are not surfaced; depth never exceeds one level.
/// Pure function, no I/O.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let mut children: HashMap<String, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in comments {
        if comment.is_root() {
            roots.push(CommentNode::from_root(comment));
        } else {
            children
                .entry(comment.parent_id.clone())
                .or_default()
                .push(comment);
        }
    }

    for root in &mut roots {
        if let Some(list) = children.remove(&root.id) {
            root.comments = list;
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: &str, parent_id: &str) -> Comment {
        let now = Utc::now();
        Comment {
            id: id.to_string(),
            blog_id: "blog-1".to_string(),
            user_id: "user-1".to_string(),
            parent_id: parent_id.to_string(),
            content: format!("content of {id}"),
            time_created: now,
            last_updated: now,
        }
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(build_comment_tree(Vec::new()).is_empty());
    }

    #[test]
    fn roots_keep_input_order() {
        let tree = build_comment_tree(vec![
            comment("c2", "c2"),
            comment("c1", "c1"),
            comment("c3", "c3"),
        ]);

        let ids: Vec<&str> = tree.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1", "c3"]);
        assert!(tree.iter().all(|node| node.comments.is_empty()));
    }

    #[test]
    fn children_attach_to_their_root_in_input_order() {
        let tree = build_comment_tree(vec![
            comment("c1", "c1"),
            comment("c2", "c1"),
            comment("c3", "c1"),
            comment("c4", "c4"),
            comment("c5", "c4"),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, "c1");
        let child_ids: Vec<&str> = tree[0].comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, ["c2", "c3"]);
        assert_eq!(tree[1].id, "c4");
        assert_eq!(tree[1].comments.len(), 1);
    }

    #[test]
    fn grandchildren_are_not_surfaced() {
        // c3 replies to c2, which is itself a child of c1. The tree is one
        // level deep, so c3 is grouped under the non-root c2 and dropped.
        let tree = build_comment_tree(vec![
            comment("c1", "c1"),
            comment("c2", "c1"),
            comment("c3", "c2"),
        ]);

        assert_eq!(tree.len(), 1);
        let child_ids: Vec<&str> = tree[0].comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, ["c2"]);
    }

    #[test]
    fn orphan_children_of_missing_roots_are_dropped() {
        let tree = build_comment_tree(vec![comment("c2", "c-gone"), comment("c1", "c1")]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, "c1");
        assert!(tree[0].comments.is_empty());
    }
}
