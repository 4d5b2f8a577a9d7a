//! Output tree value.

use serde::Serialize;
use serde_json::{json, Value};

use crate::core::Result;

/// A node of the output tree.
///
/// Groups serialize as `{"key", "title", "children"}` in that order. Leaves
/// are opaque caller payloads and serialize verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Group {
        key: String,
        title: String,
        children: Vec<TreeNode>,
    },
    Leaf(Value),
}

impl TreeNode {
    /// Group without children.
    pub fn group(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self::group_with_children(key, title, Vec::new())
    }

    pub fn group_with_children(
        key: impl Into<String>,
        title: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        TreeNode::Group {
            key: key.into(),
            title: title.into(),
            children,
        }
    }

    /// Conventional leaf: `{"key", "title", "isLeaf": true}`.
    pub fn leaf(key: impl Into<String>, title: impl Into<String>) -> Self {
        TreeNode::Leaf(json!({
            "key": key.into(),
            "title": title.into(),
            "isLeaf": true,
        }))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Group key, or the `key` field of a leaf payload if it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            TreeNode::Group { key, .. } => Some(key),
            TreeNode::Leaf(value) => value.get("key").and_then(Value::as_str),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            TreeNode::Group { title, .. } => Some(title),
            TreeNode::Leaf(value) => value.get("title").and_then(Value::as_str),
        }
    }

    /// Children of a group; leaves have none.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Group { children, .. } => children,
            TreeNode::Leaf(_) => &[],
        }
    }

    /// Append a child to a group. Returns the child back if `self` is a leaf.
    pub fn push_child(&mut self, child: TreeNode) -> std::result::Result<(), TreeNode> {
        match self {
            TreeNode::Group { children, .. } => {
                children.push(child);
                Ok(())
            }
            TreeNode::Leaf(_) => Err(child),
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Group { children, .. } => children.iter().map(TreeNode::leaf_count).sum(),
            TreeNode::Leaf(_) => 1,
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Serialize a list of sibling nodes as a JSON array.
pub fn nodes_to_json(nodes: &[TreeNode]) -> Result<Value> {
    Ok(serde_json::to_value(nodes)?)
}
