//! Tree building for lazily expanded views.
//!
//! # Temporal trees
//!
//! Records sorted by time are binned by day, and busy days are split into
//! hours, busy hours into minutes.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use temporal_tree::tree::{build_temporal_tree, TreeNode};
//! use temporal_tree::core::parse_zone;
//!
//! let start = 1_717_027_200_000_i64; // 2024-05-30T00:00Z
//! let records: Vec<i64> = (0..3).map(|i| start + i * 1_000).collect();
//! let nodes = build_temporal_tree(
//!     &records,
//!     |r| Utc.timestamp_millis_opt(*r).unwrap(),
//!     |r| Some(TreeNode::leaf(r.to_string(), r.to_string())),
//!     parse_zone("Z")?,
//!     None,
//! )?;
//! assert_eq!(nodes[0].key(), Some("2024-05-30"));
//! assert_eq!(nodes[0].children().len(), 3);
//! # Ok::<(), temporal_tree::Error>(())
//! ```
//!
//! # Index trees
//!
//! ```
//! use temporal_tree::tree::{build_index_tree_all, TreeNode};
//!
//! let records: Vec<String> = (0..1000).map(|i| i.to_string()).collect();
//! let root = build_index_tree_all(&records, |r| Some(TreeNode::leaf(r.as_str(), r.as_str())));
//! assert_eq!(root.key(), Some("0-999"));
//! assert_eq!(root.children().len(), 10);
//! ```

mod builder;
mod label;
mod level;
mod node;

pub use builder::{
    build_index_tree, build_index_tree_all, build_temporal_tree, TemporalTreeBuilder,
};
pub use label::{hour_label, minute_label, LabelFormat, Labeler};
pub use level::{BreakThreshold, Level, LevelChain};
pub use node::{nodes_to_json, TreeNode};
