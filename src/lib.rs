//! DST-aware time binning and bounded fan-out trees for lazily expanded views.
//!
//! Records sorted by timestamp are grouped into day/hour/minute buckets that
//! follow the local calendar of an IANA zone, including offset transitions
//! that do not land on an hour. Busy buckets are split with the next finer
//! level; sparse ones stay flat. Flat lists can be paged into an index tree
//! with roughly ten children per group.

pub mod binning;
pub mod config;
pub mod core;
#[cfg(feature = "cli")]
pub mod input;
pub mod tree;

pub use crate::config::{LevelConfig, TreeConfig};
pub use crate::core::{parse_zone, Error, Result, TimeField, TimeUnit, ZonedTime};
pub use crate::tree::{
    build_index_tree, build_index_tree_all, build_temporal_tree, LevelChain, TemporalTreeBuilder,
    TreeNode,
};
