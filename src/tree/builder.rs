//! Tree construction.
//!
//! Two modes share the [`TreeNode`] output type:
//!
//! - **Index mode** pages a flat list into groups of at most ~10 children,
//!   with up to 101 leaves per page, regardless of list size.
//! - **Temporal mode** bins sorted records by the first level of a
//!   [`LevelChain`] and only splits a bin with the next level once it holds
//!   enough records to reach the level's break threshold.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::binning::Binner;
use crate::core::{parse_zone, Result};
use crate::tree::level::LevelChain;
use crate::tree::node::TreeNode;

/// Widest index range emitted as direct leaves.
const INDEX_PAGE_SPAN: i64 = 100;
/// Target fan-out of index groups.
const INDEX_FAN_OUT: i64 = 10;

/// Build an index tree over `records[start_idx..=end_idx]`.
///
/// The node is keyed and titled `"{start_idx}-{max(end_idx, 0)}"`. Spans of
/// at most 100 become direct leaves; wider spans are split into sub-ranges of
/// `factor` records, where `factor` is the smallest power of ten (≥ 10) that
/// keeps the child count near ten. Leaves for which `leaf_of` returns `None`
/// are left out.
pub fn build_index_tree<R, L>(
    records: &[R],
    leaf_of: L,
    start_idx: i64,
    end_idx: i64,
) -> TreeNode
where
    L: Fn(&R) -> Option<TreeNode>,
{
    index_node(records, &leaf_of, start_idx, end_idx)
}

/// Build an index tree over the whole list.
pub fn build_index_tree_all<R, L>(records: &[R], leaf_of: L) -> TreeNode
where
    L: Fn(&R) -> Option<TreeNode>,
{
    let end_idx = records.len() as i64 - 1;
    index_node(records, &leaf_of, 0, end_idx)
}

fn index_node<R, L>(records: &[R], leaf_of: &L, start: i64, end: i64) -> TreeNode
where
    L: Fn(&R) -> Option<TreeNode>,
{
    let key = format!("{start}-{}", end.max(0));
    let len = records.len() as i64;

    let children = if end - start <= INDEX_PAGE_SPAN {
        let first = start.max(0);
        let last = end.min(len - 1);
        (first..=last)
            .filter_map(|i| leaf_of(&records[i as usize]))
            .collect()
    } else {
        let mut factor = INDEX_FAN_OUT;
        while (end - start) / factor > INDEX_FAN_OUT {
            factor *= INDEX_FAN_OUT;
        }
        (start..len.min(end))
            .step_by(factor as usize)
            .map(|i| index_node(records, leaf_of, i, (len - 1).min(i + factor - 1)))
            .collect()
    };

    TreeNode::group_with_children(key.clone(), key, children)
}

/// Build the top level of a temporal tree.
///
/// `records` must be sorted ascending by `timestamp_of`. The covered range
/// runs from the first record's timestamp to the last one's. Each non-empty
/// bin becomes a group keyed and titled by its level; its children are
/// either leaves, in record order, or the groups of the next level when the
/// bin reached the level's break threshold. Uses
/// [`LevelChain::default_chain`] when `chain` is `None`.
pub fn build_temporal_tree<R, T, L>(
    records: &[R],
    timestamp_of: T,
    leaf_of: L,
    tz: Tz,
    chain: Option<&LevelChain>,
) -> Result<Vec<TreeNode>>
where
    T: Fn(&R) -> DateTime<Utc>,
    L: Fn(&R) -> Option<TreeNode>,
{
    let chain = chain.unwrap_or_else(|| LevelChain::default_chain());
    let records: Vec<&R> = records.iter().collect();
    temporal_level(&records, &timestamp_of, &leaf_of, tz, chain, 0)
}

fn temporal_level<R, T, L>(
    records: &[&R],
    timestamp_of: &T,
    leaf_of: &L,
    tz: Tz,
    chain: &LevelChain,
    depth: usize,
) -> Result<Vec<TreeNode>>
where
    T: Fn(&R) -> DateTime<Utc>,
    L: Fn(&R) -> Option<TreeNode>,
{
    let (Some(level), Some(&first), Some(&last)) =
        (chain.level(depth), records.first(), records.last())
    else {
        return Ok(Vec::new());
    };

    let binner = Binner::new(
        level.unit(),
        level.field(),
        timestamp_of(first),
        timestamp_of(last),
        tz,
    )?;
    let placed = binner.place_records(records.iter().copied(), timestamp_of);
    let has_next = depth + 1 < chain.len();

    let mut nodes = Vec::new();
    for (bin, bucket) in binner.bins().iter().zip(placed) {
        if bucket.is_empty() {
            continue;
        }

        let key = level.key_for(&bin.anchor);
        let title = level.title_for(&bin.anchor);
        let children = if level.break_threshold().is_reached(bucket.len()) && has_next {
            log::debug!(
                "splitting {key} ({} records) at depth {}",
                bucket.len(),
                depth + 1
            );
            temporal_level(&bucket, timestamp_of, leaf_of, tz, chain, depth + 1)?
        } else {
            bucket
                .iter()
                .copied()
                .filter_map(|record| leaf_of(record))
                .collect()
        };
        nodes.push(TreeNode::group_with_children(key, title, children));
    }
    Ok(nodes)
}

/// Zone and level chain bundled for repeated temporal builds.
#[derive(Debug, Clone)]
pub struct TemporalTreeBuilder {
    tz: Tz,
    chain: LevelChain,
}

impl TemporalTreeBuilder {
    /// Builder using the default chain.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            chain: LevelChain::default(),
        }
    }

    /// Builder for a zone identifier such as `US/Eastern` or `Z`.
    pub fn for_zone(zone: &str) -> Result<Self> {
        Ok(Self::new(parse_zone(zone)?))
    }

    pub fn with_chain(mut self, chain: LevelChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn zone(&self) -> Tz {
        self.tz
    }

    pub fn chain(&self) -> &LevelChain {
        &self.chain
    }

    pub fn build<R, T, L>(
        &self,
        records: &[R],
        timestamp_of: T,
        leaf_of: L,
    ) -> Result<Vec<TreeNode>>
    where
        T: Fn(&R) -> DateTime<Utc>,
        L: Fn(&R) -> Option<TreeNode>,
    {
        build_temporal_tree(records, timestamp_of, leaf_of, self.tz, Some(&self.chain))
    }
}
