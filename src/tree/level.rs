//! Level configuration chain.
//!
//! A [`LevelChain`] lists binning policies from the coarsest level to the
//! finest. The temporal builder starts at depth zero and only descends into
//! the next level when a bin reaches its level's break threshold.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, TimeField, TimeUnit, ZonedTime};
use crate::tree::label::{LabelFormat, Labeler};

/// Record count at which a bin is split using the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakThreshold {
    Never,
    AtLeast(usize),
}

impl BreakThreshold {
    pub fn is_reached(&self, count: usize) -> bool {
        match self {
            BreakThreshold::Never => false,
            BreakThreshold::AtLeast(limit) => count >= *limit,
        }
    }
}

impl From<Option<usize>> for BreakThreshold {
    fn from(value: Option<usize>) -> Self {
        value.map_or(BreakThreshold::Never, BreakThreshold::AtLeast)
    }
}

/// One binning policy.
#[derive(Clone)]
pub struct Level {
    unit: TimeUnit,
    field: TimeField,
    key: Arc<dyn Labeler>,
    title: Arc<dyn Labeler>,
    break_threshold: BreakThreshold,
}

impl Level {
    /// Create a level that never breaks.
    pub fn new(
        unit: TimeUnit,
        field: TimeField,
        key: impl Labeler + 'static,
        title: impl Labeler + 'static,
    ) -> Self {
        Self {
            unit,
            field,
            key: Arc::new(key),
            title: Arc::new(title),
            break_threshold: BreakThreshold::Never,
        }
    }

    /// Split bins holding at least `threshold` records.
    pub fn break_at(mut self, threshold: usize) -> Self {
        self.break_threshold = BreakThreshold::AtLeast(threshold);
        self
    }

    pub fn with_break_threshold(mut self, threshold: BreakThreshold) -> Self {
        self.break_threshold = threshold;
        self
    }

    /// Days keyed `yyyy-MM-dd`, titled `EEE, MMM d, yyyy`.
    pub fn day() -> Self {
        Self::new(
            TimeUnit::Days,
            TimeField::EpochDay,
            LabelFormat::DayKey,
            LabelFormat::DayTitle,
        )
    }

    /// Hours keyed `yyyy-MM-dd-HH z`, titled `hh:mm - hh:mm a z`.
    pub fn hour() -> Self {
        Self::new(
            TimeUnit::Hours,
            TimeField::HourOfDay,
            LabelFormat::HourKey,
            LabelFormat::HourTitle,
        )
    }

    /// Minutes keyed `yyyy-MM-dd-HH-mm z`, titled `hh:mm:ss - hh:mm:ss a z`.
    pub fn minute() -> Self {
        Self::new(
            TimeUnit::Minutes,
            TimeField::MinuteOfHour,
            LabelFormat::MinuteKey,
            LabelFormat::MinuteTitle,
        )
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn field(&self) -> TimeField {
        self.field
    }

    pub fn break_threshold(&self) -> BreakThreshold {
        self.break_threshold
    }

    pub fn key_for(&self, anchor: &ZonedTime) -> String {
        self.key.label(anchor)
    }

    pub fn title_for(&self, anchor: &ZonedTime) -> String {
        self.title.label(anchor)
    }

    fn validate(&self) -> Result<()> {
        if self.break_threshold == BreakThreshold::AtLeast(0) {
            return Err(Error::InvalidConfig(format!(
                "{} level has a zero break threshold",
                self.unit
            )));
        }
        match self.unit {
            TimeUnit::Nanos | TimeUnit::Micros | TimeUnit::Weeks => {
                Err(Error::UnsupportedUnit(self.unit))
            }
            unit if unit.is_calendar_based() && !self.field.advances_with(unit) => {
                Err(Error::IncompatibleField {
                    unit,
                    field: self.field,
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("unit", &self.unit)
            .field("field", &self.field)
            .field("break_threshold", &self.break_threshold)
            .finish_non_exhaustive()
    }
}

/// Ordered binning levels, coarsest first.
#[derive(Debug, Clone)]
pub struct LevelChain {
    levels: Vec<Level>,
}

impl LevelChain {
    /// Build a chain, rejecting empty chains and units the boundary
    /// calculator cannot step.
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::InvalidConfig("level chain has no levels".to_string()));
        }
        for level in &levels {
            level.validate()?;
        }
        if let Some(last) = levels.last() {
            if last.break_threshold != BreakThreshold::Never {
                log::warn!(
                    "last level ({}) has a break threshold but no level to break into",
                    last.unit
                );
            }
        }
        Ok(Self { levels })
    }

    /// Shared default chain: day (breaks at 96) → hour (breaks at 240) →
    /// minute.
    pub fn default_chain() -> &'static LevelChain {
        static DEFAULT: OnceLock<LevelChain> = OnceLock::new();
        DEFAULT.get_or_init(|| LevelChain {
            levels: vec![
                Level::day().break_at(96),
                Level::hour().break_at(240),
                Level::minute(),
            ],
        })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, depth: usize) -> Option<&Level> {
        self.levels.get(depth)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelChain {
    fn default() -> Self {
        Self::default_chain().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_threshold() {
        assert!(!BreakThreshold::Never.is_reached(usize::MAX));
        assert!(!BreakThreshold::AtLeast(96).is_reached(95));
        assert!(BreakThreshold::AtLeast(96).is_reached(96));
        assert_eq!(BreakThreshold::from(None), BreakThreshold::Never);
        assert_eq!(BreakThreshold::from(Some(3)), BreakThreshold::AtLeast(3));
    }

    #[test]
    fn test_default_chain_shape() {
        let chain = LevelChain::default_chain();
        let shape: Vec<_> = chain
            .levels()
            .iter()
            .map(|l| (l.unit(), l.field(), l.break_threshold()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (TimeUnit::Days, TimeField::EpochDay, BreakThreshold::AtLeast(96)),
                (TimeUnit::Hours, TimeField::HourOfDay, BreakThreshold::AtLeast(240)),
                (TimeUnit::Minutes, TimeField::MinuteOfHour, BreakThreshold::Never),
            ]
        );
        assert!(std::ptr::eq(chain, LevelChain::default_chain()));
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(matches!(LevelChain::new(Vec::new()), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_chain_rejects_unsteppable_levels() {
        let weeks = Level::new(
            TimeUnit::Weeks,
            TimeField::EpochDay,
            LabelFormat::DayKey,
            LabelFormat::DayTitle,
        );
        assert!(matches!(
            LevelChain::new(vec![weeks]),
            Err(Error::UnsupportedUnit(TimeUnit::Weeks))
        ));

        let months_by_day = Level::new(
            TimeUnit::Months,
            TimeField::DayOfMonth,
            LabelFormat::DayKey,
            LabelFormat::DayTitle,
        );
        assert!(matches!(
            LevelChain::new(vec![months_by_day]),
            Err(Error::IncompatibleField { .. })
        ));
    }

    #[test]
    fn test_zero_break_threshold_rejected() {
        assert!(matches!(
            LevelChain::new(vec![Level::day().break_at(0), Level::hour()]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(LevelChain::new(vec![Level::day().break_at(1), Level::hour()]).is_ok());
    }

    #[test]
    fn test_custom_labelers() {
        let level = Level::new(
            TimeUnit::Hours,
            TimeField::HourOfDay,
            |at: &ZonedTime| at.format("%H").to_string(),
            |_: &ZonedTime| "hour".to_string(),
        );
        let zone = crate::core::parse_zone("Z").unwrap();
        let at = crate::core::zoned_from_millis(1_717_074_000_000, zone).unwrap();
        assert_eq!(level.key_for(&at), "13");
        assert_eq!(level.title_for(&at), "hour");
    }
}
