//! Tree configuration.
//!
//! Describes a level chain and its zone in a serializable form, so that a
//! tree layout can be kept in a JSON file next to the data it shapes.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::{parse_zone, Result, TimeField, TimeUnit};
use crate::tree::{LabelFormat, Level, LevelChain, TemporalTreeBuilder};

/// Configuration for a temporal tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Zone identifier used for binning.
    /// Default: "Z"
    #[serde(default = "default_zone")]
    pub zone: String,

    /// Levels from coarsest to finest.
    /// Default: day (96) → hour (240) → minute
    pub levels: Vec<LevelConfig>,
}

/// One level of a [`TreeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub unit: TimeUnit,
    pub field: TimeField,
    pub key: LabelFormat,
    pub title: LabelFormat,

    /// Split bins holding at least this many records. Absent means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_threshold: Option<usize>,
}

fn default_zone() -> String {
    "Z".to_string()
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            zone: default_zone(),
            levels: vec![
                LevelConfig {
                    unit: TimeUnit::Days,
                    field: TimeField::EpochDay,
                    key: LabelFormat::DayKey,
                    title: LabelFormat::DayTitle,
                    break_threshold: Some(96),
                },
                LevelConfig {
                    unit: TimeUnit::Hours,
                    field: TimeField::HourOfDay,
                    key: LabelFormat::HourKey,
                    title: LabelFormat::HourTitle,
                    break_threshold: Some(240),
                },
                LevelConfig {
                    unit: TimeUnit::Minutes,
                    field: TimeField::MinuteOfHour,
                    key: LabelFormat::MinuteKey,
                    title: LabelFormat::MinuteTitle,
                    break_threshold: None,
                },
            ],
        }
    }
}

impl TreeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn zone(&self) -> Result<Tz> {
        parse_zone(&self.zone)
    }

    /// Validate and compile the levels into a [`LevelChain`].
    pub fn build(&self) -> Result<LevelChain> {
        let levels = self
            .levels
            .iter()
            .map(LevelConfig::to_level)
            .collect::<Result<Vec<_>>>()?;
        LevelChain::new(levels)
    }

    pub fn builder(&self) -> Result<TemporalTreeBuilder> {
        Ok(TemporalTreeBuilder::new(self.zone()?).with_chain(self.build()?))
    }
}

impl LevelConfig {
    fn to_level(&self) -> Result<Level> {
        self.key.validate()?;
        self.title.validate()?;
        Ok(
            Level::new(self.unit, self.field, self.key.clone(), self.title.clone())
                .with_break_threshold(self.break_threshold.into()),
        )
    }
}
