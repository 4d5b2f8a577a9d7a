//! Key and title generation for tree levels.

use std::fmt::Write;

use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::binning::{next_hour, next_minute};
use crate::core::{zone_label, Error, Result, ZonedTime};

/// Turns a bin anchor into a key or title.
///
/// Implemented for any `Fn(&ZonedTime) -> String + Send + Sync`.
pub trait Labeler: Send + Sync {
    fn label(&self, anchor: &ZonedTime) -> String;
}

impl<F> Labeler for F
where
    F: Fn(&ZonedTime) -> String + Send + Sync,
{
    fn label(&self, anchor: &ZonedTime) -> String {
        self(anchor)
    }
}

/// Built-in label formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LabelFormat {
    /// `2024-05-30`
    DayKey,
    /// `Thu, May 30, 2024`
    DayTitle,
    /// `2024-05-30-13 EDT`
    HourKey,
    /// `01:00 - 01:59 PM EDT`
    HourTitle,
    /// `2024-05-30-13-45 EDT`
    MinuteKey,
    /// `01:45:00 - 01:45:59 PM EDT`
    MinuteTitle,
    /// chrono strftime pattern; `%Z` renders the zone label.
    Pattern { format: String },
}

impl LabelFormat {
    /// Reject patterns chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if let LabelFormat::Pattern { format } = self {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(Error::InvalidConfig(format!(
                    "invalid label pattern: {format:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Labeler for LabelFormat {
    fn label(&self, anchor: &ZonedTime) -> String {
        match self {
            LabelFormat::DayKey => anchor.format("%Y-%m-%d").to_string(),
            LabelFormat::DayTitle => anchor.format("%a, %b %-d, %Y").to_string(),
            LabelFormat::HourKey => {
                format!("{} {}", anchor.format("%Y-%m-%d-%H"), zone_label(anchor))
            }
            LabelFormat::HourTitle => {
                let end = next_hour(anchor)
                    .ok()
                    .and_then(|next| next.checked_sub_signed(TimeDelta::minutes(1)))
                    .unwrap_or(*anchor);
                hour_label(anchor, &end)
            }
            LabelFormat::MinuteKey => {
                format!("{} {}", anchor.format("%Y-%m-%d-%H-%M"), zone_label(anchor))
            }
            LabelFormat::MinuteTitle => {
                let end = next_minute(anchor)
                    .ok()
                    .and_then(|next| next.checked_sub_signed(TimeDelta::seconds(1)))
                    .unwrap_or(*anchor);
                minute_label(anchor, &end)
            }
            LabelFormat::Pattern { format } => {
                let zone = zone_label(anchor);
                let items: Vec<Item> = StrftimeItems::new(format)
                    .map(|item| match item {
                        Item::Fixed(Fixed::TimezoneName) => {
                            Item::OwnedLiteral(zone.clone().into_boxed_str())
                        }
                        other => other,
                    })
                    .collect();
                let mut out = String::new();
                if write!(out, "{}", anchor.format_with_items(items.iter())).is_err() {
                    log::warn!("label pattern {format:?} could not be rendered");
                    return format.clone();
                }
                out
            }
        }
    }
}

/// `hh:mm - hh:mm a z` for an hour range.
pub fn hour_label(start: &ZonedTime, end: &ZonedTime) -> String {
    format!(
        "{} - {} {}",
        start.format("%I:%M"),
        end.format("%I:%M %p"),
        zone_label(end)
    )
}

/// `hh:mm:ss - hh:mm:ss a z` for a minute range.
pub fn minute_label(start: &ZonedTime, end: &ZonedTime) -> String {
    format!(
        "{} - {} {}",
        start.format("%I:%M:%S"),
        end.format("%I:%M:%S %p"),
        zone_label(end)
    )
}
