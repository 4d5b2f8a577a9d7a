//! Bin layout and record placement.
//!
//! A [`Binner`] lays out contiguous bins over an inclusive time range and
//! then places pre-sorted records into them in one forward pass. The bins
//! themselves are immutable; placement returns a separate buffer per bin.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::binning::boundary::next_boundary;
use crate::core::{truncate, Result, TimeField, TimeUnit, ZonedTime};

/// Half-open interval `[start_ms, end_ms)` anchored at its local start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalBin {
    pub unit: TimeUnit,
    /// Bin start in the binning zone.
    pub anchor: ZonedTime,
    /// Value of the binning field at `anchor`.
    pub value: i64,
    /// Inclusive start, epoch milliseconds.
    pub start_ms: i64,
    /// Exclusive end, epoch milliseconds.
    pub end_ms: i64,
}

impl TemporalBin {
    pub fn contains(&self, epoch_ms: i64) -> bool {
        epoch_ms >= self.start_ms && epoch_ms < self.end_ms
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Contiguous bins covering a time range.
#[derive(Debug, Clone)]
pub struct Binner {
    unit: TimeUnit,
    field: TimeField,
    bins: Vec<TemporalBin>,
}

impl Binner {
    /// Lay out bins from the `unit` containing `start` up to and including
    /// the bin containing `end`.
    ///
    /// `end` always gets its own bin, even when it falls exactly on a
    /// boundary. A `start` after `end` produces no bins.
    pub fn new(
        unit: TimeUnit,
        field: TimeField,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Self> {
        let end_ms = end.timestamp_millis();
        let mut current = truncate(&start.with_timezone(&tz), unit)?;
        let mut bins = Vec::new();

        while current.timestamp_millis() <= end_ms {
            let next = next_boundary(unit, field, &current)?;
            bins.push(TemporalBin {
                unit,
                anchor: current,
                value: field.value_of(&current),
                start_ms: current.timestamp_millis(),
                end_ms: next.timestamp_millis(),
            });
            current = next;
        }

        log::debug!(
            "laid out {} {unit} bins over [{start}, {end}] in {}",
            bins.len(),
            tz.name()
        );
        Ok(Self { unit, field, bins })
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn field(&self) -> TimeField {
        self.field
    }

    pub fn bins(&self) -> &[TemporalBin] {
        &self.bins
    }

    pub fn into_bins(self) -> Vec<TemporalBin> {
        self.bins
    }

    /// Assign records to bins.
    ///
    /// Records must be sorted ascending by `timestamp_of`; this is not
    /// checked and unsorted input yields wrong assignments. The cursor only
    /// moves forward. Records before the first bin or at/after the end of
    /// the last bin are dropped.
    ///
    /// Returns one buffer per bin, index-aligned with [`Binner::bins`].
    pub fn place_records<'a, R, F>(
        &self,
        records: impl IntoIterator<Item = &'a R>,
        timestamp_of: F,
    ) -> Vec<Vec<&'a R>>
    where
        R: 'a,
        F: Fn(&R) -> DateTime<Utc>,
    {
        let mut placed: Vec<Vec<&'a R>> = vec![Vec::new(); self.bins.len()];
        let Some(last) = self.bins.len().checked_sub(1) else {
            return placed;
        };

        let mut cursor = 0;
        let mut dropped = 0usize;
        for record in records {
            let ts = timestamp_of(record).timestamp_millis();
            while ts >= self.bins[cursor].end_ms && cursor < last {
                cursor += 1;
            }
            if self.bins[cursor].contains(ts) {
                placed[cursor].push(record);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            log::debug!("{dropped} records fell outside the {} bin range", self.unit);
        }
        placed
    }
}
