//! DST-aware time binning.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use temporal_tree::binning::Binner;
//! use temporal_tree::core::{parse_zone, TimeField, TimeUnit};
//!
//! let start = Utc.timestamp_millis_opt(1_717_027_200_000).unwrap();
//! let end = Utc.timestamp_millis_opt(1_717_030_799_000).unwrap();
//! let binner = Binner::new(TimeUnit::Minutes, TimeField::MinuteOfHour, start, end, parse_zone("Z")?)?;
//! assert_eq!(binner.bins().len(), 60);
//!
//! let records = vec![start, end];
//! let placed = binner.place_records(&records, |r| *r);
//! assert_eq!(placed[0].len(), 1);
//! assert_eq!(placed[59].len(), 1);
//! # Ok::<(), temporal_tree::Error>(())
//! ```

mod binner;
mod boundary;

pub use binner::{Binner, TemporalBin};
pub use boundary::{
    next_boundary, next_day, next_hour, next_millisecond, next_minute, next_month, next_second,
    next_year,
};
