//! Time primitives shared by the binning and tree layers.
//!
//! Zoned timestamps, units and fields, local-calendar arithmetic and the
//! crate error type live here.

pub mod error;
pub mod unit;
pub mod zone;

pub use error::{Error, Result};
pub use unit::{truncate, zoned_from_millis, TimeField, TimeUnit, ZonedTime};
pub use zone::{parse_zone, zone_label};
