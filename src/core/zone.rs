//! Zone identifiers and zone labels.

use chrono_tz::Tz;

use crate::core::unit::ZonedTime;
use crate::core::{Error, Result};

/// Name the tz database uses for the zero-offset zone spelled `Z`.
const ZULU: &str = "Zulu";

/// Parse a zone identifier.
///
/// Accepts any IANA name known to the bundled tz database (including
/// backward links such as `US/Eastern`) and the single letter `Z` for UTC.
pub fn parse_zone(id: &str) -> Result<Tz> {
    let id = id.trim();
    let name = if id.eq_ignore_ascii_case("z") { ZULU } else { id };
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownZone(id.to_string()))
}

/// Short zone label used in keys and titles, e.g. `EST`, `EDT` or `Z`.
///
/// Abbreviations come from the bundled tz database. Zones it gives no
/// letter abbreviation print their offset instead, so `Pacific/Chatham`
/// is labelled `+1345` rather than `CHADT`.
pub fn zone_label(at: &ZonedTime) -> String {
    if at.timezone().name() == ZULU {
        "Z".to_string()
    } else {
        at.format("%Z").to_string()
    }
}
