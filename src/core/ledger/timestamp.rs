//! Sale timestamp conversion
//!
//! Sale dates arrive in UTC in the vendor's format and are reported in the
//! store's timezone as separate date and time cells.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Naive layouts accepted besides RFC 3339; interpreted as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Layout of a localized timestamp before it is split into cells
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date and time cells of a sale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleStamp {
    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM:SS`
    pub time: String,
}

impl SaleStamp {
    /// Convert a vendor timestamp into report cells for `tz`
    ///
    /// An absent timestamp yields empty cells. A timestamp that cannot be
    /// parsed is passed through unchanged as the date with an empty time.
    ///
    /// # Examples
    ///
    /// ```
    /// use salesledger::core::ledger::timestamp::SaleStamp;
    ///
    /// let stamp = SaleStamp::from_sale_date(
    ///     Some("2018-02-27T02:51:31+00:00"),
    ///     chrono_tz::Pacific::Auckland,
    /// );
    /// assert_eq!(stamp.date, "2018-02-27");
    /// assert_eq!(stamp.time, "15:51:31");
    /// ```
    pub fn from_sale_date(raw: Option<&str>, tz: Tz) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match parse_sale_date(raw) {
            Some(utc) => {
                let local = utc.with_timezone(&tz).format(LOCAL_FORMAT).to_string();
                split_timestamp(&local)
            }
            None => Self {
                date: raw.to_string(),
                time: String::new(),
            },
        }
    }
}

/// Parse a vendor timestamp as a UTC instant
pub fn parse_sale_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Split `YYYY-MM-DD HH:MM:SS` positionally into date and time cells
///
/// The first 10 characters are the date; the following 9 are the separator
/// and `HH:MM:SS`.
pub fn split_timestamp(formatted: &str) -> SaleStamp {
    let date = formatted.get(..10).unwrap_or(formatted);
    let time = formatted.get(10..19).unwrap_or_default().trim_start();

    SaleStamp {
        date: date.to_string(),
        time: time.to_string(),
    }
}
