//! URL and timestamp decomposition for bookmark leaves.
//!
//! Field conventions follow the browser `URL` and `Date` interfaces so the
//! records look the same as those a browser extension would receive: the
//! protocol keeps its colon, absent search/hash are empty strings, default
//! ports are omitted, and months are zero-based.

use crate::domain::error::{Result, ZmarksError};
use crate::domain::{TimeParts, UrlParts};
use chrono::{DateTime, Datelike, Timelike, Utc};
use url::Url;

/// Milliseconds between 1601-01-01 (Chromium's epoch) and 1970-01-01.
const CHROMIUM_EPOCH_OFFSET_MS: i64 = 11_644_473_600_000;

/// Converts a Chromium timestamp (microseconds since 1601-01-01 UTC) to
/// milliseconds since the Unix epoch.
///
/// ```
/// use zmarks::source::chromium_time_to_unix_ms;
///
/// assert_eq!(chromium_time_to_unix_ms(11_644_473_600_000_000), 0);
/// assert_eq!(chromium_time_to_unix_ms(13_300_000_000_123_456), 1_655_526_400_123);
/// ```
#[must_use]
pub const fn chromium_time_to_unix_ms(micros: i64) -> i64 {
    micros / 1_000 - CHROMIUM_EPOCH_OFFSET_MS
}

/// Parses `raw` and splits it into its components.
///
/// # Errors
///
/// Returns [`ZmarksError::InvalidUrl`] if `raw` is not an absolute URL.
///
/// ```
/// use zmarks::source::url_parts;
///
/// let parts = url_parts("https://user:pw@www.example.com:8443/a/b?q=rust&x=1#top")?;
/// assert_eq!(parts.protocol, "https:");
/// assert_eq!(parts.host, "www.example.com:8443");
/// assert_eq!(parts.search, "?q=rust&x=1");
/// assert_eq!(parts.search_params[0], ("q".to_string(), "rust".to_string()));
/// # Ok::<(), zmarks::ZmarksError>(())
/// ```
pub fn url_parts(raw: &str) -> Result<UrlParts> {
    let url = Url::parse(raw).map_err(|source| ZmarksError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    let hostname = url.host_str().unwrap_or_default().to_string();
    let port = url.port().map(|p| p.to_string()).unwrap_or_default();
    let host = if port.is_empty() {
        hostname.clone()
    } else {
        format!("{hostname}:{port}")
    };

    Ok(UrlParts {
        protocol: format!("{}:", url.scheme()),
        host,
        hostname,
        port,
        pathname: url.path().to_string(),
        search: prefixed('?', url.query()),
        hash: prefixed('#', url.fragment()),
        username: url.username().to_string(),
        password: url.password().unwrap_or_default().to_string(),
        origin: url.origin().ascii_serialization(),
        search_params: url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect(),
    })
}

/// `?query` / `#fragment`, or empty when the component is absent or empty.
fn prefixed(marker: char, component: Option<&str>) -> String {
    match component {
        Some(value) if !value.is_empty() => format!("{marker}{value}"),
        _ => String::new(),
    }
}

/// Splits a Unix millisecond timestamp into UTC calendar fields.
///
/// Timestamps outside chrono's representable range yield all-zero fields.
///
/// ```
/// use zmarks::source::time_parts;
///
/// let parts = time_parts(1_700_000_000_123);
/// assert_eq!((parts.year, parts.month, parts.date), (2023, 10, 14));
/// assert_eq!(parts.day, 2);
/// assert_eq!(parts.millisecond, 123);
/// ```
#[must_use]
pub fn time_parts(unix_ms: i64) -> TimeParts {
    let Some(time) = DateTime::<Utc>::from_timestamp_millis(unix_ms) else {
        tracing::debug!(unix_ms, "timestamp out of range");
        return TimeParts::default();
    };

    TimeParts {
        year: time.year(),
        month: time.month0(),
        date: time.day(),
        day: time.weekday().num_days_from_sunday(),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
        millisecond: time.timestamp_subsec_millis(),
    }
}
