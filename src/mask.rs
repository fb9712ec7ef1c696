//! Unit truncation for displayed time.
//!
//! Remaining time is first rendered as a canonical ISO-8601 timestamp counted
//! from the Unix epoch (`1970-01-01T00:00:05.000Z` for five seconds). A
//! [`Mask`] is a fixed window over that string which keeps only the units that
//! matter for the configured duration:
//!
//! | Total duration      | Mask                        | Window     | Example    |
//! |---------------------|-----------------------------|------------|------------|
//! | up to 59s           | [`Mask::Seconds`]           | `(17, 2)`  | `05`       |
//! | 60s to 3599s        | [`Mask::MinutesSeconds`]    | `(14, 5)`  | `01:05`    |
//! | 3600s and above     | [`Mask::HoursMinutesSeconds`] | `(11, 8)` | `01:00:05` |
//!
//! The mask is picked from the configured total, never from the shrinking
//! remainder, so the format keeps its width for the whole run.

use chrono::{DateTime, SecondsFormat, Utc};

/// Largest total (in seconds) still shown as seconds only.
pub const SECONDS_ONLY_MAX: f64 = 59.0;

/// Largest total (in seconds) still shown without hours.
pub const MINUTES_SECONDS_MAX: f64 = 3599.0;

/// Window into the canonical time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mask {
    /// `SS`
    Seconds,
    /// `MM:SS`
    MinutesSeconds,
    /// `HH:MM:SS`
    HoursMinutesSeconds,
}

impl Mask {
    /// Byte offset of the window in the canonical string.
    pub fn offset(self) -> usize {
        match self {
            Mask::Seconds => 17,
            Mask::MinutesSeconds => 14,
            Mask::HoursMinutesSeconds => 11,
        }
    }

    /// Length of the window in bytes.
    pub fn width(self) -> usize {
        match self {
            Mask::Seconds => 2,
            Mask::MinutesSeconds => 5,
            Mask::HoursMinutesSeconds => 8,
        }
    }

    /// Cuts the window out of a canonical time string.
    ///
    /// Returns the whole input if it is too short to hold the window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::mask::Mask;
    ///
    /// let canonical = "1970-01-01T01:02:05.000Z";
    /// assert_eq!(Mask::Seconds.apply(canonical), "05");
    /// assert_eq!(Mask::MinutesSeconds.apply(canonical), "02:05");
    /// assert_eq!(Mask::HoursMinutesSeconds.apply(canonical), "01:02:05");
    /// ```
    pub fn apply<'a>(self, canonical: &'a str) -> &'a str {
        let start = self.offset();
        canonical.get(start..start + self.width()).unwrap_or(canonical)
    }
}

/// Picks the mask for a configured total duration.
///
/// Returns `None` when masking is switched off, in which case the caller shows
/// a plain seconds count.
///
/// # Arguments
///
/// * `total_target_seconds` - Configured length of the run, not the remainder
/// * `show_mask` - Whether truncation is wanted at all
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::mask::{select, Mask};
///
/// assert_eq!(select(59.0, true), Some(Mask::Seconds));
/// assert_eq!(select(60.0, true), Some(Mask::MinutesSeconds));
/// assert_eq!(select(3600.0, true), Some(Mask::HoursMinutesSeconds));
/// assert_eq!(select(3600.0, false), None);
/// ```
pub fn select(total_target_seconds: f64, show_mask: bool) -> Option<Mask> {
    if !show_mask {
        None
    } else if total_target_seconds > MINUTES_SECONDS_MAX {
        Some(Mask::HoursMinutesSeconds)
    } else if total_target_seconds > SECONDS_ONLY_MAX {
        Some(Mask::MinutesSeconds)
    } else {
        Some(Mask::Seconds)
    }
}

/// Renders `seconds` after the epoch as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Hours wrap every 24h, exactly like the timestamp they come from. Returns
/// `None` when the instant lies outside the representable calendar range.
///
/// # Arguments
///
/// * `seconds` - Whole seconds after `1970-01-01T00:00:00Z`
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::mask::canonical_time;
///
/// assert_eq!(canonical_time(65).as_deref(), Some("1970-01-01T00:01:05.000Z"));
/// assert_eq!(canonical_time(u64::MAX), None);
/// ```
pub fn canonical_time(seconds: u64) -> Option<String> {
    let secs = i64::try_from(seconds).ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0).map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Formats whole seconds through an optional mask.
///
/// Durations too large for the canonical string are shown as a plain seconds
/// count, so a non-zero remainder never renders as zero.
///
/// # Arguments
///
/// * `seconds` - Whole seconds to display
/// * `mask` - Window to cut, or `None` for a plain seconds count
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::mask::{seconds_to_time, Mask};
///
/// assert_eq!(seconds_to_time(65, Some(Mask::MinutesSeconds)), "01:05");
/// assert_eq!(seconds_to_time(65, None), "65");
/// ```
pub fn seconds_to_time(seconds: u64, mask: Option<Mask>) -> String {
    match (mask, canonical_time(seconds)) {
        (Some(mask), Some(canonical)) => mask.apply(&canonical).to_string(),
        _ => seconds.to_string(),
    }
}
