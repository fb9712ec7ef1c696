//! Display text for a countdown.

use crate::mask::{seconds_to_time, Mask};

/// Default text shown once a countdown reaches zero.
pub const DEFAULT_END_TEXT: &str = "Time over";

/// Everything the formatter needs to know about one moment of a countdown.
#[derive(Debug, Clone, Copy)]
pub struct DisplayContext<'a> {
    /// Time left, in (possibly fractional) seconds.
    pub remaining_seconds: f64,
    /// Whether ticking is currently suspended.
    pub paused: bool,
    /// Whether the run has reached zero.
    pub completed: bool,
    /// Replacement text while paused, if any.
    pub paused_text: Option<&'a str>,
    /// Replacement text once time is up.
    pub end_text: &'a str,
    /// Unit window picked from the configured total.
    pub mask: Option<Mask>,
}

/// Rounds remaining time up to whole seconds.
///
/// A countdown never shows `0` while time is left, and never shows the value
/// a tick has just consumed.
pub fn ceil_seconds(remaining_seconds: f64) -> u64 {
    if remaining_seconds.is_nan() || remaining_seconds <= 0.0 {
        0
    } else {
        remaining_seconds.ceil() as u64
    }
}

/// Picks the text to display.
///
/// Paused text wins while paused and not completed. Otherwise the end text is
/// shown once nothing is left, and the masked remaining time before that.
///
/// ```rust
/// use bubbletea_countdown::format::{format_display, DisplayContext};
/// use bubbletea_countdown::mask::Mask;
///
/// let ctx = DisplayContext {
///     remaining_seconds: 4.01,
///     paused: false,
///     completed: false,
///     paused_text: None,
///     end_text: "Time over",
///     mask: Some(Mask::Seconds),
/// };
/// assert_eq!(format_display(&ctx), "05");
/// ```
pub fn format_display(ctx: &DisplayContext<'_>) -> String {
    if ctx.paused && !ctx.completed {
        if let Some(text) = ctx.paused_text {
            return text.to_string();
        }
    }

    let remaining = ceil_seconds(ctx.remaining_seconds);
    if remaining == 0 {
        return ctx.end_text.to_string();
    }

    seconds_to_time(remaining, ctx.mask)
}
