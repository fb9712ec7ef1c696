#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A tick-driven countdown component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! [![Crates.io](https://img.shields.io/crates/v/bubbletea-countdown.svg)](https://crates.io/crates/bubbletea-countdown)
//! [![Documentation](https://docs.rs/bubbletea-countdown/badge.svg)](https://docs.rs/bubbletea-countdown)
//! [![License](https://img.shields.io/badge/license-MIT-blue.svg)](https://opensource.org/licenses/MIT)
//!
//! ## Overview
//!
//! The countdown follows the Elm Architecture like every bubbletea-rs
//! component: `init()` starts it, `update()` consumes messages and `view()`
//! renders it. Underneath sits a small engine that stays consistent while
//! three things change at once: elapsed ticks, the pause flag and the target
//! duration. After every update it exposes one [`Frame`] with the remaining
//! seconds, the fraction of time left and the display text.
//!
//! ## Features
//!
//! - **Fixed 100ms ticks** with stale-tick rejection, so restarts and pauses
//!   never double-count time
//! - **Live re-targeting**: changing the duration shifts the remaining time by
//!   the same amount instead of starting over
//! - **Pause and resume** without losing or skipping a tick
//! - **Masked display**: `SS`, `MM:SS` or `HH:MM:SS` picked from the total
//! - **Single completion**: the hook and [`CompleteMsg`] fire once per run
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`tick`] | Tick messages and the single live subscription |
//! | [`countdown`] | The countdown state machine and bubbletea-rs model |
//! | [`duration`] | Target duration normalization and reconciliation |
//! | [`progress`] | Fraction of time left and ring offsets |
//! | [`mask`] | Unit windows over the canonical time string |
//! | [`format`] | Display text rules |
//! | [`config`] | Serializable settings |
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//!
//! let mut countdown = countdown_new(65.0, &[with_end_text("Time over")]);
//! let _cmd = countdown.init();
//!
//! for _ in 0..650 {
//!     let tick = countdown.tick_msg();
//!     countdown.update(Box::new(tick));
//! }
//!
//! let frame = countdown.frame();
//! assert_eq!(frame.display_text, "Time over");
//! assert_eq!(frame.progress_fraction, 0.0);
//! assert_eq!(countdown.phase(), Phase::Completed);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = countdown_new(30.0, &[with_paused_text("Paused")]);
//!         let cmd = countdown.init();
//!         (Self { countdown }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod config;
pub mod countdown;
pub mod duration;
pub mod format;
pub mod mask;
pub mod progress;
pub mod tick;

pub use config::{ConfigError, CountdownConfig};
pub use countdown::{
    from_config, new as countdown_new, start_paused, with_end_text, with_paused_text, with_style,
    without_mask, CompleteMsg, CountdownOption, Frame, Model as Countdown, OnComplete, Phase,
    PauseMsg, RestartMsg,
};
pub use mask::Mask;
pub use tick::{TickMsg, TICK_INTERVAL};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let countdown = countdown_new(10.0, &[without_mask()]);
/// assert_eq!(countdown.display_text(), "10");
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, CountdownConfig};
    pub use crate::countdown::{
        from_config, new as countdown_new, start_paused, with_end_text, with_paused_text,
        with_style, without_mask, CompleteMsg, CountdownOption, Frame, Model as Countdown, Phase,
        PauseMsg, RestartMsg,
    };
    pub use crate::mask::Mask;
    pub use crate::progress::stroke_offset;
    pub use crate::tick::{TickMsg, TICK_INTERVAL};
}
