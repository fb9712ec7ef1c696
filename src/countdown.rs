//! Countdown component for Bubble Tea applications.
//!
//! The countdown ticks down from a target duration in steps of
//! [`TICK_INTERVAL`](crate::tick::TICK_INTERVAL), can be paused and resumed,
//! restarted at any time, and re-targeted while it runs. After every update it
//! exposes one consistent [`Frame`]: remaining seconds, the fraction of time
//! left, and the text to display.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, with_end_text, with_paused_text};
//!
//! let mut countdown = new(90.0, &[with_paused_text("Paused"), with_end_text("Done")]);
//! let _cmd = countdown.init();
//! assert_eq!(countdown.display_text(), "01:30");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bubbletea_countdown::countdown::{new, CompleteMsg, Model};
//!
//! struct MyApp {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new(10.0, &[]);
//!         let cmd = countdown.init();
//!         (Self { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(complete) = msg.downcast_ref::<CompleteMsg>() {
//!             if complete.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Remaining: {}", self.countdown.view())
//!     }
//! }
//! ```
//!
//! # Changing the duration
//!
//! A new target shifts the remaining time by the difference instead of
//! starting over:
//!
//! ```rust
//! use bubbletea_countdown::countdown::new;
//!
//! let mut countdown = new(10.0, &[]);
//! let _ = countdown.init();
//! for _ in 0..20 {
//!     let tick = countdown.tick_msg();
//!     countdown.update(Box::new(tick));
//! }
//! assert_eq!(countdown.remaining_seconds(), 8.0);
//!
//! let _ = countdown.set_target_seconds(20.0);
//! assert_eq!(countdown.remaining_seconds(), 18.0);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use log::{debug, info, trace};
use std::fmt;
use std::time::Duration;

use crate::config::CountdownConfig;
use crate::duration::Controller;
use crate::format::{format_display, DisplayContext, DEFAULT_END_TEXT};
use crate::mask::{select as select_mask, Mask};
use crate::progress;
use crate::tick::{Subscription, TickMsg, TICKS_PER_SECOND};

/// Message that pauses or resumes a countdown.
///
/// Build it with [`Model::pause_cmd`] or [`Model::resume_cmd`]. An `id` of `0`
/// addresses every countdown.
#[derive(Debug, Clone)]
pub struct PauseMsg {
    /// Countdown this message targets.
    pub id: i64,
    paused: bool,
}

/// Message that restarts a countdown from its full duration.
#[derive(Debug, Clone)]
pub struct RestartMsg {
    /// Countdown this message targets. `0` addresses every countdown.
    pub id: i64,
}

/// Message sent once when a countdown reaches zero.
#[derive(Debug, Clone)]
pub struct CompleteMsg {
    /// Countdown that completed.
    pub id: i64,
}

/// Lifecycle position of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not started yet.
    Idle,
    /// Consuming ticks.
    Running,
    /// Started but suspended; ticks are not consumed.
    Paused,
    /// Reached zero. Only a restart or a longer target leaves this phase.
    Completed,
}

/// What a renderer needs after each update.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Time left in seconds, at tick precision.
    pub remaining_seconds: f64,
    /// Fraction of the run still left, in `[0, 1]`.
    pub progress_fraction: f64,
    /// Text to show for the current state.
    pub display_text: String,
}

/// Completion hook.
pub type OnComplete = Box<dyn FnMut() + Send>;

/// Construction options for [`new`].
#[derive(Debug, Clone)]
pub enum CountdownOption {
    /// Text shown instead of the time while paused.
    WithPausedText(String),
    /// Text shown once time is up.
    WithEndText(String),
    /// Show a plain seconds count instead of a masked clock.
    WithoutMask,
    /// Start suspended.
    StartPaused,
    /// Style used by [`Model::view`].
    WithStyle(Box<Style>),
}

impl CountdownOption {
    fn apply(&self, m: &mut Model) {
        match self {
            CountdownOption::WithPausedText(text) => m.paused_text = Some(text.clone()),
            CountdownOption::WithEndText(text) => m.end_text = text.clone(),
            CountdownOption::WithoutMask => m.set_show_mask(false),
            CountdownOption::StartPaused => m.paused = true,
            CountdownOption::WithStyle(style) => m.style = style.as_ref().clone(),
        }
    }
}

/// Shows `text` instead of the time while paused.
///
/// # Arguments
///
/// * `text` - Replacement text, shown verbatim while paused and not completed
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, start_paused, with_paused_text};
///
/// let countdown = new(30.0, &[with_paused_text("Paused"), start_paused()]);
/// assert_eq!(countdown.display_text(), "Paused");
/// ```
pub fn with_paused_text(text: impl Into<String>) -> CountdownOption {
    CountdownOption::WithPausedText(text.into())
}

/// Shows `text` once the countdown reaches zero.
///
/// Defaults to `"Time over"`.
pub fn with_end_text(text: impl Into<String>) -> CountdownOption {
    CountdownOption::WithEndText(text.into())
}

/// Displays remaining time as a plain seconds count.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, without_mask};
///
/// let countdown = new(125.0, &[without_mask()]);
/// assert_eq!(countdown.mask(), None);
/// assert_eq!(countdown.display_text(), "125");
/// ```
pub fn without_mask() -> CountdownOption {
    CountdownOption::WithoutMask
}

/// Creates the countdown in the paused state.
pub fn start_paused() -> CountdownOption {
    CountdownOption::StartPaused
}

/// Renders the display text with `style`.
pub fn with_style(style: Style) -> CountdownOption {
    CountdownOption::WithStyle(Box::new(style))
}

/// Tick-driven countdown engine.
///
/// Owns its remaining time, pause flag, tick subscription and target
/// duration. Nothing is shared between instances.
pub struct Model {
    /// Style applied by [`view`](Self::view).
    pub style: Style,
    controller: Controller,
    subscription: Subscription,
    remaining_ticks: u64,
    total_ticks: u64,
    paused: bool,
    started: bool,
    completed: bool,
    torn_down: bool,
    show_mask: bool,
    mask: Option<Mask>,
    paused_text: Option<String>,
    end_text: String,
    on_complete: Option<OnComplete>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.subscription.id())
            .field("tag", &self.subscription.tag())
            .field("remaining_ticks", &self.remaining_ticks)
            .field("total_ticks", &self.total_ticks)
            .field("phase", &self.phase())
            .field("show_mask", &self.show_mask)
            .field("paused_text", &self.paused_text)
            .field("end_text", &self.end_text)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Creates a countdown of `target_seconds` with the given options.
///
/// Durations below one second are treated as one second. The countdown stays
/// [`Phase::Idle`] until [`Model::init`] is called.
///
/// # Arguments
///
/// * `target_seconds` - Length of a full run, in seconds
/// * `opts` - Options applied in order; later options win
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, with_end_text, Phase};
///
/// let countdown = new(3600.0, &[with_end_text("Done")]);
/// assert_eq!(countdown.phase(), Phase::Idle);
/// assert_eq!(countdown.total_ticks(), 36_000);
/// assert_eq!(countdown.display_text(), "01:00:00");
///
/// let clamped = new(-4.0, &[]);
/// assert_eq!(clamped.target_seconds(), 1.0);
/// ```
pub fn new(target_seconds: f64, opts: &[CountdownOption]) -> Model {
    let controller = Controller::new(target_seconds);
    let total_ticks = controller.total_ticks();
    let mut m = Model {
        style: Style::new(),
        mask: select_mask(controller.target_seconds(), true),
        controller,
        subscription: Subscription::new(),
        remaining_ticks: total_ticks,
        total_ticks,
        paused: false,
        started: false,
        completed: false,
        torn_down: false,
        show_mask: true,
        paused_text: None,
        end_text: DEFAULT_END_TEXT.to_string(),
        on_complete: None,
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

/// Creates a countdown from serialized settings.
///
/// # Arguments
///
/// * `config` - Settings, typically loaded with [`CountdownConfig::from_json`]
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::config::CountdownConfig;
/// use bubbletea_countdown::countdown::from_config;
///
/// let config = CountdownConfig::from_json(r#"{ "target_seconds": 45, "show_mask": false }"#).unwrap();
/// let countdown = from_config(&config);
/// assert_eq!(countdown.display_text(), "45");
/// ```
pub fn from_config(config: &CountdownConfig) -> Model {
    let mut opts = vec![with_end_text(config.end_text.clone())];
    if let Some(text) = &config.paused_text {
        opts.push(with_paused_text(text.clone()));
    }
    if !config.show_mask {
        opts.push(without_mask());
    }
    if config.paused {
        opts.push(start_paused());
    }
    new(config.target_seconds, &opts)
}

impl Model {
    /// Sets the hook fired once each time the countdown reaches zero.
    ///
    /// # Arguments
    ///
    /// * `f` - Called synchronously from the update that completes the run
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let fired = Arc::new(AtomicUsize::new(0));
    /// let hook = Arc::clone(&fired);
    /// let mut countdown = new(1.0, &[]).with_on_complete(move || {
    ///     hook.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// countdown.init();
    /// for _ in 0..20 {
    ///     let tick = countdown.tick_msg();
    ///     countdown.update(Box::new(tick));
    /// }
    /// assert_eq!(fired.load(Ordering::SeqCst), 1);
    /// ```
    pub fn with_on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.set_on_complete(f);
        self
    }

    /// Replaces the completion hook.
    pub fn set_on_complete(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(f));
    }

    /// Unique identifier used to route messages to this countdown.
    pub fn id(&self) -> i64 {
        self.subscription.id()
    }

    /// Current subscription epoch. Moves forward whenever the tick chain is
    /// replaced.
    pub fn restart_epoch(&self) -> i64 {
        self.subscription.tag()
    }

    /// Where the countdown is in its lifecycle.
    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if !self.started {
            Phase::Idle
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Whether the pause flag is set.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Whether the countdown has reached zero.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Whether [`teardown`](Self::teardown) has been called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Ticks left in the current run.
    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    /// Ticks in a full run of the current target.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Normalized target duration in seconds.
    pub fn target_seconds(&self) -> f64 {
        self.controller.target_seconds()
    }

    /// Time left in seconds.
    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// Fraction of the run still left.
    pub fn progress_fraction(&self) -> f64 {
        progress::fraction(self.remaining_ticks, self.total_ticks)
    }

    /// Active unit window, `None` when masking is off.
    pub fn mask(&self) -> Option<Mask> {
        self.mask
    }

    /// Turns unit truncation on or off.
    pub fn set_show_mask(&mut self, show_mask: bool) {
        self.show_mask = show_mask;
        self.mask = select_mask(self.controller.target_seconds(), show_mask);
    }

    /// Sets or clears the text shown while paused.
    pub fn set_paused_text(&mut self, text: Option<String>) {
        self.paused_text = text;
    }

    /// Sets the text shown once time is up.
    pub fn set_end_text(&mut self, text: impl Into<String>) {
        self.end_text = text.into();
    }

    /// Text for the current state.
    pub fn display_text(&self) -> String {
        format_display(&DisplayContext {
            remaining_seconds: self.remaining_seconds(),
            paused: self.paused,
            completed: self.completed,
            paused_text: self.paused_text.as_deref(),
            end_text: &self.end_text,
            mask: self.mask,
        })
    }

    /// Remaining time, progress and display text, read together.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(4.0, &[]);
    /// countdown.init();
    /// for _ in 0..10 {
    ///     let tick = countdown.tick_msg();
    ///     countdown.update(Box::new(tick));
    /// }
    ///
    /// let frame = countdown.frame();
    /// assert_eq!(frame.remaining_seconds, 3.0);
    /// assert_eq!(frame.progress_fraction, 0.75);
    /// assert_eq!(frame.display_text, "03");
    /// ```
    pub fn frame(&self) -> Frame {
        Frame {
            remaining_seconds: self.remaining_seconds(),
            progress_fraction: self.progress_fraction(),
            display_text: self.display_text(),
        }
    }

    /// Builds the tick this countdown would accept right now.
    ///
    /// Useful to drive time by hand, for example in tests.
    pub fn tick_msg(&self) -> TickMsg {
        self.subscription.tick_msg()
    }

    /// Starts the countdown.
    ///
    /// Moves an idle countdown to [`Phase::Running`], or to [`Phase::Paused`]
    /// when it was created paused.
    ///
    /// # Returns
    ///
    /// The command for the first tick, or `None` when paused or torn down.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new, start_paused, Phase};
    ///
    /// let mut countdown = new(10.0, &[]);
    /// assert!(countdown.init().is_some());
    /// assert_eq!(countdown.phase(), Phase::Running);
    ///
    /// let mut held = new(10.0, &[start_paused()]);
    /// assert!(held.init().is_none());
    /// assert_eq!(held.phase(), Phase::Paused);
    /// ```
    pub fn init(&mut self) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }
        self.started = true;
        debug!(
            "countdown {} started with {} ticks (paused: {})",
            self.id(),
            self.remaining_ticks,
            self.paused
        );
        self.resubscribe()
    }

    /// Suspends ticking without touching the remaining time.
    ///
    /// The live tick chain is released, so a tick already in flight is
    /// dropped when it arrives. Pausing twice is harmless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new, Phase};
    ///
    /// let mut countdown = new(10.0, &[]);
    /// countdown.init();
    /// let in_flight = countdown.tick_msg();
    ///
    /// countdown.pause();
    /// assert_eq!(countdown.phase(), Phase::Paused);
    /// assert!(countdown.update(Box::new(in_flight)).is_none());
    /// assert_eq!(countdown.remaining_ticks(), 100);
    /// ```
    pub fn pause(&mut self) {
        if self.torn_down || self.paused {
            return;
        }
        self.paused = true;
        self.subscription.stop();
        debug!("countdown {} paused at {} ticks", self.id(), self.remaining_ticks);
    }

    /// Continues from exactly where [`pause`](Self::pause) left off.
    ///
    /// # Returns
    ///
    /// The first tick of a fresh chain, or `None` when it was not paused or
    /// has no chain to run (idle, completed or torn down).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10.0, &[]);
    /// countdown.init();
    /// countdown.pause();
    /// assert!(countdown.resume().is_some());
    /// assert!(countdown.resume().is_none());
    /// ```
    pub fn resume(&mut self) -> Option<Cmd> {
        if self.torn_down || !self.paused {
            return None;
        }
        self.paused = false;
        debug!("countdown {} resumed at {} ticks", self.id(), self.remaining_ticks);
        self.resubscribe()
    }

    /// Applies a live `paused` input. Unchanged values are ignored.
    ///
    /// # Arguments
    ///
    /// * `paused` - Desired pause state
    pub fn set_paused(&mut self, paused: bool) -> Option<Cmd> {
        if paused {
            self.pause();
            None
        } else {
            self.resume()
        }
    }

    /// Flips the pause flag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10.0, &[]);
    /// countdown.init();
    ///
    /// countdown.toggle();
    /// assert!(countdown.paused());
    /// assert!(countdown.toggle().is_some());
    /// assert!(!countdown.paused());
    /// ```
    pub fn toggle(&mut self) -> Option<Cmd> {
        self.set_paused(!self.paused)
    }

    /// Resets the remaining time to the full duration and starts a fresh tick
    /// chain unless paused.
    ///
    /// Works from every phase, including [`Phase::Completed`]. The subscription
    /// epoch moves forward, so ticks scheduled before the restart are dropped.
    ///
    /// # Returns
    ///
    /// The first tick of the new chain, or `None` while paused or torn down.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new, Phase};
    ///
    /// let mut countdown = new(1.0, &[]);
    /// countdown.init();
    /// for _ in 0..10 {
    ///     let tick = countdown.tick_msg();
    ///     countdown.update(Box::new(tick));
    /// }
    /// assert_eq!(countdown.phase(), Phase::Completed);
    ///
    /// assert!(countdown.restart().is_some());
    /// assert_eq!(countdown.phase(), Phase::Running);
    /// assert_eq!(countdown.remaining_ticks(), countdown.total_ticks());
    /// ```
    pub fn restart(&mut self) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }
        self.remaining_ticks = self.total_ticks;
        self.completed = false;
        self.started = true;
        debug!("countdown {} restarted with {} ticks", self.id(), self.total_ticks);
        self.resubscribe()
    }

    /// Applies a live target duration.
    ///
    /// The remaining time moves by the same amount as the target and is then
    /// clamped into the new run. Reaching zero this way completes the
    /// countdown; leaving zero re-arms it.
    ///
    /// # Arguments
    ///
    /// * `target_seconds` - New full-run length; values below one second are
    ///   treated as one second
    ///
    /// # Returns
    ///
    /// The first tick of the replacement chain while running, a
    /// [`CompleteMsg`] command when the change finished the run, or `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10.0, &[]);
    /// countdown.init();
    /// for _ in 0..80 {
    ///     let tick = countdown.tick_msg();
    ///     countdown.update(Box::new(tick));
    /// }
    /// assert_eq!(countdown.remaining_seconds(), 2.0);
    ///
    /// countdown.set_target_seconds(20.0);
    /// assert_eq!(countdown.remaining_seconds(), 12.0);
    /// assert_eq!(countdown.total_ticks(), 200);
    /// ```
    pub fn set_target_seconds(&mut self, target_seconds: f64) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }
        let r = self.controller.reconcile(target_seconds, self.remaining_ticks)?;

        self.remaining_ticks = r.remaining_ticks;
        self.total_ticks = r.total_ticks;
        self.mask = select_mask(self.controller.target_seconds(), self.show_mask);
        debug!(
            "countdown {} retargeted to {}s: shifted by {} ticks, {} of {} left",
            self.id(),
            self.controller.target_seconds(),
            r.delta_ticks,
            self.remaining_ticks,
            self.total_ticks
        );

        if self.remaining_ticks == 0 {
            if self.started {
                return self.complete();
            }
        } else if self.completed {
            self.completed = false;
        }
        self.resubscribe()
    }

    /// Releases the tick subscription. Every later message or call is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10.0, &[]);
    /// countdown.init();
    /// let in_flight = countdown.tick_msg();
    ///
    /// countdown.teardown();
    /// assert!(countdown.update(Box::new(in_flight)).is_none());
    /// assert!(countdown.restart().is_none());
    /// ```
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.subscription.stop();
        self.torn_down = true;
        debug!("countdown {} torn down", self.id());
    }

    /// Command that pauses this countdown through the runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let countdown = new(30.0, &[]);
    ///
    /// // These return commands that send PauseMsg / RestartMsg
    /// let pause_cmd = countdown.pause_cmd();
    /// let resume_cmd = countdown.resume_cmd();
    /// let restart_cmd = countdown.restart_cmd();
    /// ```
    pub fn pause_cmd(&self) -> Cmd {
        self.pause_msg_cmd(true)
    }

    /// Command that resumes this countdown through the runtime.
    pub fn resume_cmd(&self) -> Cmd {
        self.pause_msg_cmd(false)
    }

    /// Command that restarts this countdown through the runtime.
    pub fn restart_cmd(&self) -> Cmd {
        let id = self.id();
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(RestartMsg { id }) as Msg
        })
    }

    fn pause_msg_cmd(&self, paused: bool) -> Cmd {
        let id = self.id();
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(PauseMsg { id, paused }) as Msg
        })
    }

    /// Replaces the tick chain. A new one is only started while running.
    fn resubscribe(&mut self) -> Option<Cmd> {
        if self.started && !self.paused && !self.completed && !self.torn_down {
            Some(self.subscription.start())
        } else {
            self.subscription.stop();
            None
        }
    }

    fn complete(&mut self) -> Option<Cmd> {
        if self.completed {
            return None;
        }
        self.remaining_ticks = 0;
        self.completed = true;
        self.subscription.stop();
        info!("countdown {} completed", self.id());

        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete();
        }

        let id = self.id();
        Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompleteMsg { id }) as Msg
        }))
    }

    fn addressed(&self, id: i64) -> bool {
        id == 0 || id == self.id()
    }

    /// Processes ticks and control messages.
    ///
    /// Ticks from a replaced or released subscription are dropped. Each
    /// accepted tick consumes exactly one unit of time and schedules the next
    /// tick, or emits [`CompleteMsg`] when it was the last one.
    ///
    /// # Arguments
    ///
    /// * `msg` - A [`TickMsg`], [`PauseMsg`] or [`RestartMsg`]; anything else
    ///   is ignored
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(5.0, &[]);
    /// countdown.init();
    ///
    /// let tick = countdown.tick_msg();
    /// assert!(countdown.update(Box::new(tick)).is_some());
    /// assert_eq!(countdown.remaining_ticks(), 49);
    /// assert_eq!(countdown.display_text(), "05");
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.subscription.accepts(tick) {
                trace!(
                    "countdown {} dropped stale tick (id {}, tag {})",
                    self.id(),
                    tick.id,
                    tick.tag()
                );
                return None;
            }

            self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
            if self.remaining_ticks == 0 {
                return self.complete();
            }
            return Some(self.subscription.next_tick());
        }

        if let Some(pause) = msg.downcast_ref::<PauseMsg>() {
            if !self.addressed(pause.id) {
                return None;
            }
            return self.set_paused(pause.paused);
        }

        if let Some(restart) = msg.downcast_ref::<RestartMsg>() {
            if !self.addressed(restart.id) {
                return None;
            }
            return self.restart();
        }

        None
    }

    /// Display text rendered with [`style`](Self::style).
    pub fn view(&self) -> String {
        self.style.render(&self.display_text())
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Model::default();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        from_config(&CountdownConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn tick(m: &mut Model) -> Option<Cmd> {
        let msg = m.tick_msg();
        m.update(Box::new(msg))
    }

    fn tick_n(m: &mut Model, n: usize) {
        for _ in 0..n {
            tick(m);
        }
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook = {
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        };
        (count, hook)
    }

    #[test]
    fn test_new_is_idle_and_full() {
        let m = new(10.0, &[]);
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.total_ticks(), 100);
        assert_eq!(m.remaining_ticks(), 100);
        assert_eq!(m.progress_fraction(), 1.0);
        assert_eq!(m.display_text(), "10");
    }

    #[test]
    fn test_non_positive_target_becomes_one_second() {
        let m = new(0.0, &[]);
        assert_eq!(m.target_seconds(), 1.0);
        assert_eq!(m.total_ticks(), 10);

        let m = new(-20.0, &[]);
        assert_eq!(m.total_ticks(), 10);
    }

    #[test]
    fn test_idle_ignores_ticks() {
        let mut m = new(10.0, &[]);
        assert!(tick(&mut m).is_none());
        assert_eq!(m.remaining_ticks(), 100);
    }

    #[test]
    fn test_init_starts_running() {
        let mut m = new(10.0, &[]);
        assert!(m.init().is_some());
        assert_eq!(m.phase(), Phase::Running);
    }

    #[test]
    fn test_each_tick_decrements_once() {
        let mut m = new(3.0, &[]);
        m.init();
        for expected in (0..30).rev() {
            tick(&mut m);
            assert_eq!(m.remaining_ticks(), expected);
        }
        tick_n(&mut m, 5);
        assert_eq!(m.remaining_ticks(), 0);
        assert_eq!(m.phase(), Phase::Completed);
    }

    #[test]
    fn test_stale_tick_after_restart_is_dropped() {
        let mut m = new(10.0, &[]);
        m.init();
        let stale = m.tick_msg();
        m.restart();
        assert!(m.update(Box::new(stale)).is_none());
        assert_eq!(m.remaining_ticks(), 100);
    }

    #[test]
    fn test_tick_for_other_countdown_is_dropped() {
        let mut a = new(10.0, &[]);
        let mut b = new(10.0, &[]);
        a.init();
        b.init();
        let foreign = b.tick_msg();
        assert!(a.update(Box::new(foreign)).is_none());
        assert_eq!(a.remaining_ticks(), 100);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut m = new(10.0, &[]);
        m.init();
        tick_n(&mut m, 7);
        assert_eq!(m.remaining_ticks(), 93);

        let in_flight = m.tick_msg();
        m.pause();
        assert_eq!(m.phase(), Phase::Paused);
        assert!(m.update(Box::new(in_flight)).is_none());
        tick_n(&mut m, 10);
        assert_eq!(m.remaining_ticks(), 93);

        assert!(m.resume().is_some());
        tick(&mut m);
        assert_eq!(m.remaining_ticks(), 92);
    }

    #[test]
    fn test_pause_replaces_subscription() {
        let mut m = new(10.0, &[]);
        m.init();
        let epoch = m.restart_epoch();
        m.pause();
        assert!(m.restart_epoch() > epoch);
        let paused_epoch = m.restart_epoch();
        m.resume();
        assert!(m.restart_epoch() > paused_epoch);
    }

    #[test]
    fn test_set_paused_same_value_is_noop() {
        let mut m = new(10.0, &[]);
        m.init();
        let epoch = m.restart_epoch();
        assert!(m.set_paused(false).is_none());
        assert_eq!(m.restart_epoch(), epoch);
    }

    #[test]
    fn test_start_paused_waits_for_resume() {
        let mut m = new(5.0, &[start_paused()]);
        assert!(m.init().is_none());
        assert_eq!(m.phase(), Phase::Paused);
        tick_n(&mut m, 3);
        assert_eq!(m.remaining_ticks(), 50);
        assert!(m.toggle().is_some());
        assert_eq!(m.phase(), Phase::Running);
    }

    #[test]
    fn test_completion_fires_once() {
        let (count, hook) = counter();
        let mut m = new(1.0, &[]).with_on_complete(hook);
        m.init();
        tick_n(&mut m, 9);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(tick(&mut m).is_some()); // CompleteMsg command
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tick_n(&mut m, 25);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(m.phase(), Phase::Completed);
    }

    #[test]
    fn test_missing_hook_is_fine() {
        let mut m = new(1.0, &[]);
        m.init();
        tick_n(&mut m, 10);
        assert!(m.completed());
    }

    #[test]
    fn test_restart_after_completion() {
        let (count, hook) = counter();
        let mut m = new(1.0, &[]).with_on_complete(hook);
        m.init();
        tick_n(&mut m, 10);
        assert!(m.completed());

        assert!(m.restart().is_some());
        assert_eq!(m.phase(), Phase::Running);
        assert_eq!(m.remaining_ticks(), m.total_ticks());

        tick_n(&mut m, 10);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_restart_while_paused_stays_paused() {
        let mut m = new(4.0, &[]);
        m.init();
        tick_n(&mut m, 12);
        m.pause();
        assert!(m.restart().is_none());
        assert_eq!(m.remaining_ticks(), 40);
        assert_eq!(m.phase(), Phase::Paused);
    }

    #[test]
    fn test_restart_moves_epoch() {
        let mut m = new(4.0, &[]);
        m.init();
        let epoch = m.restart_epoch();
        m.restart();
        assert!(m.restart_epoch() > epoch);
    }

    #[test]
    fn test_extend_shifts_remaining() {
        let mut m = new(10.0, &[]);
        m.init();
        tick_n(&mut m, 80);
        assert_eq!(m.remaining_seconds(), 2.0);

        assert!(m.set_target_seconds(20.0).is_some());
        assert_eq!(m.remaining_seconds(), 12.0);
        assert_eq!(m.total_ticks(), 200);
        assert_eq!(m.phase(), Phase::Running);
    }

    #[test]
    fn test_retarget_replaces_subscription() {
        let mut m = new(10.0, &[]);
        m.init();
        let stale = m.tick_msg();
        m.set_target_seconds(12.0);
        assert!(m.update(Box::new(stale)).is_none());
        assert_eq!(m.remaining_ticks(), 120);
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut m = new(10.0, &[]);
        m.init();
        let epoch = m.restart_epoch();
        assert!(m.set_target_seconds(10.0).is_none());
        assert_eq!(m.restart_epoch(), epoch);
    }

    #[test]
    fn test_shrink_to_zero_completes() {
        let (count, hook) = counter();
        let mut m = new(30.0, &[]).with_on_complete(hook);
        m.init();
        tick_n(&mut m, 260);
        assert_eq!(m.remaining_seconds(), 4.0);

        assert!(m.set_target_seconds(5.0).is_some());
        assert_eq!(m.remaining_ticks(), 0);
        assert!(m.completed());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_extend_after_completion_rearms() {
        let (count, hook) = counter();
        let mut m = new(1.0, &[]).with_on_complete(hook);
        m.init();
        tick_n(&mut m, 10);
        assert!(m.completed());

        assert!(m.set_target_seconds(3.0).is_some());
        assert_eq!(m.phase(), Phase::Running);
        assert_eq!(m.remaining_seconds(), 2.0);

        tick_n(&mut m, 20);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retarget_while_idle_keeps_idle() {
        let mut m = new(10.0, &[]);
        assert!(m.set_target_seconds(15.0).is_none());
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.remaining_ticks(), 150);
    }

    #[test]
    fn test_retarget_updates_mask() {
        let mut m = new(30.0, &[]);
        assert_eq!(m.mask(), Some(Mask::Seconds));
        m.set_target_seconds(90.0);
        assert_eq!(m.mask(), Some(Mask::MinutesSeconds));
    }

    #[test]
    fn test_mask_fixed_by_total_not_remaining() {
        let mut m = new(61.0, &[]);
        m.init();
        tick_n(&mut m, 20);
        assert_eq!(m.display_text(), "00:59");
    }

    #[test]
    fn test_display_rounds_up() {
        let mut m = new(5.0, &[]);
        m.init();
        tick(&mut m);
        assert_eq!(m.remaining_seconds(), 4.9);
        assert_eq!(m.display_text(), "05");
        tick_n(&mut m, 9);
        assert_eq!(m.display_text(), "04");
    }

    #[test]
    fn test_paused_text() {
        let mut m = new(5.0, &[with_paused_text("Paused")]);
        m.init();
        tick(&mut m);
        m.pause();
        assert_eq!(m.display_text(), "Paused");
        m.resume();
        assert_eq!(m.display_text(), "05");
    }

    #[test]
    fn test_paused_text_at_untouched_start() {
        let m = new(5.0, &[with_paused_text("Paused"), start_paused()]);
        assert_eq!(m.display_text(), "Paused");
    }

    #[test]
    fn test_end_text_when_completed_and_paused() {
        let mut m = new(1.0, &[with_paused_text("Paused"), with_end_text("Done")]);
        m.init();
        tick_n(&mut m, 10);
        m.pause();
        assert_eq!(m.display_text(), "Done");
    }

    #[test]
    fn test_without_mask_shows_seconds_count() {
        let mut m = new(125.0, &[without_mask()]);
        assert_eq!(m.mask(), None);
        assert_eq!(m.display_text(), "125");
        m.init();
        tick(&mut m);
        assert_eq!(m.display_text(), "125");
    }

    #[test]
    fn test_pause_and_restart_messages() {
        let mut m = new(10.0, &[]);
        m.init();
        tick_n(&mut m, 5);

        let pause = PauseMsg {
            id: m.id(),
            paused: true,
        };
        assert!(m.update(Box::new(pause)).is_none());
        assert!(m.paused());

        let restart = RestartMsg { id: m.id() };
        m.update(Box::new(restart));
        assert_eq!(m.remaining_ticks(), 100);

        let resume = PauseMsg { id: 0, paused: false };
        assert!(m.update(Box::new(resume)).is_some());
        assert_eq!(m.phase(), Phase::Running);
    }

    #[test]
    fn test_messages_for_other_ids_are_ignored() {
        let mut m = new(10.0, &[]);
        m.init();
        let pause = PauseMsg {
            id: m.id() + 999,
            paused: true,
        };
        assert!(m.update(Box::new(pause)).is_none());
        assert!(!m.paused());
    }

    #[test]
    fn test_control_commands_build() {
        let m = new(10.0, &[]);
        let _pause = m.pause_cmd();
        let _resume = m.resume_cmd();
        let _restart = m.restart_cmd();
    }

    #[test]
    fn test_teardown_makes_everything_noop() {
        let mut m = new(10.0, &[]);
        m.init();
        let in_flight = m.tick_msg();
        m.teardown();

        assert!(m.update(Box::new(in_flight)).is_none());
        assert!(m.restart().is_none());
        assert!(m.resume().is_none());
        assert!(m.set_target_seconds(20.0).is_none());
        assert_eq!(m.remaining_ticks(), 100);
        assert!(m.is_torn_down());
    }

    #[test]
    fn test_frame_is_consistent() {
        let mut m = new(4.0, &[]);
        m.init();
        tick_n(&mut m, 10);
        let frame = m.frame();
        assert_eq!(frame.remaining_seconds, 3.0);
        assert_eq!(frame.progress_fraction, 0.75);
        assert_eq!(frame.display_text, "03");
    }

    #[test]
    fn test_from_config() {
        let config = CountdownConfig {
            paused: true,
            paused_text: Some("Hold".to_string()),
            show_mask: false,
            end_text: "Fin".to_string(),
            ..CountdownConfig::new(75.0)
        };
        let mut m = from_config(&config);
        assert_eq!(m.mask(), None);
        assert!(m.paused());
        assert_eq!(m.display_text(), "Hold");
        m.resume();
        assert_eq!(m.display_text(), "75");
    }

    #[test]
    fn test_fractional_retarget_before_first_tick_stays_full() {
        let mut m = new(1.04, &[]);
        m.init();
        m.set_target_seconds(1.06);
        assert_eq!(m.total_ticks(), 11);
        assert_eq!(m.remaining_ticks(), m.total_ticks());
        assert_eq!(m.progress_fraction(), 1.0);
    }

    #[test]
    fn test_huge_target_shows_seconds_count() {
        let m = new(1e15, &[]);
        assert_eq!(m.mask(), Some(Mask::HoursMinutesSeconds));
        assert_eq!(m.display_text(), "1000000000000000");
    }

    #[test]
    fn test_default_model() {
        let m = Model::default();
        assert_eq!(m.target_seconds(), 60.0);
        assert_eq!(m.mask(), Some(Mask::MinutesSeconds));
        assert_eq!(m.display_text(), "01:00");
    }
}
