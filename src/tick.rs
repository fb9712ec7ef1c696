//! Tick source for countdown engines.
//!
//! Time only advances when a [`TickMsg`] reaches an engine. Ticks are produced
//! by `bubbletea_rs::tick` at a fixed [`TICK_INTERVAL`] and carry two numbers:
//! the `id` of the engine that scheduled them and the `tag` of the subscription
//! that was live at the time. A [`Subscription`] owns both numbers and decides
//! whether an incoming tick is still current.
//!
//! Every accepted tick schedules exactly one follow-up tick, so there is never
//! more than one live tick chain per engine. Starting, stopping or replacing a
//! subscription bumps the tag, which turns any tick already in flight into a
//! stale one that is dropped on arrival.
//!
//! ```rust
//! use bubbletea_countdown::tick::Subscription;
//!
//! let mut sub = Subscription::new();
//! let _cmd = sub.start();
//! let msg = sub.tick_msg();
//! assert!(sub.accepts(&msg));
//!
//! sub.stop();
//! assert!(!sub.accepts(&msg));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Granularity of a single tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Number of ticks that make up one second.
pub const TICKS_PER_SECOND: u64 = 1000 / TICK_INTERVAL.as_millis() as u64;

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Allocates a process-unique, non-zero engine id.
pub(crate) fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per [`TICK_INTERVAL`] while a subscription is live.
///
/// The `tag` is private: only a [`Subscription`] can mint a tick it will
/// accept, which is what keeps stale timers from double-decrementing.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Engine that scheduled this tick.
    pub id: i64,
    tag: i64,
}

impl TickMsg {
    /// Subscription epoch this tick belongs to.
    pub fn tag(&self) -> i64 {
        self.tag
    }
}

/// The single live tick chain of one engine.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: i64,
    tag: i64,
    active: bool,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// Creates an inactive subscription with a fresh engine id.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            active: false,
        }
    }

    /// Engine id this subscription schedules ticks for.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current epoch. Moves forward when a chain is started or a live one is
    /// stopped.
    pub fn tag(&self) -> i64 {
        self.tag
    }

    /// Whether a tick chain is currently expected to be running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replaces whatever chain was live with a fresh one and returns the
    /// command for its first tick.
    ///
    /// # Returns
    ///
    /// A command that delivers a [`TickMsg`] after [`TICK_INTERVAL`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::tick::Subscription;
    ///
    /// let mut sub = Subscription::new();
    /// let _first = sub.start();
    /// let old = sub.tick_msg();
    ///
    /// let _replacement = sub.start();
    /// assert!(!sub.accepts(&old));
    /// assert!(sub.accepts(&sub.tick_msg()));
    /// ```
    pub fn start(&mut self) -> Cmd {
        self.tag += 1;
        self.active = true;
        self.schedule()
    }

    /// Invalidates the live chain. Stopping twice is harmless.
    pub fn stop(&mut self) {
        if self.active {
            self.tag += 1;
            self.active = false;
        }
    }

    /// Reports whether `msg` belongs to the live chain.
    ///
    /// # Arguments
    ///
    /// * `msg` - Incoming tick; its id and tag must both match
    pub fn accepts(&self, msg: &TickMsg) -> bool {
        self.active && msg.id == self.id && msg.tag == self.tag
    }

    /// Schedules the next tick of the live chain. Call once per accepted tick.
    pub fn next_tick(&self) -> Cmd {
        self.schedule()
    }

    /// Builds the tick the live chain would deliver next, without waiting.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn schedule(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }
}
