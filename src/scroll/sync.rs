//! Scroll-sync lifecycle.
//!
//! Drives the active-heading algorithm from viewport events. The sync
//! only runs while the screen is classified extra-large; below that the
//! table of contents is hidden and tracking would be wasted work. Events
//! carry an injected `Instant` so the lifecycle is testable without
//! sleeping.

use std::time::{Duration, Instant};

use super::active::{Anchor, ScrollMetrics, active_hash_update};
use super::debounce::ThrottleDebounce;

/// Scroll events are throttled to this minimum spacing.
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Screen-size classification is ignored for this long after creation,
/// giving the page layout time to settle.
pub const SETUP_DELAY: Duration = Duration::from_millis(300);

/// Everything the sync needs from the surrounding page.
pub trait Viewport {
    /// Heading anchors in document order.
    fn anchors(&self) -> Vec<Anchor>;
    /// Hashes of the table-of-contents links.
    fn toc_hashes(&self) -> Vec<String>;
    fn metrics(&self) -> ScrollMetrics;
    fn current_hash(&self) -> String;
    /// Replace the URL hash without navigating or scrolling.
    fn replace_hash(&mut self, hash: &str);
}

pub struct ScrollSync<V: Viewport> {
    viewport: V,
    throttle: ThrottleDebounce,
    setup_ready: Instant,
    extra_large: bool,
    attached: bool,
}

impl<V: Viewport> ScrollSync<V> {
    pub fn new(viewport: V, now: Instant) -> Self {
        Self {
            viewport,
            throttle: ThrottleDebounce::new(SCROLL_DELAY),
            setup_ready: now + SETUP_DELAY,
            extra_large: false,
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Screen-size classification changed. Attaching triggers an
    /// immediate sync; detaching drops any pending work.
    pub fn set_extra_large(&mut self, extra_large: bool, now: Instant) {
        self.extra_large = extra_large;
        self.apply(now);
    }

    /// A scroll happened.
    pub fn scrolled(&mut self, now: Instant) {
        if self.attached && self.throttle.call(now) {
            self.sync();
        }
    }

    /// The documentation state changed (new page content); resync.
    pub fn docs_changed(&mut self, now: Instant) {
        self.scrolled(now);
    }

    /// Advance time: applies a deferred attach once the setup delay has
    /// passed and runs the trailing throttled sync when due.
    pub fn tick(&mut self, now: Instant) {
        self.apply(now);
        if self.attached && self.throttle.take_ready(now) {
            self.sync();
        }
    }

    /// How long until `tick` has something to do.
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        if !self.attached {
            return (self.extra_large && now < self.setup_ready)
                .then(|| self.setup_ready - now);
        }
        self.throttle.sleep_duration(now)
    }

    fn apply(&mut self, now: Instant) {
        if now < self.setup_ready || self.extra_large == self.attached {
            return;
        }
        self.attached = self.extra_large;
        if self.attached {
            if self.throttle.call(now) {
                self.sync();
            }
        } else {
            self.throttle.cancel();
        }
    }

    fn sync(&mut self) {
        let anchors = self.viewport.anchors();
        let toc_hashes = self.viewport.toc_hashes();
        let metrics = self.viewport.metrics();
        let current = self.viewport.current_hash();
        if let Some(hash) = active_hash_update(&anchors, &toc_hashes, &current, &metrics) {
            self.viewport.replace_hash(&hash);
        }
    }
}
