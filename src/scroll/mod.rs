//! Scroll-position to active-heading synchronization.
//!
//! | Module     | Description                                     |
//! |------------|-------------------------------------------------|
//! | `active`   | Pure active-heading selection algorithm         |
//! | `debounce` | Throttle-and-debounce event scheduling          |
//! | `sync`     | Lifecycle around an injected [`sync::Viewport`] |

mod active;
mod debounce;
mod sync;

pub use active::{Anchor, NAVBAR_HEIGHT, ScrollMetrics, active_hash_update, valid_anchors};
pub use debounce::ThrottleDebounce;
pub use sync::{SCROLL_DELAY, SETUP_DELAY, ScrollSync, Viewport};
