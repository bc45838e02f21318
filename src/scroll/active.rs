//! Active-heading selection from scroll position.
//!
//! Pure functions over injected anchor and scroll data, so the behavior
//! is testable without a browser.

use rustc_hash::FxHashSet;

/// Fixed navbar height in pixels; anchors activate this many pixels
/// before their own position, and the page counts as scrolled to the
/// bottom within this distance of it.
pub const NAVBAR_HEIGHT: f64 = 160.0;

/// A heading anchor in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub hash: String,
    pub offset_top: f64,
}

impl Anchor {
    pub fn new(hash: impl Into<String>, offset_top: f64) -> Self {
        Self {
            hash: hash.into(),
            offset_top,
        }
    }
}

/// Scroll position sources sampled from the viewport.
///
/// Browsers disagree on which element carries the scroll position, so
/// three sources are sampled and the maximum wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub page_y_offset: f64,
    pub document_scroll_top: f64,
    pub body_scroll_top: f64,
    pub viewport_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Current scroll offset: max across the three sources.
    pub fn scroll_top(&self) -> f64 {
        self.page_y_offset
            .max(self.document_scroll_top)
            .max(self.body_scroll_top)
    }

    /// Whether the viewport bottom sits within [`NAVBAR_HEIGHT`] of the
    /// end of the page. The scroll bottom rarely lands exactly on the
    /// scroll height, hence the tolerance.
    pub fn at_page_bottom(&self) -> bool {
        let scroll_bottom = self.scroll_top() + self.viewport_height;
        (self.scroll_height - scroll_bottom).abs() < NAVBAR_HEIGHT
    }
}

/// Keep only anchors that have a table-of-contents link with the same
/// hash.
pub fn valid_anchors<'a>(anchors: &'a [Anchor], toc_hashes: &[String]) -> Vec<&'a Anchor> {
    let linked: FxHashSet<&str> = toc_hashes.iter().map(String::as_str).collect();
    anchors
        .iter()
        .filter(|anchor| linked.contains(anchor.hash.as_str()))
        .collect()
}

/// Compute the hash the URL should be replaced with, if any.
///
/// Returns `None` when nothing should change: no anchor is active, the
/// active anchor already matches `current_hash`, or the page is at the
/// bottom and `current_hash` points at a later anchor (replacing it
/// would flicker the hash back and forth while several headings are
/// visible).
pub fn active_hash_update(
    anchors: &[Anchor],
    toc_hashes: &[String],
    current_hash: &str,
    metrics: &ScrollMetrics,
) -> Option<String> {
    let valid = valid_anchors(anchors, toc_hashes);
    let scroll_top = metrics.scroll_top();
    let at_bottom = metrics.at_page_bottom();

    for (i, anchor) in valid.iter().enumerate() {
        let first_anchor_active = i == 0 && scroll_top == 0.0;
        let passed_current = scroll_top >= anchor.offset_top - NAVBAR_HEIGHT;
        let not_passed_next = valid
            .get(i + 1)
            .is_none_or(|next| scroll_top < next.offset_top - NAVBAR_HEIGHT);

        if !(first_anchor_active || (passed_current && not_passed_next)) {
            continue;
        }

        if anchor.hash == current_hash {
            return None;
        }

        if at_bottom
            && valid[i + 1..]
                .iter()
                .any(|later| later.hash == current_hash)
        {
            return None;
        }

        return Some(anchor.hash.clone());
    }

    None
}
