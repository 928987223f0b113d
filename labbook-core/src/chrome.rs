//! Page chrome decisions: navbar styling, anchor handling and card reveal.
//!
//! The browser layer only measures and applies; the rules live here.

/// Class added to the navbar once the page has scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Initial downward offset of a not-yet-revealed card.
pub const REVEAL_OFFSET_PX: u32 = 50;

/// Whether the navbar should carry [`SCROLLED_CLASS`].
#[must_use]
pub fn navbar_scrolled(scroll_y: f64, threshold: u32) -> bool {
    scroll_y > f64::from(threshold)
}

/// What a click on an in-page anchor should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorAction {
    /// Bare `#`, or nothing sensible to do.
    Ignore,
    /// Smooth scroll to the element with this id.
    ScrollTo(String),
    /// Leave this page for the home page section.
    Navigate(String),
}

/// Resolve an `href="#..."` click. `target_exists` says whether the page has
/// the referenced element; `pathname` is the current location path.
#[must_use]
pub fn resolve_anchor(href: &str, target_exists: bool, pathname: &str) -> AnchorAction {
    let Some(id) = href.strip_prefix('#') else {
        return AnchorAction::Ignore;
    };
    if id.is_empty() {
        return AnchorAction::Ignore;
    }
    if target_exists {
        AnchorAction::ScrollTo(id.to_string())
    } else if !pathname.contains("index.html") {
        AnchorAction::Navigate(format!("index.html{href}"))
    } else {
        AnchorAction::Ignore
    }
}

/// Inline style state of a service card for the reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub visible: bool,
    pub delay_ms: u32,
}

impl Reveal {
    /// Hidden card at grid position `index`, staggered by `stagger_ms`.
    #[must_use]
    pub fn staggered(index: usize, stagger_ms: u32) -> Self {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            visible: false,
            delay_ms: index.saturating_mul(stagger_ms),
        }
    }

    /// Once shown a card stays shown.
    #[must_use]
    pub const fn shown(self) -> Self {
        Self {
            visible: true,
            delay_ms: self.delay_ms,
        }
    }

    #[must_use]
    pub fn style(self) -> String {
        let (opacity, offset) = if self.visible {
            (1, 0)
        } else {
            (0, REVEAL_OFFSET_PX)
        };
        format!(
            "opacity:{opacity};transform:translateY({offset}px);transition-delay:{}ms",
            self.delay_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_threshold_is_strict() {
        assert!(!navbar_scrolled(50.0, 50));
        assert!(navbar_scrolled(50.5, 50));
        assert!(!navbar_scrolled(0.0, 50));
    }

    #[test]
    fn anchors_resolve_per_page() {
        assert_eq!(resolve_anchor("#", true, "/"), AnchorAction::Ignore);
        assert_eq!(
            resolve_anchor("#services", true, "/index.html"),
            AnchorAction::ScrollTo("services".into())
        );
        assert_eq!(
            resolve_anchor("#services", false, "/about.html"),
            AnchorAction::Navigate("index.html#services".into())
        );
        assert_eq!(
            resolve_anchor("#missing", false, "/index.html"),
            AnchorAction::Ignore
        );
        assert_eq!(resolve_anchor("/about", true, "/"), AnchorAction::Ignore);
    }

    #[test]
    fn reveal_staggers_by_index() {
        assert_eq!(Reveal::staggered(0, 100).delay_ms, 0);
        assert_eq!(Reveal::staggered(3, 100).delay_ms, 300);
        let shown = Reveal::staggered(2, 100).shown();
        assert!(shown.visible);
        assert_eq!(
            shown.style(),
            "opacity:1;transform:translateY(0px);transition-delay:200ms"
        );
        assert!(Reveal::staggered(1, 100).style().starts_with("opacity:0;transform:translateY(50px)"));
    }
}
