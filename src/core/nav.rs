//! Navigation menu state and scroll-position math.
//!
//! The adapter measures the page (scroll offset, navbar height, section
//! boxes) and asks these functions what to toggle.

use crate::config::SiteConfig;

/// Mobile menu. `open` maps to the `active` class on both the menu and its
/// toggle button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Document click. Closes an open menu when the click landed outside both
    /// the menu and the toggle. Returns whether it closed.
    pub fn click_outside(&mut self, inside_menu_or_toggle: bool) -> bool {
        if inside_menu_or_toggle {
            return false;
        }
        self.close()
    }
}

/// Fragment id for in-page links (`#about` -> `about`). Other links are
/// left to the browser.
pub fn internal_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Scroll offset that puts a section's top edge just below the fixed navbar.
pub fn scroll_target(section_top: f64, navbar_height: f64) -> f64 {
    section_top - navbar_height
}

/// Vertical extent of a `section[id]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Point probed when picking the active section.
pub fn active_probe(scroll_y: f64, navbar_height: f64, offset: f64) -> f64 {
    scroll_y + navbar_height + offset
}

/// The section under the probe, if any. When sections overlap, the last
/// match in document order wins.
pub fn active_section<'a>(
    scroll_y: f64,
    navbar_height: f64,
    offset: f64,
    sections: &'a [SectionBounds],
) -> Option<&'a str> {
    active_linked_section(scroll_y, navbar_height, offset, sections, |_| true)
}

/// Like [`active_section`], but only sections for which `has_link` holds are
/// candidates. A later match without a nav link leaves an earlier linked one
/// active.
pub fn active_linked_section<'a>(
    scroll_y: f64,
    navbar_height: f64,
    offset: f64,
    sections: &'a [SectionBounds],
    has_link: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    let probe = active_probe(scroll_y, navbar_height, offset);
    sections
        .iter()
        .rev()
        .filter(|s| s.contains(probe))
        .map(|s| s.id.as_str())
        .find(|id| has_link(id))
}

/// Scroll-driven class toggles, derived from one config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThresholds {
    pub navbar_scrolled_px: f64,
    pub scroll_top_visible_px: f64,
    pub active_link_offset_px: f64,
}

impl ScrollThresholds {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            navbar_scrolled_px: config.navbar_scrolled_px,
            scroll_top_visible_px: config.scroll_top_visible_px,
            active_link_offset_px: config.active_link_offset_px,
        }
    }

    pub fn navbar_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.navbar_scrolled_px
    }

    pub fn scroll_top_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.scroll_top_visible_px
    }

    /// CSS `display` value for the scroll-to-top button.
    pub fn scroll_top_display(&self, scroll_y: f64) -> &'static str {
        if self.scroll_top_visible(scroll_y) {
            "flex"
        } else {
            "none"
        }
    }
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("inicio", 0.0, 800.0),
            SectionBounds::new("servicios", 800.0, 600.0),
            SectionBounds::new("planes", 1400.0, 700.0),
            SectionBounds::new("contacto", 2100.0, 500.0),
        ]
    }

    #[test]
    fn menu_toggle_and_close() {
        let mut m = MenuState::default();
        assert!(!m.is_open());
        assert!(m.toggle());
        assert!(m.is_open());
        assert!(!m.toggle());
        m.toggle();
        assert!(m.close());
        assert!(!m.close());
    }

    #[test]
    fn outside_click_only_closes_open_menu() {
        let mut m = MenuState::default();
        assert!(!m.click_outside(false));

        m.toggle();
        assert!(!m.click_outside(true));
        assert!(m.is_open());
        assert!(m.click_outside(false));
        assert!(!m.is_open());
    }

    #[test]
    fn internal_links_only() {
        assert_eq!(internal_target("#planes"), Some("planes"));
        assert_eq!(internal_target("#"), Some(""));
        assert_eq!(internal_target("https://wa.me/1"), None);
        assert_eq!(internal_target("index.html#planes"), None);
    }

    #[test]
    fn scroll_target_clears_navbar() {
        assert_eq!(scroll_target(1400.0, 80.0), 1320.0);
    }

    #[test]
    fn active_section_uses_navbar_and_offset() {
        let s = page();
        // probe = 0 + 80 + 100
        assert_eq!(active_section(0.0, 80.0, 100.0, &s), Some("inicio"));
        // probe = 620 + 80 + 100 = 800, boundary belongs to the next section
        assert_eq!(active_section(620.0, 80.0, 100.0, &s), Some("servicios"));
        assert_eq!(active_section(619.0, 80.0, 100.0, &s), Some("inicio"));
        assert_eq!(active_section(2000.0, 80.0, 100.0, &s), Some("contacto"));
        // past the last section
        assert_eq!(active_section(5000.0, 80.0, 100.0, &s), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let s = vec![
            SectionBounds::new("outer", 0.0, 1000.0),
            SectionBounds::new("inner", 200.0, 100.0),
        ];
        assert_eq!(active_section(150.0, 0.0, 100.0, &s), Some("inner"));
        assert_eq!(active_section(500.0, 0.0, 100.0, &s), Some("outer"));
    }

    #[test]
    fn sections_without_a_nav_link_are_skipped() {
        let s = vec![
            SectionBounds::new("planes", 0.0, 1000.0),
            SectionBounds::new("promo", 200.0, 100.0),
        ];
        let linked = |id: &str| id != "promo";
        assert_eq!(active_linked_section(150.0, 0.0, 100.0, &s, linked), Some("planes"));
        assert_eq!(active_linked_section(150.0, 0.0, 100.0, &s, |_| false), None);
        assert_eq!(active_section(150.0, 0.0, 100.0, &s), Some("promo"));
    }

    #[test]
    fn scroll_thresholds_are_strict() {
        let t = ScrollThresholds::default();
        assert!(!t.navbar_scrolled(50.0));
        assert!(t.navbar_scrolled(50.5));
        assert!(!t.scroll_top_visible(300.0));
        assert!(t.scroll_top_visible(301.0));
        assert_eq!(t.scroll_top_display(0.0), "none");
        assert_eq!(t.scroll_top_display(1000.0), "flex");
        assert_eq!(t.active_link_offset_px, 100.0);
    }
}
