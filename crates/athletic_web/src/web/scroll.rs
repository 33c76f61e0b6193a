use athletic::config::SiteConfig;
use athletic::debounce::debounce;
use athletic::nav::{
    active_linked_section, internal_target, scroll_target, ScrollThresholds, SectionBounds,
};
use web_sys::{Document, Element};

use super::dom;
use super::timer::BrowserScheduler;
use crate::ui_model::{class, nav_link_selector_for, ElementId, NAV_LINK_SELECTOR, SECTION_SELECTOR};

/// Smooth scrolling for in-page nav links plus active-link tracking while
/// the user scrolls.
pub(super) fn wire_smooth_scroll(doc: &Document, config: &SiteConfig) -> bool {
    let links = dom::query_all(doc, NAV_LINK_SELECTOR);
    if links.is_empty() {
        return false;
    }

    for link in &links {
        let doc = doc.clone();
        let link = link.clone();
        let target = link.clone();
        dom::listen(&target, "click", move |ev| {
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(section_id) = internal_target(&href) else {
                return;
            };
            ev.prevent_default();
            let Some(section) = doc.get_element_by_id(section_id) else {
                return;
            };
            let top = scroll_target(dom::offset_top(&section), dom::navbar_height(&doc));
            dom::smooth_scroll_to(top);
            highlight(&doc, &link);
        });
    }

    let offset = config.active_link_offset_px;
    let update = {
        let doc = doc.clone();
        debounce(BrowserScheduler, config.active_link_debounce(), move |()| {
            update_active_link(&doc, offset)
        })
    };
    if let Some(w) = dom::window() {
        dom::listen(&w, "scroll", move |_| update.call(()));
    }
    true
}

fn highlight(doc: &Document, active: &Element) {
    for link in dom::query_all(doc, NAV_LINK_SELECTOR) {
        dom::set_class(&link, class::ACTIVE, false);
    }
    dom::set_class(active, class::ACTIVE, true);
}

fn update_active_link(doc: &Document, offset: f64) {
    let sections: Vec<SectionBounds> = dom::query_all(doc, SECTION_SELECTOR)
        .iter()
        .map(|s| SectionBounds::new(s.id(), dom::offset_top(s), dom::offset_height(s)))
        .collect();

    let has_link = |id: &str| matches!(doc.query_selector(&nav_link_selector_for(id)), Ok(Some(_)));
    let Some(id) = active_linked_section(
        dom::scroll_y(),
        dom::navbar_height(doc),
        offset,
        &sections,
        has_link,
    ) else {
        return;
    };
    if let Ok(Some(link)) = doc.query_selector(&nav_link_selector_for(id)) {
        highlight(doc, &link);
    }
}

/// `scrolled` class on the navbar once the page leaves the top.
pub(super) fn wire_navbar(doc: &Document, config: &SiteConfig) -> bool {
    let Some(navbar) = dom::by_id(doc, ElementId::Navbar) else {
        return false;
    };
    let Some(w) = dom::window() else {
        return false;
    };

    let thresholds = ScrollThresholds::from_config(config);
    let update = debounce(BrowserScheduler, config.navbar_debounce(), move |()| {
        dom::set_class(&navbar, class::SCROLLED, thresholds.navbar_scrolled(dom::scroll_y()));
    });
    dom::listen(&w, "scroll", move |_| update.call(()));
    true
}

/// Floating scroll-to-top button, created when the markup lacks one.
pub(super) fn wire_scroll_to_top(doc: &Document, config: &SiteConfig) -> bool {
    let Some(w) = dom::window() else {
        return false;
    };
    let Some(button) = dom::by_id(doc, ElementId::ScrollToTop).or_else(|| create_button(doc))
    else {
        return false;
    };

    dom::listen(&button, "click", |_| dom::smooth_scroll_to(0.0));

    let thresholds = ScrollThresholds::from_config(config);
    let update = debounce(BrowserScheduler, config.scroll_top_debounce(), move |()| {
        dom::set_style(&button, "display", thresholds.scroll_top_display(dom::scroll_y()));
    });
    dom::listen(&w, "scroll", move |_| update.call(()));
    true
}

fn create_button(doc: &Document) -> Option<Element> {
    let button = doc.create_element("button").ok()?;
    button.set_id(ElementId::ScrollToTop.id());
    button.set_inner_html("<i class=\"fas fa-arrow-up\"></i>");
    let _ = button.set_attribute("aria-label", "Scroll to top");
    doc.body()?.append_child(&button).ok()?;
    Some(button)
}
