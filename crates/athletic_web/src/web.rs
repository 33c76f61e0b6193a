use athletic::config::SiteConfig;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::ui_model::{ElementId, Feature};

mod bmi_form;
mod contact_form;
mod dom;
mod logging;
mod menu;
mod notice_view;
mod reveal;
mod scroll;
mod timer;
mod video;

/// Installs logging and wires every page feature. Waits for
/// `DOMContentLoaded` if the document is still parsing.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    logging::banner();

    let Some(doc) = dom::document() else {
        return;
    };

    if doc.ready_state() == "loading" {
        let target = doc.clone();
        dom::listen_once(&target, "DOMContentLoaded", move |_| wire_page(&doc));
    } else {
        wire_page(&doc);
    }
}

fn wire_page(doc: &Document) {
    let config = load_config(doc);

    let mut wired: Vec<&'static str> = Vec::new();
    for &feature in Feature::all() {
        let missing = feature.missing_ids(|id| dom::by_id(doc, id).is_some());
        if !missing.is_empty() {
            debug!(feature = feature.label(), ?missing, "feature skipped");
            continue;
        }
        let ok = match feature {
            Feature::MobileMenu => menu::wire(doc),
            Feature::SmoothScroll => scroll::wire_smooth_scroll(doc, &config),
            Feature::ScrollReveal => reveal::wire(doc, &config),
            Feature::NavbarScroll => scroll::wire_navbar(doc, &config),
            Feature::ScrollToTop => scroll::wire_scroll_to_top(doc, &config),
            Feature::ContactForm => contact_form::wire(doc, &config),
            Feature::BmiCalculator => bmi_form::wire(doc),
            Feature::VideoGallery => video::wire(doc),
        };
        if ok {
            wired.push(feature.label());
        } else {
            debug!(feature = feature.label(), "feature not wired");
        }
    }
    info!(features = ?wired, "athletic site ready");
}

fn load_config(doc: &Document) -> SiteConfig {
    let raw = dom::by_id(doc, ElementId::SiteConfig).and_then(|el| el.text_content());
    SiteConfig::from_json_or_default(raw.as_deref())
}
