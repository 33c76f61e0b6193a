use athletic::config::SiteConfig;
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom;
use crate::ui_model::{class, REVEAL_SELECTOR};

/// Adds `revealed` to `.reveal-on-scroll` elements as they enter the
/// viewport. Elements stay observed after their first reveal.
pub(super) fn wire(doc: &Document, config: &SiteConfig) -> bool {
    let targets = dom::query_all(doc, REVEAL_SELECTOR);
    if targets.is_empty() {
        return false;
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    dom::set_class(&entry.target(), class::REVEALED, true);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    init.set_root_margin(&config.reveal_root_margin);

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    ) {
        Ok(o) => o,
        Err(e) => {
            tracing::warn!("IntersectionObserver unavailable: {e:?}");
            return false;
        }
    };
    callback.forget();

    for el in &targets {
        observer.observe(el);
    }
    true
}
