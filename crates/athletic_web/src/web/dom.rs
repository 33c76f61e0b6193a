use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::ui_model::ElementId;

pub(super) fn window() -> Option<Window> {
    web_sys::window()
}

pub(super) fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub(super) fn by_id(doc: &Document, id: ElementId) -> Option<Element> {
    doc.get_element_by_id(id.id())
}

pub(super) fn by_id_as<T: JsCast>(doc: &Document, id: ElementId) -> Option<T> {
    by_id(doc, id).and_then(|el| el.dyn_into::<T>().ok())
}

pub(super) fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        tracing::warn!(selector, "bad selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(super) fn query_in(el: &Element, selector: &str) -> Option<Element> {
    el.query_selector(selector).ok().flatten()
}

/// Current value of an input, select or textarea; empty when the element is
/// missing or of another kind.
pub(super) fn field_value(doc: &Document, id: ElementId) -> String {
    let Some(el) = by_id(doc, id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub(super) fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let res = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = res {
        tracing::warn!(class, "class toggle failed: {e:?}");
    }
}

pub(super) fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub(super) fn offset_top(el: &Element) -> f64 {
    el.dyn_ref::<HtmlElement>()
        .map(|h| f64::from(h.offset_top()))
        .unwrap_or(0.0)
}

pub(super) fn offset_height(el: &Element) -> f64 {
    el.dyn_ref::<HtmlElement>()
        .map(|h| f64::from(h.offset_height()))
        .unwrap_or(0.0)
}

pub(super) fn navbar_height(doc: &Document) -> f64 {
    by_id(doc, ElementId::Navbar)
        .map(|nav| offset_height(&nav))
        .unwrap_or(0.0)
}

pub(super) fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub(super) fn smooth_scroll_to(top: f64) {
    let Some(w) = window() else {
        return;
    };
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    w.scroll_to_with_scroll_to_options(&opts);
}

/// Adds a listener that lives for the rest of the page.
pub(super) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    match target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => tracing::warn!(event, "addEventListener failed: {e:?}"),
    }
}

pub(super) fn listen_once(target: &EventTarget, event: &str, handler: impl FnOnce(Event) + 'static) {
    let cb = Closure::once(handler);
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    match target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &opts,
    ) {
        Ok(()) => cb.forget(),
        Err(e) => tracing::warn!(event, "addEventListener failed: {e:?}"),
    }
}
