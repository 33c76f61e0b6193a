use std::cell::Cell;
use std::rc::Rc;

use athletic::nav::MenuState;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node};

use super::dom;
use crate::ui_model::{class, ElementId, NAV_LINK_SELECTOR};

/// Mobile menu: toggle button, close on nav-link click, close on outside click.
pub(super) fn wire(doc: &Document) -> bool {
    let (Some(toggle), Some(menu)) = (
        dom::by_id(doc, ElementId::MobileToggle),
        dom::by_id(doc, ElementId::NavMenu),
    ) else {
        return false;
    };

    let state = Rc::new(Cell::new(MenuState::default()));
    let apply: Rc<dyn Fn(bool)> = {
        let toggle = toggle.clone();
        let menu = menu.clone();
        Rc::new(move |open| {
            dom::set_class(&menu, class::ACTIVE, open);
            dom::set_class(&toggle, class::ACTIVE, open);
        })
    };

    {
        let state = Rc::clone(&state);
        let apply = Rc::clone(&apply);
        dom::listen(&toggle, "click", move |_| {
            let mut s = state.get();
            let open = s.toggle();
            state.set(s);
            apply(open);
        });
    }

    for link in dom::query_all(doc, NAV_LINK_SELECTOR) {
        let state = Rc::clone(&state);
        let apply = Rc::clone(&apply);
        dom::listen(&link, "click", move |_| {
            let mut s = state.get();
            if s.close() {
                state.set(s);
                apply(false);
            }
        });
    }

    dom::listen(doc, "click", move |ev| {
        let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = contains(&menu, target.as_ref()) || contains(&toggle, target.as_ref());
        let mut s = state.get();
        if s.click_outside(inside) {
            state.set(s);
            apply(false);
        }
    });

    true
}

fn contains(el: &Element, node: Option<&Node>) -> bool {
    node.is_some_and(|n| el.contains(Some(n)))
}
