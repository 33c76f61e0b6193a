use athletic::config::SiteConfig;
use athletic::contact::{ContactHandler, ContactPage, ContactSubmission};
use athletic::notice::{Notice, NoticeController};
use leptos::mount::mount_to;
use leptos::prelude::*;
use web_sys::{Document, HtmlElement, HtmlFormElement};

use super::dom;
use super::notice_view::NoticeSlot;
use super::timer::BrowserScheduler;
use crate::ui_model::ElementId;

struct FormPage {
    form: HtmlFormElement,
}

impl ContactPage for FormPage {
    fn open_link(&self, url: &str) {
        let Some(w) = dom::window() else {
            return;
        };
        if let Err(e) = w.open_with_url_and_target(url, "_blank") {
            tracing::warn!("could not open deep link: {e:?}");
        }
    }

    fn reset_form(&self) {
        self.form.reset();
    }
}

fn read_submission(doc: &Document) -> ContactSubmission {
    ContactSubmission {
        name: dom::field_value(doc, ElementId::Name),
        email: dom::field_value(doc, ElementId::Email),
        phone: dom::field_value(doc, ElementId::Phone),
        plan: dom::field_value(doc, ElementId::Plan),
        note: dom::field_value(doc, ElementId::Message),
    }
}

/// Mounts the notice slot inside the contact form and takes over its submit.
pub(super) fn wire(doc: &Document, config: &SiteConfig) -> bool {
    let Some(form) = dom::by_id_as::<HtmlFormElement>(doc, ElementId::ContactForm) else {
        return false;
    };

    let host: HtmlElement = form.clone().into();
    let doc = doc.clone();
    let config = config.clone();
    mount_to(host, move || view! { <ContactNotice form=form doc=doc config=config /> }).forget();
    true
}

#[component]
fn ContactNotice(form: HtmlFormElement, doc: Document, config: SiteConfig) -> impl IntoView {
    let notice = RwSignal::new(None::<Notice>);
    let notices = NoticeController::from_config(BrowserScheduler, &config, move |n: Option<&Notice>| {
        notice.set(n.cloned())
    });
    let handler = ContactHandler::new(
        BrowserScheduler,
        FormPage { form: form.clone() },
        notices,
        &config,
    );

    dom::listen(&form, "submit", move |ev| {
        ev.prevent_default();
        handler.submit(&read_submission(&doc));
    });

    view! { <NoticeSlot notice=notice /> }
}
