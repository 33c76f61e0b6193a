use athletic::bmi::{BmiResult, Measurement};
use web_sys::Document;

use super::dom;
use crate::ui_model::{class, ElementId};

pub(super) fn wire(doc: &Document) -> bool {
    let Some(form) = dom::by_id(doc, ElementId::BmiForm) else {
        return false;
    };

    let doc = doc.clone();
    dom::listen(&form, "submit", move |ev| {
        ev.prevent_default();
        let weight = dom::field_value(&doc, ElementId::Weight);
        let height = dom::field_value(&doc, ElementId::Height);
        match Measurement::parse(&weight, &height) {
            Ok(m) => render(&doc, &m.classify()),
            // No result panel for unusable input.
            Err(e) => tracing::debug!("bmi input ignored: {e}"),
        }
    });
    true
}

fn render(doc: &Document, result: &BmiResult) {
    if let Some(status) = dom::by_id(doc, ElementId::BmiStatus) {
        status.set_class_name(class::BMI_STATUS);
        dom::set_class(&status, result.status_class, true);
        status.set_text_content(Some(result.category.label()));
    }
    if let Some(value) = dom::by_id(doc, ElementId::BmiValue) {
        value.set_text_content(Some(&result.display_value()));
    }
    if let Some(message) = dom::by_id(doc, ElementId::BmiMessage) {
        message.set_inner_html(&result.advice.to_html());
    }
    if let Some(marker) = dom::by_id(doc, ElementId::BmiMarker) {
        dom::set_style(&marker, "left", &result.marker_left());
    }
    if let Some(panel) = dom::by_id(doc, ElementId::BmiResult) {
        let _ = panel.set_attribute("data-plan", result.plan.as_str());
        dom::set_style(&panel, "--bmi-bucket-width", &result.bucket_width_css());
        dom::set_class(&panel, class::HIDDEN, false);
    }
}
