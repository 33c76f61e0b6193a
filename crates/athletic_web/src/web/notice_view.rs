use athletic::notice::{Notice, NoticeKind, NoticePhase};
use leptos::prelude::*;

fn notice_style(n: &Notice) -> String {
    let colors = match n.kind {
        NoticeKind::Success => "background: #d1fae5; color: #065f46; border: 1px solid #6ee7b7;",
        NoticeKind::Error => "background: #fee2e2; color: #991b1b; border: 1px solid #fca5a5;",
    };
    let animation = match n.phase {
        NoticePhase::Visible => "slideDown",
        NoticePhase::Leaving => "slideUp",
    };
    format!(
        "padding: 1rem 1.5rem; margin-top: 1rem; border-radius: 0.5rem; font-weight: 500; \
         white-space: pre-line; animation: {animation} 0.3s ease; {colors}"
    )
}

/// Renders the single form notice, if any.
#[component]
pub(super) fn NoticeSlot(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some) fallback=|| ()>
            {move || {
                notice
                    .get()
                    .map(|n| {
                        let class = n.class();
                        let style = notice_style(&n);
                        view! {
                            <div class=class style=style role="status" aria-live="polite">
                                {n.text}
                            </div>
                        }
                    })
            }}
        </Show>
    }
}
