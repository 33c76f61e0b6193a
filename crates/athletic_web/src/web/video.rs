use std::cell::RefCell;
use std::rc::Rc;

use athletic::video::{VideoCommand, VideoGallery};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlMediaElement, HtmlVideoElement, Node};

use super::dom;
use crate::ui_model::{class, VIDEO_ITEM_SELECTOR, VIDEO_OVERLAY_SELECTOR, VIDEO_SELECTOR};

struct VideoItem {
    overlay: Element,
    video: HtmlVideoElement,
}

/// Overlay click plays that video and pauses every other video on the page,
/// gallery or not; `ended` restores the overlay and poster.
pub(super) fn wire(doc: &Document) -> bool {
    let items: Vec<VideoItem> = dom::query_all(doc, VIDEO_ITEM_SELECTOR)
        .iter()
        .filter_map(|item| {
            let overlay = dom::query_in(item, VIDEO_OVERLAY_SELECTOR)?;
            let video = dom::query_in(item, "video")?
                .dyn_into::<HtmlVideoElement>()
                .ok()?;
            Some(VideoItem { overlay, video })
        })
        .collect();
    if items.is_empty() {
        return false;
    }

    let gallery = Rc::new(RefCell::new(VideoGallery::new(items.len())));
    let items = Rc::new(items);

    for (i, item) in items.iter().enumerate() {
        {
            let gallery = Rc::clone(&gallery);
            let items = Rc::clone(&items);
            let doc = doc.clone();
            dom::listen(&item.overlay, "click", move |_| {
                pause_outside_gallery(&doc, &items);
                let cmds = gallery.borrow_mut().play(i);
                apply(&items, &cmds);
            });
        }
        {
            let gallery = Rc::clone(&gallery);
            let items = Rc::clone(&items);
            dom::listen(&item.video, "ended", move |_| {
                let cmds = gallery.borrow_mut().ended(i);
                apply(&items, &cmds);
            });
        }
    }
    true
}

/// Hero or background videos are not gallery items but still stop.
fn pause_outside_gallery(doc: &Document, items: &[VideoItem]) {
    for el in dom::query_all(doc, VIDEO_SELECTOR) {
        let node: &Node = &el;
        if items.iter().any(|it| it.video.is_same_node(Some(node))) {
            continue;
        }
        if let Ok(media) = el.dyn_into::<HtmlMediaElement>() {
            let _ = media.pause();
        }
    }
}

fn apply(items: &[VideoItem], cmds: &[VideoCommand]) {
    for &cmd in cmds {
        match cmd {
            VideoCommand::HideOverlay(i) => dom::set_class(&items[i].overlay, class::HIDDEN, true),
            VideoCommand::ShowOverlay(i) => dom::set_class(&items[i].overlay, class::HIDDEN, false),
            VideoCommand::Play(i) => {
                if let Err(e) = items[i].video.play() {
                    tracing::warn!("video play failed: {e:?}");
                }
            }
            VideoCommand::Pause(i) => {
                let _ = items[i].video.pause();
            }
            VideoCommand::SetControls(i, on) => items[i].video.set_controls(on),
            VideoCommand::Reload(i) => items[i].video.load(),
        }
    }
}
