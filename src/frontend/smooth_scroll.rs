use super::{document, listen, page_offset, query_all, smooth_scroll_to};
use crate::config::UiConfig;
use crate::motion::{anchor_fragment, smooth_scroll_top, ANCHOR_SELECTOR};
use web_sys::MouseEvent;

pub(super) fn install(config: &UiConfig) {
    let header_offset = config.header_offset_px;

    for anchor in query_all(ANCHOR_SELECTOR) {
        let link = anchor.clone();
        listen(&anchor, "click", move |event: MouseEvent| {
            event.prevent_default();

            let href = link.get_attribute("href").unwrap_or_default();
            let Some(target) = anchor_fragment(&href)
                .and_then(|id| document().and_then(|d| d.get_element_by_id(id)))
            else {
                return;
            };

            let element_top = target.get_bounding_client_rect().top();
            smooth_scroll_to(smooth_scroll_top(element_top, page_offset(), header_offset));
        });
    }
}
