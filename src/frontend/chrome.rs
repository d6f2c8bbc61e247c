use super::{document, listen, page_offset, smooth_scroll_to};
use crate::config::UiConfig;
use crate::motion::{chrome_for_offset, NAVBAR_SCROLLED_CLASS, NAVBAR_SELECTOR};
use wasm_bindgen::JsCast;
use web_sys::{window, Event, HtmlElement, MouseEvent};

const BACK_TO_TOP_CLASS: &str = "btn btn-primary btn-floating back-to-top";
const BACK_TO_TOP_ICON: &str = "<i class=\"fas fa-arrow-up\"></i>";
const BACK_TO_TOP_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; width: 50px; \
    height: 50px; border-radius: 50%; display: none; z-index: 1000; border: none; \
    box-shadow: 0 4px 12px rgba(0,0,0,0.15);";

pub(super) fn install(config: &UiConfig) {
    let Some(document) = document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Some(button) = document
        .create_element("button")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    button.set_class_name(BACK_TO_TOP_CLASS);
    button.set_inner_html(BACK_TO_TOP_ICON);
    let _ = button.set_attribute("type", "button");
    let _ = button.set_attribute("aria-label", "Back to top");
    button.style().set_css_text(BACK_TO_TOP_STYLE);
    if body.append_child(&button).is_err() {
        return;
    }

    listen(&button, "click", |_: MouseEvent| smooth_scroll_to(0.0));

    let Some(win) = window() else {
        return;
    };
    let config = config.clone();
    listen(&win, "scroll", move |_: Event| {
        let state = chrome_for_offset(page_offset(), &config);
        let display = if state.back_to_top_visible { "block" } else { "none" };
        let _ = button.style().set_property("display", display);

        if let Some(navbar) = document.query_selector(NAVBAR_SELECTOR).ok().flatten() {
            let _ = navbar
                .class_list()
                .toggle_with_force(NAVBAR_SCROLLED_CLASS, state.navbar_scrolled);
        }
    });
}
