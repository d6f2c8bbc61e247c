use super::{bootstrap_component, document, listen, query_all};
use crate::logging::{EventLog, LogLevel};
use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event, HtmlElement, MouseEvent};

const LOADING_SCREEN_ID: &str = "loading-screen";
const FADE_OUT_CLASS: &str = "fade-out";
const LOADING_SCREEN_REMOVE_MS: u32 = 600;
const CARD_SELECTOR: &str = ".card";
const CARD_LIFTED: &str = "translateY(-5px)";
const CARD_RESTING: &str = "translateY(0)";
const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

pub(super) fn install_loading_screen() {
    let Some(document) = document() else {
        return;
    };
    let Some(screen) = document.get_element_by_id(LOADING_SCREEN_ID) else {
        return;
    };

    if document.ready_state() == "complete" {
        dismiss_loading_screen(screen);
        return;
    }

    let Some(win) = window() else {
        return;
    };
    let mut pending = Some(screen);
    listen(&win, "load", move |_: Event| {
        if let Some(screen) = pending.take() {
            dismiss_loading_screen(screen);
        }
    });
}

fn dismiss_loading_screen(screen: Element) {
    let _ = screen.class_list().add_1(FADE_OUT_CLASS);
    Timeout::new(LOADING_SCREEN_REMOVE_MS, move || screen.remove()).forget();
}

pub(super) fn install_card_hover() {
    for card in query_all(CARD_SELECTOR) {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };

        let lifted = card.clone();
        listen(&card, "mouseenter", move |_: MouseEvent| {
            let _ = lifted.style().set_property("transform", CARD_LIFTED);
        });

        let resting = card.clone();
        listen(&card, "mouseleave", move |_: MouseEvent| {
            let _ = resting.style().set_property("transform", CARD_RESTING);
        });
    }
}

pub(super) fn install_tooltips(log: EventLog) {
    let triggers = query_all(TOOLTIP_SELECTOR);
    if triggers.is_empty() {
        return;
    }

    let created = triggers
        .iter()
        .filter(|trigger| bootstrap_component("Tooltip", trigger).is_some())
        .count();
    if created == 0 {
        log.emit(
            LogLevel::Debug,
            "bootstrap_missing",
            json!({ "component": "Tooltip", "elements": triggers.len() }),
        );
    }
}
