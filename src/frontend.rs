use crate::config::UiConfig;
use crate::logging::{EventLog, LogLevel};
use js_sys::{Array, Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, NodeList, ScrollBehavior,
    ScrollToOptions,
};

mod chrome;
mod contact;
mod extras;
mod projects;
mod reveal;
mod smooth_scroll;
mod theme;
mod toast;

fn document() -> Option<Document> {
    window()?.document()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|document| document.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

fn body_data(key: &str) -> Option<String> {
    document()?.body()?.dataset().get(key)
}

/// Registers `handler` for the lifetime of the page.
fn listen<E>(target: &EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });

    if target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_ok()
    {
        callback.forget();
    }
}

fn page_offset() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

/// `new bootstrap[name](element)`, or `None` when Bootstrap is not loaded.
fn bootstrap_component(name: &str, element: &Element) -> Option<JsValue> {
    let win: JsValue = window()?.into();
    let bootstrap = Reflect::get(&win, &JsValue::from_str("bootstrap")).ok()?;
    if bootstrap.is_undefined() || bootstrap.is_null() {
        return None;
    }

    let constructor = Reflect::get(&bootstrap, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    Reflect::construct(&constructor, &Array::of1(element.as_ref())).ok()
}

fn call_method(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|method| method.dyn_into::<Function>().ok())
        .map(|method| method.call0(target).is_ok())
        .unwrap_or(false)
}

pub fn run() {
    let Some(document) = document() else {
        return;
    };

    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", |_: Event| start());
    } else {
        start();
    }
}

fn start() {
    let config = UiConfig::from_lookup(body_data);
    let log = EventLog::new(config.log_level);

    theme::install(&config, log);
    extras::install_loading_screen();
    reveal::install(log);
    smooth_scroll::install(&config);

    let notifier = toast::ToastNotifier::new(log);
    contact::install(notifier, log);

    chrome::install(&config);
    extras::install_card_hover();
    extras::install_tooltips(log);
    projects::install(&config, log);

    log.emit(
        LogLevel::Info,
        "enhancements_ready",
        json!({ "theme_key": config.theme_storage_key, "endpoint": config.projects_endpoint }),
    );
}
