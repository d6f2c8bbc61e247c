use super::{document, listen};
use crate::config::UiConfig;
use crate::logging::{EventLog, LogLevel};
use crate::theme::{
    self as preference, Theme, ThemeHost, THEME_ATTRIBUTE, TOGGLE_SPIN_MS, TOGGLE_SPIN_TRANSFORM,
};
use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, MouseEvent, Storage};

const TOGGLE_ID: &str = "theme-toggle-nav";
const ICON_ID: &str = "theme-icon";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

struct DomThemeHost {
    root: Element,
    storage: Option<Storage>,
    storage_key: String,
}

impl ThemeHost for DomThemeHost {
    fn stored_theme(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(&self.storage_key).ok().flatten()
    }

    fn persist_theme(&mut self, theme: Theme) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(&self.storage_key, theme.as_str());
        }
    }

    fn document_theme(&self) -> Option<String> {
        self.root.get_attribute(THEME_ATTRIBUTE)
    }

    fn apply_theme(&mut self, theme: Theme) {
        let _ = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    fn set_icon(&mut self, class: &str) {
        if let Some(icon) = document().and_then(|d| d.get_element_by_id(ICON_ID)) {
            icon.set_class_name(class);
        }
    }
}

pub(super) fn install(config: &UiConfig, log: EventLog) {
    let Some(document) = document() else {
        return;
    };
    let Some(root) = document.document_element() else {
        return;
    };

    let mut host = DomThemeHost {
        root,
        storage: local_storage(),
        storage_key: config.theme_storage_key.clone(),
    };
    let initial = preference::initialize(&mut host);
    log.emit(LogLevel::Debug, "theme_applied", json!({ "theme": initial.as_str() }));

    let Some(trigger) = document
        .get_element_by_id(TOGGLE_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let spinning = trigger.clone();
    listen(&trigger, "click", move |_: MouseEvent| {
        let next = preference::toggle(&mut host);
        spin(&spinning);
        log.emit(LogLevel::Info, "theme_toggled", json!({ "theme": next.as_str() }));
    });
}

fn spin(trigger: &HtmlElement) {
    let style = trigger.style();
    let _ = style.set_property("transform", TOGGLE_SPIN_TRANSFORM);

    Timeout::new(TOGGLE_SPIN_MS, move || {
        let _ = style.remove_property("transform");
    })
    .forget();
}
