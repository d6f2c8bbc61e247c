use super::{elements, query_all};
use crate::logging::{EventLog, LogLevel};
use crate::motion::{
    bar_refill_width, counter_label, counter_step_ms, counter_target, CounterAnimation,
    BAR_CLAIMED_ATTRIBUTE, BAR_REFILL_DELAY_MS, PROGRESS_BAR_SELECTOR, REVEAL_ROOT_MARGIN,
    REVEAL_SELECTOR, REVEAL_THRESHOLD, SKILL_ITEM_SELECTOR, SKILL_LABEL_SELECTOR, VISIBLE_CLASS,
};
use gloo_timers::{callback::Timeout, future::TimeoutFuture};
use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

pub(super) fn install(log: EventLog) {
    let targets = query_all(REVEAL_SELECTOR);
    if targets.is_empty() {
        return;
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                observer.unobserve(&target);
                reveal(&target);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        log.emit(
            LogLevel::Warn,
            "reveal_observer_unavailable",
            json!({ "targets": targets.len() }),
        );
        return;
    };
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
}

fn reveal(section: &Element) {
    let _ = section.class_list().add_1(VISIBLE_CLASS);

    let Ok(bars) = section.query_selector_all(PROGRESS_BAR_SELECTOR) else {
        return;
    };
    for bar in elements(bars) {
        if let Ok(bar) = bar.dyn_into::<HtmlElement>() {
            refill(bar);
        }
    }
}

fn refill(bar: HtmlElement) {
    let inline_width = bar.style().get_property_value("width").unwrap_or_default();
    let Some(width) = bar_refill_width(
        bar.get_attribute(BAR_CLAIMED_ATTRIBUTE).as_deref(),
        &inline_width,
    ) else {
        return;
    };
    let _ = bar.set_attribute(BAR_CLAIMED_ATTRIBUTE, &width);
    let _ = bar.style().set_property("width", "0%");

    Timeout::new(BAR_REFILL_DELAY_MS, move || {
        let _ = bar.style().set_property("width", &width);

        let label = bar
            .closest(SKILL_ITEM_SELECTOR)
            .ok()
            .flatten()
            .and_then(|item| item.query_selector(SKILL_LABEL_SELECTOR).ok().flatten());
        if let (Some(label), Some(target)) = (label, counter_target(&width)) {
            spawn_local(count_up(label, target));
        }
    })
    .forget();
}

async fn count_up(label: Element, target: u32) {
    for value in CounterAnimation::new(target) {
        TimeoutFuture::new(counter_step_ms()).await;
        label.set_text_content(Some(&counter_label(value)));
    }
}
