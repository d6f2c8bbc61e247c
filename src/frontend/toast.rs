use super::{bootstrap_component, call_method, document};
use crate::logging::{now_unix_millis, EventLog, LogLevel};
use crate::toast::{
    Notifier, Severity, Toast, ToastStack, CONTAINER_CLASS, CONTAINER_SELECTOR,
    CONTAINER_Z_INDEX, FALLBACK_HIDE_MS, HIDDEN_EVENT,
};
use gloo_timers::callback::Timeout;
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement};
use yew::prelude::*;
use yew::AppHandle;

pub(super) enum ToastMsg {
    Push { message: String, severity: Severity },
    Dismiss(String),
}

pub(super) struct ToastStackView {
    stack: ToastStack,
}

impl Component for ToastStackView {
    type Message = ToastMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stack: ToastStack::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ToastMsg::Push { message, severity } => {
                self.stack.push(message, severity, now_unix_millis());
                true
            }
            ToastMsg::Dismiss(id) => self.stack.dismiss(&id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_hidden = ctx.link().callback(ToastMsg::Dismiss);

        html! {
            <>
                { for self.stack.toasts().iter().map(|toast| html! {
                    <ToastWidget key={toast.id.clone()} toast={toast.clone()} on_hidden={on_hidden.clone()} />
                }) }
            </>
        }
    }
}

#[derive(Properties, PartialEq)]
struct ToastWidgetProps {
    toast: Toast,
    on_hidden: Callback<String>,
}

/// Keeps the `hidden.bs.toast` listener attached while the widget is mounted.
struct HiddenListener {
    element: Element,
    callback: Closure<dyn FnMut(Event)>,
}

impl HiddenListener {
    fn attach(element: Element, id: String, on_hidden: Callback<String>) -> Self {
        let hidden_id = id.clone();
        let hidden = on_hidden.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            // Unmounting drops this closure; defer so it is not dropped mid-call.
            let id = hidden_id.clone();
            let hidden = hidden.clone();
            spawn_local(async move { hidden.emit(id) });
        });
        let _ = element
            .add_event_listener_with_callback(HIDDEN_EVENT, callback.as_ref().unchecked_ref());

        let shown = bootstrap_component("Toast", &element)
            .map(|toast| call_method(&toast, "show"))
            .unwrap_or(false);
        if !shown {
            let _ = element.class_list().add_1("show");
            Timeout::new(FALLBACK_HIDE_MS, move || on_hidden.emit(id)).forget();
        }

        Self { element, callback }
    }
}

impl Drop for HiddenListener {
    fn drop(&mut self) {
        let _ = self
            .element
            .remove_event_listener_with_callback(
                HIDDEN_EVENT,
                self.callback.as_ref().unchecked_ref(),
            );
    }
}

#[function_component(ToastWidget)]
fn toast_widget(props: &ToastWidgetProps) -> Html {
    let node = use_node_ref();

    {
        let node = node.clone();
        let id = props.toast.id.clone();
        let on_hidden = props.on_hidden.clone();
        use_effect_with((), move |_| {
            let listener = node
                .cast::<Element>()
                .map(|element| HiddenListener::attach(element, id, on_hidden));
            move || drop(listener)
        });
    }

    let toast = &props.toast;
    html! {
        <div
            ref={node}
            id={toast.id.clone()}
            class={toast.widget_class()}
            role="alert"
            aria-live="assertive"
            aria-atomic="true"
        >
            <div class="d-flex">
                <div class="toast-body">
                    <i class={toast.icon_class()}></i>
                    {toast.message.clone()}
                </div>
                <button
                    type="button"
                    class="btn-close btn-close-white me-2 m-auto"
                    data-bs-dismiss="toast"
                    aria-label="Close"
                ></button>
            </div>
        </div>
    }
}

/// Mounts the toast stack on first use and forwards messages to it.
#[derive(Clone)]
pub(super) struct ToastNotifier {
    app: Rc<RefCell<Option<AppHandle<ToastStackView>>>>,
    log: EventLog,
}

impl ToastNotifier {
    pub(super) fn new(log: EventLog) -> Self {
        Self {
            app: Rc::new(RefCell::new(None)),
            log,
        }
    }

    fn mount() -> Option<AppHandle<ToastStackView>> {
        let document = document()?;
        let container = match document.query_selector(CONTAINER_SELECTOR).ok().flatten() {
            Some(container) => container,
            None => {
                let container = document.create_element("div").ok()?;
                container.set_class_name(CONTAINER_CLASS);
                if let Some(styled) = container.dyn_ref::<HtmlElement>() {
                    let _ = styled.style().set_property("z-index", CONTAINER_Z_INDEX);
                }
                document.body()?.append_child(&container).ok()?;
                container
            }
        };

        // Server-rendered toasts may already live in the container; render
        // beside them instead of replacing them.
        let host = document.create_element("div").ok()?;
        let _ = host.set_attribute("style", "display: contents");
        container.append_child(&host).ok()?;

        Some(yew::Renderer::<ToastStackView>::with_root(host).render())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let mut app = self.app.borrow_mut();
        if app.is_none() {
            *app = Self::mount();
        }

        let Some(handle) = app.as_ref() else {
            self.log.emit(LogLevel::Warn, "toast_container_unavailable", json!({}));
            return;
        };

        handle.send_message(ToastMsg::Push {
            message: message.to_string(),
            severity,
        });
        self.log.emit(
            LogLevel::Debug,
            "toast_shown",
            json!({ "severity": severity.as_str() }),
        );
    }
}
