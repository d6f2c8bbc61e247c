use super::{document, listen, toast::ToastNotifier};
use crate::contact::{
    ContactFormSurface, ContactReply, ContactSubmission, ContactSubmitter, ContactTransport,
    CSRF_HEADER, FORM_CONTENT_TYPE, FORM_SELECTOR, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE,
    SUBMIT_SELECTOR,
};
use crate::logging::EventLog;
use crate::request::RequestFailure;
use gloo_net::http::Request;
use js_sys::Array;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, FormData, HtmlButtonElement, HtmlFormElement};

struct FetchContactTransport;

fn network_failure(error: gloo_net::Error) -> RequestFailure {
    RequestFailure::Network(error.to_string())
}

impl ContactTransport for FetchContactTransport {
    async fn post(&self, submission: &ContactSubmission) -> Result<ContactReply, RequestFailure> {
        let mut builder = Request::post(&submission.action)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE);
        if let Some(token) = submission.csrf_token() {
            builder = builder.header(CSRF_HEADER, token);
        }

        let response = builder
            .body(submission.encoded_body())
            .map_err(network_failure)?
            .send()
            .await
            .map_err(network_failure)?;

        response
            .json::<ContactReply>()
            .await
            .map_err(|error| RequestFailure::Decode(error.to_string()))
    }
}

struct DomContactForm {
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
}

impl ContactFormSurface for DomContactForm {
    fn submit_label(&self) -> String {
        self.button
            .as_ref()
            .map(|button| button.inner_html())
            .unwrap_or_default()
    }

    fn set_submit_busy(&self, label: &str) {
        if let Some(button) = &self.button {
            button.set_inner_html(label);
            button.set_disabled(true);
        }
    }

    fn restore_submit(&self, label: &str) {
        if let Some(button) = &self.button {
            button.set_inner_html(label);
            button.set_disabled(false);
        }
    }

    fn collect(&self) -> ContactSubmission {
        ContactSubmission::new(self.form.action(), form_fields(&self.form))
    }

    fn clear_fields(&self) {
        self.form.reset();
    }

    fn submit_natively(&self) {
        let _ = self.form.submit();
    }
}

/// Text entries of the form in document order; file inputs are skipped.
fn form_fields(form: &HtmlFormElement) -> Vec<(String, String)> {
    let Ok(data) = FormData::new_with_form(form) else {
        return Vec::new();
    };
    let Ok(Some(entries)) = js_sys::try_iter(data.as_ref()) else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair = entry.dyn_into::<Array>().ok()?;
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect()
}

pub(super) fn install(notifier: ToastNotifier, log: EventLog) {
    let Some(form) = document()
        .and_then(|d| d.query_selector(FORM_SELECTOR).ok().flatten())
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };

    let button = form
        .query_selector(SUBMIT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok());
    let surface = Rc::new(DomContactForm {
        form: form.clone(),
        button,
    });
    let submitter = Rc::new(ContactSubmitter::new());
    let notifier = Rc::new(notifier);

    listen(&form, "submit", move |event: Event| {
        event.prevent_default();

        let surface = surface.clone();
        let submitter = submitter.clone();
        let notifier = notifier.clone();
        spawn_local(async move {
            submitter
                .submit(&FetchContactTransport, &*surface, &*notifier, log)
                .await;
        });
    });
}
