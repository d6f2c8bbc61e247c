//! Background submission of the contact form.
//!
//! The form is posted form-encoded with the CSRF token echoed in a header.
//! A JSON reply drives a toast; anything else (network error, HTML instead
//! of JSON) falls back to one native submission of the same form, after the
//! submit button has been restored.

use crate::logging::{EventLog, LogLevel};
use crate::request::RequestFailure;
use crate::toast::{Notifier, Severity};
use serde::Deserialize;
use serde_json::json;
use std::cell::RefCell;

pub const FORM_SELECTOR: &str = ".contact-form-element";
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
pub const SENDING_LABEL: &str = "<i class=\"fas fa-spinner fa-spin me-2\"></i>Sending...";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContactReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactSubmission {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl ContactSubmission {
    pub fn new(action: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            action: action.into(),
            fields,
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == CSRF_FIELD)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn encoded_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn post(&self, submission: &ContactSubmission) -> Result<ContactReply, RequestFailure>;
}

/// The contact form element and its submit button.
pub trait ContactFormSurface {
    fn submit_label(&self) -> String;
    fn set_submit_busy(&self, label: &str);
    fn restore_submit(&self, label: &str);
    fn collect(&self) -> ContactSubmission;
    fn clear_fields(&self);
    /// Submits without going through the intercepting handler.
    fn submit_natively(&self);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting {
        original_label: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Delivered,
    Rejected,
    FellBack,
}

#[derive(Debug, Default)]
pub struct ContactSubmitter {
    phase: RefCell<SubmitPhase>,
}

impl ContactSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.borrow().clone()
    }

    pub async fn submit(
        &self,
        transport: &impl ContactTransport,
        form: &impl ContactFormSurface,
        notifier: &impl Notifier,
        log: EventLog,
    ) -> SubmitOutcome {
        if matches!(*self.phase.borrow(), SubmitPhase::Submitting { .. }) {
            log.emit(LogLevel::Debug, "contact_submit_ignored", json!({}));
            return SubmitOutcome::Ignored;
        }

        let original_label = form.submit_label();
        *self.phase.borrow_mut() = SubmitPhase::Submitting { original_label };
        form.set_submit_busy(SENDING_LABEL);

        let submission = form.collect();
        log.emit(
            LogLevel::Debug,
            "contact_submit_started",
            json!({
                "fields": submission.fields.len(),
                "csrf_token_present": submission.csrf_token().is_some(),
            }),
        );

        let outcome = match transport.post(&submission).await {
            Ok(reply) if reply.success => {
                notifier.notify(SENT_MESSAGE, Severity::Success);
                form.clear_fields();
                log.emit(LogLevel::Info, "contact_submit_delivered", json!({}));
                SubmitOutcome::Delivered
            }
            Ok(reply) => {
                notifier.notify(FAILED_MESSAGE, Severity::Error);
                log.emit(
                    LogLevel::Warn,
                    "contact_submit_rejected",
                    json!({ "message": reply.message }),
                );
                SubmitOutcome::Rejected
            }
            Err(failure) => {
                log.emit(
                    LogLevel::Warn,
                    "contact_submit_fallback",
                    json!({ "error_class": failure.as_str(), "detail": failure.detail() }),
                );
                SubmitOutcome::FellBack
            }
        };

        let finished = std::mem::take(&mut *self.phase.borrow_mut());
        if let SubmitPhase::Submitting { original_label } = finished {
            form.restore_submit(&original_label);
        }

        if outcome == SubmitOutcome::FellBack {
            form.submit_natively();
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedTransport {
        reply: Result<ContactReply, RequestFailure>,
        posts: RefCell<Vec<ContactSubmission>>,
    }

    impl ScriptedTransport {
        fn new(reply: Result<ContactReply, RequestFailure>) -> Self {
            Self {
                reply,
                posts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ContactTransport for ScriptedTransport {
        async fn post(
            &self,
            submission: &ContactSubmission,
        ) -> Result<ContactReply, RequestFailure> {
            self.posts.borrow_mut().push(submission.clone());
            tokio::task::yield_now().await;
            self.reply.clone()
        }
    }

    struct FakeForm {
        label: RefCell<String>,
        disabled: RefCell<bool>,
        fields: RefCell<Vec<(String, String)>>,
        journal: RefCell<Vec<String>>,
    }

    impl FakeForm {
        fn filled() -> Self {
            Self {
                label: RefCell::new("Send Message".to_string()),
                disabled: RefCell::new(false),
                fields: RefCell::new(vec![
                    (CSRF_FIELD.to_string(), "tok-123".to_string()),
                    ("name".to_string(), "Ada".to_string()),
                    ("message".to_string(), "Hello & welcome".to_string()),
                ]),
                journal: RefCell::new(Vec::new()),
            }
        }

        fn journal(&self) -> Vec<String> {
            self.journal.borrow().clone()
        }
    }

    impl ContactFormSurface for FakeForm {
        fn submit_label(&self) -> String {
            self.label.borrow().clone()
        }

        fn set_submit_busy(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
            *self.disabled.borrow_mut() = true;
        }

        fn restore_submit(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
            *self.disabled.borrow_mut() = false;
            self.journal.borrow_mut().push("restore".to_string());
        }

        fn collect(&self) -> ContactSubmission {
            ContactSubmission::new("/contact/", self.fields.borrow().clone())
        }

        fn clear_fields(&self) {
            self.fields.borrow_mut().retain(|(name, _)| name == CSRF_FIELD);
        }

        fn submit_natively(&self) {
            self.journal.borrow_mut().push("native".to_string());
        }
    }

    #[derive(Default)]
    struct ToastTray {
        shown: RefCell<Vec<(String, Severity)>>,
    }

    impl Notifier for ToastTray {
        fn notify(&self, message: &str, severity: Severity) {
            self.shown.borrow_mut().push((message.to_string(), severity));
        }
    }

    fn quiet() -> EventLog {
        EventLog::new(LogLevel::Error)
    }

    fn reply(success: bool) -> Result<ContactReply, RequestFailure> {
        Ok(ContactReply {
            success,
            message: None,
        })
    }

    #[tokio::test]
    async fn delivered_message_clears_fields_and_toasts_success() {
        let submitter = ContactSubmitter::new();
        let transport = ScriptedTransport::new(reply(true));
        let form = FakeForm::filled();
        let tray = ToastTray::default();

        let outcome = submitter.submit(&transport, &form, &tray, quiet()).await;

        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(form.fields.borrow().len(), 1);
        assert_eq!(*tray.shown.borrow(), vec![(SENT_MESSAGE.to_string(), Severity::Success)]);
        assert_eq!(*form.label.borrow(), "Send Message");
        assert!(!*form.disabled.borrow());
        assert_eq!(submitter.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn rejected_message_keeps_fields_and_toasts_error() {
        let submitter = ContactSubmitter::new();
        let transport = ScriptedTransport::new(reply(false));
        let form = FakeForm::filled();
        let tray = ToastTray::default();

        let outcome = submitter.submit(&transport, &form, &tray, quiet()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(form.fields.borrow().len(), 3);
        assert_eq!(*tray.shown.borrow(), vec![(FAILED_MESSAGE.to_string(), Severity::Error)]);
        assert_eq!(form.journal(), vec!["restore"]);
    }

    #[tokio::test]
    async fn transport_failure_restores_then_submits_natively_once() {
        let submitter = ContactSubmitter::new();
        let transport = ScriptedTransport::new(Err(RequestFailure::Network("offline".to_string())));
        let form = FakeForm::filled();
        let tray = ToastTray::default();

        let outcome = submitter.submit(&transport, &form, &tray, quiet()).await;

        assert_eq!(outcome, SubmitOutcome::FellBack);
        assert_eq!(transport.posts.borrow().len(), 1);
        assert_eq!(form.journal(), vec!["restore", "native"]);
        assert_eq!(*form.label.borrow(), "Send Message");
        assert!(tray.shown.borrow().is_empty());
    }

    #[tokio::test]
    async fn undecodable_reply_takes_the_fallback_path() {
        let submitter = ContactSubmitter::new();
        let transport =
            ScriptedTransport::new(Err(RequestFailure::Decode("expected value".to_string())));
        let form = FakeForm::filled();

        let outcome = submitter
            .submit(&transport, &form, &ToastTray::default(), quiet())
            .await;

        assert_eq!(outcome, SubmitOutcome::FellBack);
        assert_eq!(form.journal(), vec!["restore", "native"]);
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_ignored() {
        let submitter = ContactSubmitter::new();
        let transport = ScriptedTransport::new(reply(true));
        let form = FakeForm::filled();
        let tray = ToastTray::default();

        let (first, second) = tokio::join!(
            submitter.submit(&transport, &form, &tray, quiet()),
            submitter.submit(&transport, &form, &tray, quiet()),
        );

        assert_eq!(first, SubmitOutcome::Delivered);
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(transport.posts.borrow().len(), 1);
        assert_eq!(*form.label.borrow(), "Send Message");
    }

    #[test]
    fn submission_encodes_fields_and_finds_csrf_token() {
        let submission = FakeForm::filled().collect();

        assert_eq!(submission.csrf_token(), Some("tok-123"));
        assert_eq!(
            submission.encoded_body(),
            "csrfmiddlewaretoken=tok-123&name=Ada&message=Hello+%26+welcome"
        );
    }

    #[test]
    fn blank_csrf_token_is_treated_as_missing() {
        let submission = ContactSubmission::new(
            "/contact/",
            vec![(CSRF_FIELD.to_string(), String::new())],
        );

        assert_eq!(submission.csrf_token(), None);
    }

    #[tokio::test]
    async fn reply_without_success_flag_is_rejected_not_resubmitted() {
        let parsed: ContactReply =
            serde_json::from_str(r#"{"message": "Form invalid"}"#).expect("reply parses");
        let submitter = ContactSubmitter::new();
        let transport = ScriptedTransport::new(Ok(parsed));
        let form = FakeForm::filled();
        let tray = ToastTray::default();

        let outcome = submitter.submit(&transport, &form, &tray, quiet()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(form.journal(), vec!["restore"]);
        assert_eq!(*tray.shown.borrow(), vec![(FAILED_MESSAGE.to_string(), Severity::Error)]);
    }

    #[test]
    fn reply_parses_server_json() {
        let parsed: ContactReply = serde_json::from_str(
            r#"{"success": false, "message": "Please correct the errors below.", "errors": {}}"#,
        )
        .expect("reply parses");

        assert!(!parsed.success);
        assert_eq!(parsed.message.as_deref(), Some("Please correct the errors below."));
    }
}
