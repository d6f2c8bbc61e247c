pub const CONTAINER_SELECTOR: &str = ".toast-container";
pub const CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";
pub const CONTAINER_Z_INDEX: &str = "9999";
pub const HIDDEN_EVENT: &str = "hidden.bs.toast";
/// Used only when Bootstrap is not loaded and cannot hide the toast itself.
pub const FALLBACK_HIDE_MS: u32 = 5_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn palette(self) -> &'static str {
        match self {
            Self::Info => "primary",
            Self::Success => "success",
            Self::Error => "danger",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "info-circle",
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn widget_class(&self) -> String {
        format!(
            "toast align-items-center text-bg-{} border-0",
            self.severity.palette()
        )
    }

    pub fn icon_class(&self) -> String {
        format!("fas fa-{} me-2", self.severity.icon())
    }
}

/// Something that can put a message in front of the visitor.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Toasts currently in the document, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    last_stamp: u64,
}

impl ToastStack {
    /// Adds a toast whose id derives from `now_millis`, bumped past the
    /// previous stamp so ids stay unique within one millisecond.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now_millis: u64,
    ) -> &Toast {
        let stamp = now_millis.max(self.last_stamp.saturating_add(1));
        self.last_stamp = stamp;
        self.toasts.push(Toast {
            id: format!("toast-{stamp}"),
            message: message.into(),
            severity,
        });
        &self.toasts[self.toasts.len() - 1]
    }

    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
