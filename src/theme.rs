//! Light/dark theme preference.
//!
//! The document attribute is the source of truth at click time; storage is
//! only read once at startup. The toggle icon always shows the mode a click
//! would switch to.

pub const THEME_ATTRIBUTE: &str = "data-bs-theme";
pub const TOGGLE_SPIN_MS: u32 = 300;
pub const TOGGLE_SPIN_TRANSFORM: &str = "rotate(360deg)";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }
}

/// The pieces of the page the theme controller reads and writes.
pub trait ThemeHost {
    fn stored_theme(&self) -> Option<String>;
    fn persist_theme(&mut self, theme: Theme);
    fn document_theme(&self) -> Option<String>;
    fn apply_theme(&mut self, theme: Theme);
    fn set_icon(&mut self, class: &str);
}

pub fn resolve_theme(stored: Option<&str>) -> Theme {
    stored.and_then(Theme::from_str).unwrap_or(Theme::Light)
}

pub fn initialize(host: &mut impl ThemeHost) -> Theme {
    let theme = resolve_theme(host.stored_theme().as_deref());
    host.apply_theme(theme);
    host.set_icon(theme.icon_class());
    theme
}

pub fn toggle(host: &mut impl ThemeHost) -> Theme {
    let current = match host.document_theme().as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    };
    let next = current.toggled();

    host.apply_theme(next);
    host.persist_theme(next);
    host.set_icon(next.icon_class());
    next
}
