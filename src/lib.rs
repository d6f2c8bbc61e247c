//! Progressive enhancement for the server-rendered portfolio pages.
//!
//! Everything that decides *what* happens lives in target-independent
//! modules; the `frontend` module binds them to the browser DOM and is only
//! built for `wasm32`.

pub mod cards;
pub mod config;
pub mod contact;
pub mod logging;
pub mod motion;
pub mod paginator;
pub mod request;
pub mod theme;
pub mod toast;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
