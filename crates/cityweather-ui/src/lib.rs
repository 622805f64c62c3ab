//! Headless presentation layer for cityweather.
//!
//! [`Session`] owns the widget state and runs the two flows (language
//! changes and weather lookups); [`ViewState`] is what a front end draws.

pub mod error;
mod error_mapping;
pub mod render;
pub mod session;
pub mod view;

pub use error::SessionError;
pub use render::{Renderer, ICON_SIZE_PX};
pub use session::{FailureKind, LanguageChange, Session, SubmitOutcome};
pub use view::{IconView, InterfaceText, MapView, RenderedWeather, ResultPanel, SubmitControl, ViewState};
