//! View layer for NearMe: state container, rendering and the session that
//! drives one resolve-then-fetch run.

pub mod error_mapping;
pub mod render;
pub mod session;
pub mod state;

pub use error_mapping::IntoAppError;
pub use render::{render, Block, PlaceItem, View};
pub use session::Session;
pub use state::{SessionMessage, ViewState};
