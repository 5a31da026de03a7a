//! popdown_ui - UI-tree primitives for popup widgets
//!
//! This crate provides element descriptors, message callbacks, geometry and
//! mounted-node handles. It does not render anything; a positioning engine
//! consumes the descriptors and reports interaction back as messages.

mod macros;
mod callback;
mod dom;
mod element;
mod event;
mod geometry;
mod text_metrics;

pub use callback::Callback;
pub use dom::DomNode;
pub use element::{class_names, Element, ElementProps, PropOverrides, RenderTarget, Style};
pub use event::{ClickEvent, Event, MouseButton};
pub use geometry::{Bounds, Point, Size};
pub use text_metrics::TextMetrics;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::dom::DomNode;
    pub use crate::element::{Element, PropOverrides, RenderTarget, Style};
    pub use crate::event::{ClickEvent, Event, MouseButton};
    pub use crate::geometry::{Bounds, Point, Size};
}
