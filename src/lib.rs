//! Popdown - dropdown controller
//!
//! A dropdown wraps a trigger element and toggles an overlay next to it. The
//! positioning itself is delegated to a [`PositioningEngine`]; the crate ships
//! [`HeadlessTrigger`], a renderer-free engine with click, hover, context-menu
//! and focus semantics.

mod config;
mod dropdown;
mod headless;
mod placements;
mod trigger;

pub use config::{ConfigError, DropdownConfig, LogLevel, DEFAULT_PREFIX};
pub use dropdown::{Dropdown, DropdownEvent, DropdownProps, Overlay, Visibility};
pub use headless::HeadlessTrigger;
pub use placements::{Align, AlignSpec, AnchorPoint, Edge, Overflow, Placement, Placements};
pub use trigger::{Action, ContainerResolver, Popup, PositioningEngine, TriggerProps};
