//! Contract between a popup widget and the engine that positions it.
//!
//! The engine owns placement, show/hide timing and the mounted nodes. Widgets
//! describe what they want through [`TriggerProps`] on every render and get
//! interaction back as messages.

use std::fmt;
use std::rc::Rc;

use popdown_ui::{Callback, DomNode, Element, Event, Style};
use serde::{Deserialize, Serialize};

use crate::placements::{Align, Placement, Placements};

/// Interaction kinds that can show or hide a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Pointer enters to show, leaves to hide.
    Hover,
    /// Click on the trigger toggles; click outside hides.
    Click,
    /// Secondary click on the trigger shows.
    ContextMenu,
    /// Focus shows, blur hides.
    Focus,
    MouseEnter,
    MouseLeave,
    Blur,
}

/// Resolves the node a popup is attached to, given the trigger's root node.
pub type ContainerResolver = Rc<dyn Fn(&DomNode) -> DomNode>;

/// Popup content: a concrete element, or a factory the engine calls when it
/// actually renders the popup.
pub enum Popup<M> {
    Node(Element<M>),
    Lazy(Rc<dyn Fn() -> Element<M>>),
}

impl<M> Popup<M> {
    /// Produce the element to render. Factories run on every call.
    pub fn resolve(&self) -> Element<M> {
        match self {
            Popup::Node(element) => element.clone(),
            Popup::Lazy(factory) => factory(),
        }
    }
}

impl<M> Clone for Popup<M> {
    fn clone(&self) -> Self {
        match self {
            Popup::Node(element) => Popup::Node(element.clone()),
            Popup::Lazy(factory) => Popup::Lazy(factory.clone()),
        }
    }
}

impl<M> fmt::Debug for Popup<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Popup::Node(element) => f.debug_tuple("Node").field(element).finish(),
            Popup::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Everything the engine needs to render a trigger and its popup.
pub struct TriggerProps<M> {
    pub prefix_cls: String,
    pub children: Element<M>,
    pub popup: Popup<M>,
    pub builtin_placements: Placements,
    pub action: Vec<Action>,
    pub show_action: Vec<Action>,
    pub hide_action: Vec<Action>,
    pub popup_placement: Placement,
    pub popup_align: Option<Align>,
    pub popup_transition_name: Option<String>,
    pub popup_animation: Option<String>,
    pub popup_visible: bool,
    pub popup_class_name: String,
    pub popup_style: Style,
    pub align_point: bool,
    pub on_popup_visible_change: Callback<bool, M>,
    pub after_popup_visible_change: Callback<bool, M>,
    pub get_popup_container: Option<ContainerResolver>,
}

impl<M> TriggerProps<M> {
    fn acts_on(&self, action: Action) -> bool {
        self.action.contains(&action)
    }

    pub fn is_click_to_show(&self) -> bool {
        self.acts_on(Action::Click) || self.show_action.contains(&Action::Click)
    }

    pub fn is_click_to_hide(&self) -> bool {
        self.acts_on(Action::Click) || self.hide_action.contains(&Action::Click)
    }

    pub fn is_context_menu_to_show(&self) -> bool {
        self.acts_on(Action::ContextMenu) || self.show_action.contains(&Action::ContextMenu)
    }

    pub fn is_mouse_enter_to_show(&self) -> bool {
        self.acts_on(Action::Hover) || self.show_action.contains(&Action::MouseEnter)
    }

    pub fn is_mouse_leave_to_hide(&self) -> bool {
        self.acts_on(Action::Hover) || self.hide_action.contains(&Action::MouseLeave)
    }

    pub fn is_focus_to_show(&self) -> bool {
        self.acts_on(Action::Focus) || self.show_action.contains(&Action::Focus)
    }

    pub fn is_blur_to_hide(&self) -> bool {
        self.acts_on(Action::Focus) || self.hide_action.contains(&Action::Blur)
    }
}

impl<M> fmt::Debug for TriggerProps<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerProps")
            .field("prefix_cls", &self.prefix_cls)
            .field("children", &self.children)
            .field("popup", &self.popup)
            .field("action", &self.action)
            .field("show_action", &self.show_action)
            .field("hide_action", &self.hide_action)
            .field("popup_placement", &self.popup_placement)
            .field("popup_align", &self.popup_align)
            .field("popup_visible", &self.popup_visible)
            .field("popup_class_name", &self.popup_class_name)
            .field("popup_style", &self.popup_style)
            .field("align_point", &self.align_point)
            .finish_non_exhaustive()
    }
}

/// The primitive that positions a popup next to its trigger.
pub trait PositioningEngine<M> {
    /// Re-render with new props.
    fn update(&mut self, props: TriggerProps<M>);

    /// Translate raw input into messages from the current props' handlers.
    fn on_event(&mut self, event: &Event) -> Vec<M>;

    /// Deliver `after_popup_visible_change` for transitions that have finished.
    fn poll_transitions(&mut self) -> Vec<M>;

    /// Root node of the rendered popup, once it has been mounted.
    fn popup_dom_node(&self) -> Option<DomNode>;

    /// Root node of the rendered trigger, once it has been mounted.
    fn root_dom_node(&self) -> Option<DomNode>;

    /// Recompute the popup position. Returns `false` if unsupported.
    fn force_align(&mut self) -> bool {
        false
    }
}
