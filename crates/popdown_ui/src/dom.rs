//! Mounted-node handles.
//!
//! A [`DomNode`] is the live counterpart of an [`Element`](crate::Element):
//! it records where the engine placed the element and carries the style that
//! can be changed after mount. Handles are shared; cloning one yields another
//! handle to the same node.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::element::Style;
use crate::geometry::{Bounds, Point};

#[derive(Debug, Default)]
struct NodeState {
    name: String,
    class_name: String,
    bounds: Bounds,
    style: Style,
    hidden: bool,
    children: Vec<DomNode>,
}

/// Shared handle to a mounted node.
#[derive(Clone, Default)]
pub struct DomNode(Rc<RefCell<NodeState>>);

impl DomNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(NodeState {
            name: name.into(),
            ..NodeState::default()
        })))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Rendered width, including any applied `min-width`.
    pub fn offset_width(&self) -> f32 {
        rendered_width(&self.0.borrow())
    }

    pub fn bounds(&self) -> Bounds {
        let state = self.0.borrow();
        Bounds {
            width: rendered_width(&state),
            ..state.bounds
        }
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.0.borrow_mut().bounds = bounds;
    }

    /// Move without resizing.
    pub fn move_to(&self, position: Point) {
        let mut state = self.0.borrow_mut();
        state.bounds = state.bounds.moved_to(position);
    }

    pub fn style(&self) -> Style {
        self.0.borrow().style.clone()
    }

    pub fn set_style(&self, style: Style) {
        self.0.borrow_mut().style = style;
    }

    pub fn set_min_width(&self, width: f32) {
        log::trace!("{}: min-width -> {width}px", self.name());
        self.0.borrow_mut().style.min_width = Some(width);
    }

    pub fn class_name(&self) -> String {
        self.0.borrow().class_name.clone()
    }

    pub fn set_class_name(&self, class_name: impl Into<String>) {
        self.0.borrow_mut().class_name = class_name.into();
    }

    pub fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    /// Attach `child` unless it is already attached.
    pub fn append_child(&self, child: &DomNode) {
        let mut state = self.0.borrow_mut();
        if !state.children.iter().any(|c| c.ptr_eq(child)) {
            state.children.push(child.clone());
        }
    }

    pub fn contains_child(&self, child: &DomNode) -> bool {
        self.0.borrow().children.iter().any(|c| c.ptr_eq(child))
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &DomNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn rendered_width(state: &NodeState) -> f32 {
    state
        .style
        .min_width
        .map_or(state.bounds.width, |min| state.bounds.width.max(min))
}

impl fmt::Debug for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("DomNode")
            .field("name", &state.name)
            .field("class_name", &state.class_name)
            .field("bounds", &state.bounds)
            .field("hidden", &state.hidden)
            .finish_non_exhaustive()
    }
}
