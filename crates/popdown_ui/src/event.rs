use crate::Point;

/// Raw input delivered to a positioning engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
    },
    /// Mouse button released.
    MouseReleased {
        button: MouseButton,
        position: Point,
    },
    /// Mouse moved.
    MouseMoved { position: Point },
    /// Keyboard focus moved onto the trigger.
    FocusGained,
    /// Keyboard focus left the trigger.
    FocusLost,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A click that landed inside a rendered element.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Pointer position in screen coordinates.
    pub position: Point,
    /// Which button was pressed.
    pub button: MouseButton,
    /// Key of the child row that was hit, if any.
    pub key: Option<String>,
}

impl ClickEvent {
    pub fn new(position: Point, button: MouseButton) -> Self {
        Self {
            position,
            button,
            key: None,
        }
    }

    /// Attach the key of the hit child.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
