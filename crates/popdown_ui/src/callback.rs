//! Callback abstraction for element event handlers
//!
//! Handlers on descriptors are optional and must survive cloning: the same
//! descriptor is re-rendered, copied with merged properties and handed to the
//! positioning engine. `Callback<T, M>` therefore shares its closure through an
//! `Rc` instead of boxing it.
//!
//! # Examples
//!
//! ```
//! use popdown_ui::Callback;
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Toggled(bool),
//! }
//!
//! let on_toggle = Callback::new(Message::Toggled);
//! assert_eq!(on_toggle.call(true), Some(Message::Toggled(true)));
//!
//! let empty: Callback<bool, Message> = Callback::none();
//! assert_eq!(empty.call(true), None);
//! ```

use std::fmt;
use std::rc::Rc;

/// An optional, shareable handler turning an input into a message.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (e.g. a click event, a visibility flag)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Rc<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self { f: Some(Rc::new(f)) }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no callback is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T: 'static, M: 'static> Callback<T, M> {
    /// Re-target the produced message.
    ///
    /// An empty callback stays empty.
    pub fn map<N: 'static>(self, f: Rc<dyn Fn(M) -> N>) -> Callback<T, N> {
        match self.f {
            Some(inner) => Callback {
                f: Some(Rc::new(move |value| f(inner(value)))),
            },
            None => Callback::none(),
        }
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> Clone for Callback<T, M> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
