//! Macros for reducing boilerplate in builder implementations.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// // When method name matches field name:
/// builder_field!(prefix, String);
/// // Generates: pub fn prefix(mut self, value: String) -> Self { self.prefix = value; self }
///
/// // When method name differs from field name:
/// builder_field!(overlay_class_name, popup_class_name, String);
/// ```
#[macro_export]
macro_rules! builder_field {
    // Method name matches field name
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    // Method name differs from field name
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a builder-style setter method for an Option field.
///
/// # Usage
///
/// ```ignore
/// builder_option!(visible, bool);
/// // Generates: pub fn visible(mut self, value: bool) -> Self { self.visible = Some(value); self }
/// ```
#[macro_export]
macro_rules! builder_option {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = Some(value);
            self
        }
    };
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Generates a setter for a [`Callback`](crate::Callback) field.
///
/// The enclosing type must be generic over its message type `M`.
///
/// # Usage
///
/// ```ignore
/// callback_setter!(on_visible_change, bool);
/// // Generates: pub fn on_visible_change<F>(mut self, f: F) -> Self where F: Fn(bool) -> M + 'static
/// ```
#[macro_export]
macro_rules! callback_setter {
    // Callback with single parameter
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> M + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
