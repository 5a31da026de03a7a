//! Element descriptors
//!
//! An [`Element`] is an immutable description of something to render: a
//! render target, a property map and children. Descriptors are cheap to clone
//! (handlers are shared) and are never mutated in place once handed out;
//! [`Element::with`] produces a copy with properties merged in.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::builder_option;
use crate::callback::Callback;
use crate::event::ClickEvent;

/// What an element renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// A primitive markup element such as `div` or `button`.
    Primitive(String),
    /// A custom component such as a menu.
    Component(String),
}

impl RenderTarget {
    /// Whether the target understands semantic properties like `prefix_cls`.
    ///
    /// Primitive elements would only echo them back as literal attributes.
    pub fn interprets_prefix(&self) -> bool {
        matches!(self, RenderTarget::Component(_))
    }

    pub fn name(&self) -> &str {
        match self {
            RenderTarget::Primitive(name) | RenderTarget::Component(name) => name,
        }
    }
}

/// Inline style subset understood by measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl Style {
    /// Fields set in `other` win.
    pub fn merged(&self, other: &Style) -> Style {
        Style {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            min_width: other.min_width.or(self.min_width),
            max_height: other.max_height.or(self.max_height),
            z_index: other.z_index.or(self.z_index),
        }
    }
}

/// Properties carried by an element.
pub struct ElementProps<M> {
    pub key: Option<String>,
    pub class_name: Option<String>,
    pub prefix_cls: Option<String>,
    pub style: Style,
    pub on_click: Callback<ClickEvent, M>,
}

impl<M> Default for ElementProps<M> {
    fn default() -> Self {
        Self {
            key: None,
            class_name: None,
            prefix_cls: None,
            style: Style::default(),
            on_click: Callback::none(),
        }
    }
}

impl<M> Clone for ElementProps<M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            class_name: self.class_name.clone(),
            prefix_cls: self.prefix_cls.clone(),
            style: self.style.clone(),
            on_click: self.on_click.clone(),
        }
    }
}

impl<M> std::fmt::Debug for ElementProps<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementProps")
            .field("key", &self.key)
            .field("class_name", &self.class_name)
            .field("prefix_cls", &self.prefix_cls)
            .field("style", &self.style)
            .field("on_click", &self.on_click)
            .finish()
    }
}

/// Property overrides applied by [`Element::with`].
///
/// Unset fields leave the base element's value untouched.
pub struct PropOverrides<M> {
    class_name: Option<String>,
    prefix_cls: Option<String>,
    style: Option<Style>,
    on_click: Option<Callback<ClickEvent, M>>,
}

impl<M> Default for PropOverrides<M> {
    fn default() -> Self {
        Self {
            class_name: None,
            prefix_cls: None,
            style: None,
            on_click: None,
        }
    }
}

impl<M> PropOverrides<M> {
    pub fn new() -> Self {
        Self::default()
    }

    builder_option!(class_name, String);
    builder_option!(prefix_cls, String);
    builder_option!(style, Style);
    builder_option!(on_click, Callback<ClickEvent, M>);
}

/// A descriptor for something to render.
pub struct Element<M> {
    target: RenderTarget,
    props: ElementProps<M>,
    text: Option<String>,
    children: Vec<Element<M>>,
}

impl<M> Clone for Element<M> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            props: self.props.clone(),
            text: self.text.clone(),
            children: self.children.clone(),
        }
    }
}

impl<M> std::fmt::Debug for Element<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("target", &self.target)
            .field("props", &self.props)
            .field("text", &self.text)
            .field("children", &self.children)
            .finish()
    }
}

impl<M> Element<M> {
    /// A primitive markup element (`div`, `button`, ...).
    pub fn primitive(tag: impl Into<String>) -> Self {
        Self::new(RenderTarget::Primitive(tag.into()))
    }

    /// A custom component (`menu`, ...).
    pub fn component(name: impl Into<String>) -> Self {
        Self::new(RenderTarget::Component(name.into()))
    }

    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            props: ElementProps::default(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.props.key = Some(key.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.props.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.props.style = style;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.props.style.width = Some(width);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element<M>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element<M>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(ClickEvent) -> M + 'static,
    {
        self.props.on_click = Callback::new(f);
        self
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn props(&self) -> &ElementProps<M> {
        &self.props
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_elements(&self) -> &[Element<M>] {
        &self.children
    }

    /// Copy of this element with `overrides` merged into its properties.
    ///
    /// `self` is left untouched.
    pub fn with(&self, overrides: PropOverrides<M>) -> Element<M> {
        let mut element = self.clone();
        if let Some(class_name) = overrides.class_name {
            element.props.class_name = Some(class_name);
        }
        if let Some(prefix_cls) = overrides.prefix_cls {
            element.props.prefix_cls = Some(prefix_cls);
        }
        if let Some(style) = overrides.style {
            element.props.style = element.props.style.merged(&style);
        }
        if let Some(on_click) = overrides.on_click {
            element.props.on_click = on_click;
        }
        element
    }
}

impl<M: 'static> Element<M> {
    /// Re-target every handler in the tree to produce `N` instead of `M`.
    pub fn map<N: 'static>(self, f: Rc<dyn Fn(M) -> N>) -> Element<N> {
        let ElementProps {
            key,
            class_name,
            prefix_cls,
            style,
            on_click,
        } = self.props;

        Element {
            target: self.target,
            props: ElementProps {
                key,
                class_name,
                prefix_cls,
                style,
                on_click: on_click.map(f.clone()),
            },
            text: self.text,
            children: self
                .children
                .into_iter()
                .map(|child| child.map(f.clone()))
                .collect(),
        }
    }
}

/// Join class names, skipping empty entries.
pub fn class_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> String {
    names
        .into_iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
