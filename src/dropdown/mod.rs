//! Dropdown controller
//!
//! Wraps a trigger element and toggles an overlay through a
//! [`PositioningEngine`]. The controller owns visibility when the caller
//! does not, decorates the overlay and the trigger for the engine, and
//! widens the overlay to the trigger's width once it has been shown.
//!
//! Interaction flows as messages: the engine produces [`DropdownEvent`]s, the
//! caller hands them to [`Dropdown::handle`], which returns the caller's own
//! messages produced by its callbacks, in the order they were invoked.

use std::fmt;
use std::rc::Rc;

use popdown_ui::{
    callback_setter, class_names, Callback, ClickEvent, DomNode, Element, PropOverrides,
};

use crate::config::DropdownConfig;
use crate::placements::Placements;
use crate::trigger::{ContainerResolver, Popup, PositioningEngine, TriggerProps};

#[cfg(test)]
mod tests;

/// Who owns the visibility flag, and its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Mirrors the caller's `visible` flag.
    Controlled(bool),
    /// Owned by the dropdown, seeded from `default_visible`.
    Uncontrolled(bool),
}

impl Visibility {
    fn initial(config: &DropdownConfig) -> Self {
        match config.visible {
            Some(visible) => Visibility::Controlled(visible),
            None => Visibility::Uncontrolled(config.default_visible),
        }
    }

    /// Re-evaluate ownership against a new `visible` flag.
    ///
    /// A present flag always wins; an absent one keeps the current value and
    /// hands ownership back to the dropdown.
    fn sync(self, visible: Option<bool>) -> Self {
        match visible {
            Some(visible) => Visibility::Controlled(visible),
            None => Visibility::Uncontrolled(self.is_visible()),
        }
    }

    pub fn is_visible(self) -> bool {
        match self {
            Visibility::Controlled(visible) | Visibility::Uncontrolled(visible) => visible,
        }
    }

    pub fn is_controlled(self) -> bool {
        matches!(self, Visibility::Controlled(_))
    }
}

/// Overlay content: an element, or a factory evaluated whenever the
/// content is needed.
pub enum Overlay<M> {
    Node(Element<M>),
    Lazy(Rc<dyn Fn() -> Element<M>>),
}

impl<M> Overlay<M> {
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Element<M> + 'static,
    {
        Overlay::Lazy(Rc::new(factory))
    }

    /// Produce the overlay element. Factories run on every call.
    pub fn element(&self) -> Element<M> {
        match self {
            Overlay::Node(element) => element.clone(),
            Overlay::Lazy(factory) => factory(),
        }
    }
}

impl<M> From<Element<M>> for Overlay<M> {
    fn from(element: Element<M>) -> Self {
        Overlay::Node(element)
    }
}

impl<M> Clone for Overlay<M> {
    fn clone(&self) -> Self {
        match self {
            Overlay::Node(element) => Overlay::Node(element.clone()),
            Overlay::Lazy(factory) => Overlay::Lazy(factory.clone()),
        }
    }
}

impl<M> fmt::Debug for Overlay<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overlay::Node(element) => f.debug_tuple("Node").field(element).finish(),
            Overlay::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Messages the positioning engine sends back to a dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownEvent<M> {
    /// The engine wants the overlay shown or hidden.
    VisibleChanged(bool),
    /// A show/hide transition finished.
    AfterVisibleChanged(bool),
    /// A click landed inside the overlay.
    OverlayClicked(ClickEvent),
    /// A caller message from a handler inside the trigger or overlay.
    Message(M),
}

/// Everything a caller supplies on a render.
pub struct DropdownProps<M> {
    config: DropdownConfig,
    children: Element<M>,
    overlay: Overlay<M>,
    on_visible_change: Callback<bool, M>,
    on_overlay_click: Callback<ClickEvent, M>,
    get_popup_container: Option<ContainerResolver>,
}

impl<M> DropdownProps<M> {
    pub fn new(children: Element<M>, overlay: impl Into<Overlay<M>>) -> Self {
        Self {
            config: DropdownConfig::default(),
            children,
            overlay: overlay.into(),
            on_visible_change: Callback::none(),
            on_overlay_click: Callback::none(),
            get_popup_container: None,
        }
    }

    pub fn config(mut self, config: DropdownConfig) -> Self {
        self.config = config;
        self
    }

    callback_setter!(on_visible_change, bool);
    callback_setter!(on_overlay_click, ClickEvent);

    pub fn get_popup_container<F>(mut self, f: F) -> Self
    where
        F: Fn(&DomNode) -> DomNode + 'static,
    {
        self.get_popup_container = Some(Rc::new(f));
        self
    }
}

impl<M> Clone for DropdownProps<M> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            children: self.children.clone(),
            overlay: self.overlay.clone(),
            on_visible_change: self.on_visible_change.clone(),
            on_overlay_click: self.on_overlay_click.clone(),
            get_popup_container: self.get_popup_container.clone(),
        }
    }
}

impl<M> fmt::Debug for DropdownProps<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownProps")
            .field("config", &self.config)
            .field("children", &self.children)
            .field("overlay", &self.overlay)
            .field("on_visible_change", &self.on_visible_change)
            .field("on_overlay_click", &self.on_overlay_click)
            .finish_non_exhaustive()
    }
}

/// The dropdown controller.
pub struct Dropdown<M> {
    props: DropdownProps<M>,
    visibility: Visibility,
}

impl<M: 'static> Dropdown<M> {
    pub fn new(props: DropdownProps<M>) -> Self {
        let visibility = Visibility::initial(&props.config);
        log::debug!("dropdown created: {visibility:?}");
        Self { props, visibility }
    }

    /// Accept props for a new render.
    ///
    /// Ownership is re-evaluated every time, so a caller that stops passing
    /// `visible` hands control back with the last mirrored value.
    pub fn update(&mut self, props: DropdownProps<M>) {
        let next = self.visibility.sync(props.config.visible);
        if next != self.visibility {
            log::debug!("dropdown visibility {:?} -> {next:?}", self.visibility);
        }
        self.visibility = next;
        self.props = props;
    }

    pub fn props(&self) -> &DropdownProps<M> {
        &self.props
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn is_controlled(&self) -> bool {
        self.visibility.is_controlled()
    }

    /// Route an engine message. Returns caller messages in invocation order.
    pub fn handle<E>(&mut self, event: DropdownEvent<M>, engine: &mut E) -> Vec<M>
    where
        E: PositioningEngine<DropdownEvent<M>> + ?Sized,
    {
        match event {
            DropdownEvent::VisibleChanged(visible) => self.handle_visible_change(visible),
            DropdownEvent::AfterVisibleChanged(visible) => {
                self.after_visible_change(visible, engine);
                Vec::new()
            }
            DropdownEvent::OverlayClicked(event) => self.handle_overlay_click(event),
            DropdownEvent::Message(message) => vec![message],
        }
    }

    /// A click inside the overlay.
    ///
    /// Closes the overlay when uncontrolled, without consulting
    /// `on_visible_change`. The caller's `on_overlay_click` runs first, then
    /// the overlay's own click handler, both with the same event.
    pub fn handle_overlay_click(&mut self, event: ClickEvent) -> Vec<M> {
        let overlay_on_click = self.overlay_element().props().on_click.clone();

        if !self.is_controlled() {
            self.visibility = Visibility::Uncontrolled(false);
            log::debug!("overlay clicked, closing");
        }

        let mut messages = Vec::new();
        messages.extend(self.props.on_overlay_click.call(event.clone()));
        messages.extend(overlay_on_click.call(event));
        messages
    }

    /// The engine asks for the overlay to be shown or hidden.
    pub fn handle_visible_change(&mut self, visible: bool) -> Vec<M> {
        if !self.is_controlled() {
            self.visibility = Visibility::Uncontrolled(visible);
        }
        log::debug!("visible change requested: {visible}");
        self.props
            .on_visible_change
            .call(visible)
            .into_iter()
            .collect()
    }

    /// Whether the overlay must be at least as wide as the trigger.
    pub fn min_overlay_width_match_trigger(&self) -> bool {
        let config = &self.props.config;
        config
            .min_overlay_width_match_trigger
            .unwrap_or(!config.align_point)
    }

    /// The caller's overlay, with a lazy factory evaluated now.
    pub fn overlay_element(&self) -> Element<M> {
        self.props.overlay.element()
    }

    /// The overlay as handed to the engine.
    pub fn menu_element(&self) -> Element<DropdownEvent<M>> {
        decorate_overlay(self.overlay_element(), &self.props.config.prefix)
    }

    /// Popup content for the engine. Lazy overlays stay lazy so the factory
    /// only runs when the engine renders the popup.
    pub fn popup(&self) -> Popup<DropdownEvent<M>> {
        match &self.props.overlay {
            Overlay::Lazy(factory) => {
                let factory = factory.clone();
                let prefix = self.props.config.prefix.clone();
                Popup::Lazy(Rc::new(move || decorate_overlay(factory(), &prefix)))
            }
            Overlay::Node(_) => Popup::Node(self.menu_element()),
        }
    }

    pub fn open_class_name(&self) -> String {
        let config = &self.props.config;
        match &config.open_class_name {
            Some(name) => name.clone(),
            None => format!("{}-open", config.prefix),
        }
    }

    /// The trigger child, carrying the open class while visible.
    pub fn render_children(&self) -> Element<M> {
        let children = &self.props.children;
        if !self.is_visible() {
            return children.clone();
        }
        let open_class = self.open_class_name();
        let class_name = class_names([
            children.props().class_name.as_deref(),
            Some(open_class.as_str()),
        ]);
        children.with(PropOverrides::new().class_name(class_name))
    }

    /// Called once a show/hide transition has finished.
    ///
    /// After showing, widens the overlay to the trigger's width and asks the
    /// engine to realign. Returns whether the overlay was widened.
    pub fn after_visible_change<E>(&self, visible: bool, engine: &mut E) -> bool
    where
        E: PositioningEngine<DropdownEvent<M>> + ?Sized,
    {
        if !visible || !self.min_overlay_width_match_trigger() {
            return false;
        }
        let (Some(root), Some(overlay)) = (engine.root_dom_node(), engine.popup_dom_node()) else {
            return false;
        };

        let trigger_width = root.offset_width();
        if trigger_width <= overlay.offset_width() {
            return false;
        }
        log::debug!(
            "widening overlay from {} to trigger width {trigger_width}",
            overlay.offset_width()
        );
        overlay.set_min_width(trigger_width);
        if !engine.force_align() {
            log::trace!("engine cannot realign");
        }
        true
    }

    /// The overlay's root node, if the engine has rendered it.
    pub fn popup_dom_node<E>(&self, engine: &E) -> Option<DomNode>
    where
        E: PositioningEngine<DropdownEvent<M>> + ?Sized,
    {
        engine.popup_dom_node()
    }

    /// Props for the positioning engine.
    pub fn render(&self) -> TriggerProps<DropdownEvent<M>> {
        let config = &self.props.config;
        let message: Rc<dyn Fn(M) -> DropdownEvent<M>> = Rc::new(DropdownEvent::Message);

        TriggerProps {
            prefix_cls: config.prefix.clone(),
            children: self.render_children().map(message),
            popup: self.popup(),
            builtin_placements: Placements::builtin(),
            action: config.trigger.clone(),
            show_action: config.show_action.clone(),
            hide_action: config.resolved_hide_action(),
            popup_placement: config.placement,
            popup_align: config.align.clone(),
            popup_transition_name: config.transition_name.clone(),
            popup_animation: config.animation.clone(),
            popup_visible: self.is_visible(),
            popup_class_name: config.overlay_class_name.clone(),
            popup_style: config.overlay_style.clone(),
            align_point: config.align_point,
            on_popup_visible_change: Callback::new(DropdownEvent::VisibleChanged),
            after_popup_visible_change: Callback::new(DropdownEvent::AfterVisibleChanged),
            get_popup_container: self.props.get_popup_container.clone(),
        }
    }

    /// Render into `engine`.
    pub fn render_into<E>(&self, engine: &mut E)
    where
        E: PositioningEngine<DropdownEvent<M>> + ?Sized,
    {
        engine.update(self.render());
    }
}

impl<M> fmt::Debug for Dropdown<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("visibility", &self.visibility)
            .field("props", &self.props)
            .finish()
    }
}

/// Copy of `overlay` whose click reaches the dropdown, tagged with the menu
/// prefix when the overlay's target understands it.
fn decorate_overlay<M: 'static>(overlay: Element<M>, prefix: &str) -> Element<DropdownEvent<M>> {
    let mut overrides =
        PropOverrides::new().on_click(Callback::new(DropdownEvent::OverlayClicked));
    if overlay.target().interprets_prefix() {
        overrides = overrides.prefix_cls(format!("{prefix}-menu"));
    }
    let message: Rc<dyn Fn(M) -> DropdownEvent<M>> = Rc::new(DropdownEvent::Message);
    overlay.map(message).with(overrides)
}
