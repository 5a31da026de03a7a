//! Headless positioning engine.
//!
//! Lays out the trigger and popup with estimated metrics, resolves
//! show/hide interactions from the configured actions and reports back
//! through the props' handlers. There is no animation: a visibility flip is
//! considered finished on the next [`poll_transitions`](PositioningEngine::poll_transitions).

use std::collections::VecDeque;

use popdown_ui::{
    class_names, Bounds, ClickEvent, DomNode, Element, Event, MouseButton, Point, Size,
    TextMetrics,
};

use crate::trigger::{PositioningEngine, TriggerProps};

/// Default viewport used for overflow adjustment.
const DEFAULT_VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};

/// Reference [`PositioningEngine`] without a renderer.
pub struct HeadlessTrigger<M> {
    props: Option<TriggerProps<M>>,
    metrics: TextMetrics,
    viewport: Size,
    origin: Point,
    document: DomNode,
    root: Option<DomNode>,
    popup_node: Option<DomNode>,
    /// Popup content as last rendered; only resolved while visible.
    popup_element: Option<Element<M>>,
    shown: bool,
    pending: VecDeque<bool>,
    align_target: Option<Point>,
    hovering: bool,
}

impl<M> Default for HeadlessTrigger<M> {
    fn default() -> Self {
        Self {
            props: None,
            metrics: TextMetrics::default(),
            viewport: DEFAULT_VIEWPORT,
            origin: Point::zero(),
            document: DomNode::new("body"),
            root: None,
            popup_node: None,
            popup_element: None,
            shown: false,
            pending: VecDeque::new(),
            align_target: None,
            hovering: false,
        }
    }
}

impl<M: 'static> HeadlessTrigger<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the trigger's top-left corner.
    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The node popups are attached to unless a container resolver says otherwise.
    pub fn document(&self) -> &DomNode {
        &self.document
    }

    /// Popup content currently rendered, if the popup is shown.
    pub fn rendered_popup(&self) -> Option<&Element<M>> {
        self.popup_element.as_ref().filter(|_| self.shown)
    }

    pub fn is_popup_shown(&self) -> bool {
        self.shown
    }

    /// Center of the trigger, handy for simulated clicks.
    pub fn trigger_center(&self) -> Option<Point> {
        self.root.as_ref().map(|root| root.bounds().center())
    }

    /// Center of the popup row with `key`, if the popup is shown.
    pub fn row_center(&self, key: &str) -> Option<Point> {
        let popup = self.popup_node.as_ref().filter(|_| self.shown)?;
        let element = self.popup_element.as_ref()?;
        let bounds = popup.bounds();
        let mut y = bounds.y;
        for row in element.child_elements() {
            let height = self.metrics.measure_element(row).height;
            if row.props().key.as_deref() == Some(key) {
                return Some(Point::new(bounds.x + bounds.width / 2.0, y + height / 2.0));
            }
            y += height;
        }
        None
    }

    fn trigger_bounds(&self) -> Option<Bounds> {
        self.root.as_ref().map(DomNode::bounds)
    }

    fn popup_bounds(&self) -> Option<Bounds> {
        self.popup_node
            .as_ref()
            .filter(|_| self.shown)
            .map(DomNode::bounds)
    }

    fn mount_root(&mut self, children: &Element<M>) -> DomNode {
        let root = self
            .root
            .get_or_insert_with(|| DomNode::new(children.target().name()))
            .clone();
        let size = self.metrics.measure_element(children);
        root.set_bounds(Bounds::new(self.origin.x, self.origin.y, size.width, size.height));
        root.set_class_name(children.props().class_name.clone().unwrap_or_default());
        root.set_style(children.props().style.clone());
        root
    }

    fn popup_class(props: &TriggerProps<M>, hidden: bool) -> String {
        let hidden_class = format!("{}-hidden", props.prefix_cls);
        class_names([
            Some(props.prefix_cls.as_str()),
            Some(props.popup_class_name.as_str()),
            hidden.then_some(hidden_class.as_str()),
        ])
    }

    fn mount_popup(&mut self, props: &TriggerProps<M>, root: &DomNode) {
        let element = props.popup.resolve();
        let node = match self.popup_node.clone() {
            Some(node) => node,
            None => {
                let node = DomNode::new(format!("{}-popup", props.prefix_cls));
                let container = match &props.get_popup_container {
                    Some(resolve) => resolve(root),
                    None => self.document.clone(),
                };
                container.append_child(&node);
                log::debug!("mounted popup into {}", container.name());
                self.popup_node = Some(node.clone());
                node
            }
        };

        // min-width applied after mount survives re-renders unless props set one
        let mut style = props.popup_style.clone();
        style.min_width = style.min_width.or(node.style().min_width);
        node.set_style(style);
        node.set_class_name(Self::popup_class(props, false));
        node.set_hidden(false);

        let content = self.metrics.measure_element(&element);
        node.set_bounds(Bounds::new(
            0.0,
            0.0,
            props.popup_style.width.unwrap_or(content.width),
            props.popup_style.height.unwrap_or(content.height),
        ));
        self.popup_element = Some(element);
        self.align_popup(props, &node);
    }

    fn align_popup(&self, props: &TriggerProps<M>, node: &DomNode) {
        let Some(trigger) = self.trigger_bounds() else {
            return;
        };
        let target = match (props.align_point, self.align_target) {
            (true, Some(point)) => Bounds::at_point(point),
            _ => trigger,
        };
        let spec = props
            .builtin_placements
            .resolve(props.popup_placement, props.popup_align.as_ref());
        let at = spec.position_within(target, node.bounds().size(), self.viewport);
        node.move_to(at);
        log::trace!("aligned popup at ({}, {})", at.x, at.y);
    }

    fn request_visible(&self, visible: bool) -> Option<M> {
        let props = self.props.as_ref()?;
        if props.popup_visible == visible {
            return None;
        }
        log::debug!("requesting popup visible = {visible}");
        props.on_popup_visible_change.call(visible)
    }

    fn remember_point(&mut self, position: Point) {
        if self.props.as_ref().is_some_and(|props| props.align_point) {
            self.align_target = Some(position);
        }
    }

    fn click_popup(&self, position: Point, button: MouseButton) -> Vec<M> {
        let (Some(element), Some(bounds)) = (self.popup_element.as_ref(), self.popup_bounds())
        else {
            return Vec::new();
        };

        let mut event = ClickEvent::new(position, button);
        let mut messages = Vec::new();
        let mut y = bounds.y;
        for row in element.child_elements() {
            let height = self.metrics.measure_element(row).height;
            if position.y >= y && position.y < y + height {
                if let Some(key) = &row.props().key {
                    event = event.with_key(key.clone());
                }
                messages.extend(row.props().on_click.call(event.clone()));
                break;
            }
            y += height;
        }
        messages.extend(element.props().on_click.call(event));
        messages
    }

    fn on_press(&mut self, button: MouseButton, position: Point) -> Vec<M> {
        let Some(props) = self.props.as_ref() else {
            return Vec::new();
        };
        let visible = props.popup_visible;
        let click_to_show = props.is_click_to_show();
        let click_to_hide = props.is_click_to_hide();
        let context_menu_to_show = props.is_context_menu_to_show();

        if self.popup_bounds().is_some_and(|b| b.contains(position)) {
            return match button {
                MouseButton::Left => self.click_popup(position, button),
                _ => Vec::new(),
            };
        }

        if self.trigger_bounds().is_some_and(|b| b.contains(position)) {
            // the trigger child sees its own click before the engine reacts
            let mut messages: Vec<M> = match button {
                MouseButton::Left => props
                    .children
                    .props()
                    .on_click
                    .call(ClickEvent::new(position, button))
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            };
            let next = match button {
                MouseButton::Left => {
                    let next = !visible;
                    ((click_to_hide && !next) || (next && click_to_show)).then_some(next)
                }
                MouseButton::Right => context_menu_to_show.then_some(true),
                _ => None,
            };
            if let Some(next) = next {
                self.remember_point(position);
                messages.extend(self.request_visible(next));
            }
            return messages;
        }

        // press anywhere else
        if visible && (click_to_hide || context_menu_to_show) {
            return self.request_visible(false).into_iter().collect();
        }
        Vec::new()
    }

    fn on_move(&mut self, position: Point) -> Vec<M> {
        let Some(props) = self.props.as_ref() else {
            return Vec::new();
        };
        let enter_to_show = props.is_mouse_enter_to_show();
        let leave_to_hide = props.is_mouse_leave_to_hide();

        let trigger = self.trigger_bounds();
        let over_trigger = trigger.is_some_and(|b| b.contains(position));
        // the gap between trigger and popup counts as hovered
        let hover_area = match (trigger, self.popup_bounds()) {
            (Some(trigger), Some(popup)) => Some(trigger.union(&popup)),
            (trigger, popup) => trigger.or(popup),
        };
        let hovering = hover_area.is_some_and(|b| b.contains(position));
        let was_hovering = std::mem::replace(&mut self.hovering, hovering);

        match (was_hovering, hovering) {
            (false, true) if over_trigger && enter_to_show => {
                self.remember_point(position);
                self.request_visible(true).into_iter().collect()
            }
            (true, false) if leave_to_hide => self.request_visible(false).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl<M: 'static> PositioningEngine<M> for HeadlessTrigger<M> {
    fn update(&mut self, props: TriggerProps<M>) {
        let root = self.mount_root(&props.children);

        if props.popup_visible {
            self.mount_popup(&props, &root);
        } else if let Some(node) = &self.popup_node {
            node.set_hidden(true);
            node.set_class_name(Self::popup_class(&props, true));
        }

        if props.popup_visible != self.shown {
            log::debug!(
                "popup {}",
                if props.popup_visible { "shown" } else { "hidden" }
            );
            self.shown = props.popup_visible;
            self.pending.push_back(props.popup_visible);
        }
        self.props = Some(props);
    }

    fn on_event(&mut self, event: &Event) -> Vec<M> {
        match event {
            Event::MousePressed { button, position } => self.on_press(*button, *position),
            Event::MouseMoved { position } => self.on_move(*position),
            Event::MouseReleased { .. } => Vec::new(),
            Event::FocusGained => match self.props.as_ref() {
                Some(props) if props.is_focus_to_show() => {
                    self.request_visible(true).into_iter().collect()
                }
                _ => Vec::new(),
            },
            Event::FocusLost => match self.props.as_ref() {
                Some(props) if props.is_blur_to_hide() => {
                    self.request_visible(false).into_iter().collect()
                }
                _ => Vec::new(),
            },
        }
    }

    fn poll_transitions(&mut self) -> Vec<M> {
        let Some(props) = self.props.as_ref() else {
            return Vec::new();
        };
        self.pending
            .drain(..)
            .filter_map(|visible| props.after_popup_visible_change.call(visible))
            .collect()
    }

    fn popup_dom_node(&self) -> Option<DomNode> {
        self.popup_node.clone()
    }

    fn root_dom_node(&self) -> Option<DomNode> {
        self.root.clone()
    }

    fn force_align(&mut self) -> bool {
        let (Some(props), Some(node)) = (self.props.as_ref(), self.popup_node.as_ref()) else {
            return false;
        };
        if !self.shown {
            return false;
        }
        self.align_popup(props, node);
        true
    }
}
