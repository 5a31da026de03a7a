//! Dropdown scenarios driven through the headless engine.

use std::cell::Cell;
use std::rc::Rc;

use popdown_ui::{ClickEvent, Element, Event, MouseButton, Point};

use super::*;
use crate::headless::HeadlessTrigger;
use crate::trigger::Action;

#[derive(Debug, Clone, PartialEq)]
enum Msg {
    VisibleChange(bool),
    OverlayClick(Option<String>),
    MenuClick(Option<String>),
    ButtonClick,
}

/// Drives a dropdown and its engine the way a host event loop would.
struct Harness {
    dropdown: Dropdown<Msg>,
    engine: HeadlessTrigger<DropdownEvent<Msg>>,
    messages: Vec<Msg>,
}

impl Harness {
    fn new(props: DropdownProps<Msg>) -> Self {
        let mut harness = Self {
            dropdown: Dropdown::new(props),
            engine: HeadlessTrigger::new().at(Point::new(20.0, 20.0)),
            messages: Vec::new(),
        };
        harness.settle();
        harness
    }

    /// Render, then deliver finished transitions until none are left.
    fn settle(&mut self) {
        self.dropdown.render_into(&mut self.engine);
        loop {
            let finished = self.engine.poll_transitions();
            if finished.is_empty() {
                break;
            }
            for event in finished {
                let out = self.dropdown.handle(event, &mut self.engine);
                self.messages.extend(out);
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        for event in self.engine.on_event(&event) {
            let out = self.dropdown.handle(event, &mut self.engine);
            self.messages.extend(out);
        }
        self.settle();
    }

    fn update(&mut self, props: DropdownProps<Msg>) {
        self.dropdown.update(props);
        self.settle();
    }

    fn press(&mut self, button: MouseButton, position: Point) {
        self.dispatch(Event::MousePressed { button, position });
    }

    fn click_trigger(&mut self) {
        let center = self.engine.trigger_center().expect("trigger mounted");
        self.press(MouseButton::Left, center);
    }

    fn click_row(&mut self, key: &str) {
        let row = self.engine.row_center(key).expect("row rendered");
        self.press(MouseButton::Left, row);
    }

    fn trigger_class(&self) -> String {
        self.engine.root_dom_node().expect("trigger mounted").class_name()
    }

    fn popup_shown(&self) -> bool {
        self.dropdown
            .popup_dom_node(&self.engine)
            .is_some_and(|node| !node.is_hidden())
    }
}

fn button() -> Element<Msg> {
    Element::primitive("button")
        .class_name("my-button")
        .text("open")
}

fn narrow_overlay() -> Element<Msg> {
    Element::primitive("div").width(50.0).text("Test")
}

fn menu() -> Element<Msg> {
    Element::component("menu")
        .width(140.0)
        .on_click(|e: ClickEvent| Msg::MenuClick(e.key))
        .child(
            Element::primitive("li")
                .key("1")
                .child(Element::primitive("span").class_name("my-menuitem").text("one")),
        )
        .child(Element::primitive("li").key("divider").class_name("divider"))
        .child(Element::primitive("li").key("2").text("two"))
}

fn click_config() -> DropdownConfig {
    DropdownConfig::new().trigger(vec![Action::Click])
}

#[test]
fn test_default_visible_mounts_popup() {
    let props = DropdownProps::new(
        button(),
        Element::primitive("div").class_name("check-for-visible").text("Test"),
    )
    .config(DropdownConfig::new().visible(true));
    let harness = Harness::new(props);

    assert!(harness.dropdown.popup_dom_node(&harness.engine).is_some());
    assert!(harness.popup_shown());
}

#[test]
fn test_simply_works() {
    let props = DropdownProps::new(button(), menu())
        .config(click_config())
        .on_overlay_click(|e: ClickEvent| Msg::OverlayClick(e.key));
    let mut harness = Harness::new(props);

    assert_eq!(harness.trigger_class(), "my-button");
    assert!(harness.dropdown.popup_dom_node(&harness.engine).is_none());

    harness.click_trigger();
    assert!(harness.popup_shown());
    assert!(harness.messages.is_empty());

    harness.click_row("1");
    assert_eq!(
        harness.messages,
        vec![
            Msg::OverlayClick(Some("1".into())),
            Msg::MenuClick(Some("1".into())),
        ]
    );
    assert!(!harness.dropdown.is_visible());
    assert!(!harness.popup_shown());
}

#[test]
fn test_user_disables_min_overlay_width_match() {
    let props = DropdownProps::new(button().width(100.0), narrow_overlay())
        .config(click_config().min_overlay_width_match_trigger(false));
    let mut harness = Harness::new(props);
    harness.click_trigger();

    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap();
    assert_eq!(popup.offset_width(), 50.0);
    assert_eq!(popup.style().min_width, None);
}

#[test]
fn test_overlay_widened_to_trigger() {
    let props = DropdownProps::new(button().width(100.0), narrow_overlay()).config(click_config());
    let mut harness = Harness::new(props);
    harness.click_trigger();

    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap();
    assert_eq!(popup.offset_width(), 100.0);
    assert_eq!(popup.style().min_width, Some(100.0));

    // the widened popup stays widened across re-renders
    harness.settle();
    assert_eq!(popup.offset_width(), 100.0);
}

#[test]
fn test_wider_overlay_left_alone() {
    let props = DropdownProps::new(button().width(100.0), Element::primitive("div").width(180.0))
        .config(click_config());
    let mut harness = Harness::new(props);
    harness.click_trigger();

    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap();
    assert_eq!(popup.offset_width(), 180.0);
    assert_eq!(popup.style().min_width, None);
}

#[test]
fn test_after_visible_change_before_mount_is_noop() {
    let dropdown = Dropdown::new(DropdownProps::new(button().width(100.0), narrow_overlay()));
    let mut engine: HeadlessTrigger<DropdownEvent<Msg>> = HeadlessTrigger::new();
    assert!(!dropdown.after_visible_change(true, &mut engine));
    assert!(dropdown.popup_dom_node(&engine).is_none());
}

#[test]
fn test_after_hide_does_not_measure() {
    let props = DropdownProps::new(button().width(100.0), narrow_overlay())
        .config(click_config().visible(true));
    let mut harness = Harness::new(props);
    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap();
    popup.set_style(Default::default());

    assert!(!harness.dropdown.after_visible_change(false, &mut harness.engine));
    assert_eq!(popup.style().min_width, None);
}

#[test]
fn test_align_point_disables_width_match_by_default() {
    let config = DropdownConfig::new().align_point(true);
    let dropdown = Dropdown::new(DropdownProps::new(button(), narrow_overlay()).config(config.clone()));
    assert!(!dropdown.min_overlay_width_match_trigger());

    let dropdown = Dropdown::new(
        DropdownProps::new(button(), narrow_overlay())
            .config(config.min_overlay_width_match_trigger(true)),
    );
    assert!(dropdown.min_overlay_width_match_trigger());

    let dropdown: Dropdown<Msg> = Dropdown::new(DropdownProps::new(button(), narrow_overlay()));
    assert!(dropdown.min_overlay_width_match_trigger());
}

#[test]
fn test_default_open_class_name() {
    let props = DropdownProps::new(button().width(100.0), narrow_overlay())
        .config(click_config().min_overlay_width_match_trigger(false));
    let mut harness = Harness::new(props);

    harness.click_trigger();
    assert_eq!(harness.trigger_class(), "my-button rc-dropdown-open");
    harness.click_trigger();
    assert_eq!(harness.trigger_class(), "my-button");
    harness.click_trigger();
    assert_eq!(harness.trigger_class(), "my-button rc-dropdown-open");
}

#[test]
fn test_custom_open_class_name() {
    let props = DropdownProps::new(button().width(100.0), narrow_overlay()).config(
        click_config()
            .min_overlay_width_match_trigger(false)
            .open_class_name("opened".into()),
    );
    let mut harness = Harness::new(props);

    harness.click_trigger();
    assert_eq!(harness.trigger_class(), "my-button opened");
    harness.click_trigger();
    assert_eq!(harness.trigger_class(), "my-button");
}

#[test]
fn test_open_class_without_own_class() {
    let props = DropdownProps::new(Element::primitive("button").text("open"), narrow_overlay())
        .config(DropdownConfig::new().visible(true));
    let dropdown = Dropdown::new(props);
    assert_eq!(
        dropdown.render_children().props().class_name.as_deref(),
        Some("rc-dropdown-open")
    );
}

#[test]
fn test_lazy_overlay() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let overlay = Overlay::lazy(move || {
        counter.set(counter.get() + 1);
        narrow_overlay()
    });
    let props = DropdownProps::new(button(), overlay).config(click_config());
    let mut harness = Harness::new(props);

    // rendering hands the factory over without calling it
    let _ = harness.dropdown.render();
    assert_eq!(calls.get(), 0);

    harness.click_trigger();
    assert!(harness.popup_shown());
    assert_eq!(calls.get(), 1);
    let rendered = harness.engine.rendered_popup().unwrap();
    assert_eq!(rendered.text_content(), Some("Test"));
    assert!(rendered.props().on_click.is_some());

    // each render of the shown popup builds it afresh
    harness.settle();
    assert_eq!(calls.get(), 2);

    // hiding does not build it
    harness.click_trigger();
    assert!(!harness.popup_shown());
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_controlled_mirrors_every_update() {
    let props = |visible| {
        DropdownProps::new(button(), narrow_overlay())
            .config(click_config().visible(visible))
            .on_visible_change(Msg::VisibleChange)
    };
    let mut harness = Harness::new(props(false));

    for visible in [true, true, false, true, false, false] {
        harness.update(props(visible));
        assert_eq!(harness.dropdown.visibility(), Visibility::Controlled(visible));
        assert_eq!(harness.popup_shown(), visible);
    }
}

#[test]
fn test_controlled_visible_change_only_notifies() {
    let props = DropdownProps::new(button(), narrow_overlay())
        .config(click_config().visible(false))
        .on_visible_change(Msg::VisibleChange);
    let mut harness = Harness::new(props);

    harness.click_trigger();
    assert_eq!(harness.messages, vec![Msg::VisibleChange(true)]);
    assert!(!harness.dropdown.is_visible());
    assert!(!harness.popup_shown());
}

#[test]
fn test_uncontrolled_survives_unrelated_updates() {
    let props = || {
        DropdownProps::new(button(), narrow_overlay())
            .config(click_config())
            .on_visible_change(Msg::VisibleChange)
    };
    let mut harness = Harness::new(props());

    harness.click_trigger();
    assert_eq!(harness.dropdown.visibility(), Visibility::Uncontrolled(true));
    assert_eq!(harness.messages, vec![Msg::VisibleChange(true)]);

    for _ in 0..3 {
        harness.update(props());
        assert!(harness.dropdown.is_visible());
    }
}

#[test]
fn test_default_visible_seeds_uncontrolled() {
    let dropdown = Dropdown::new(
        DropdownProps::new(button(), narrow_overlay())
            .config(DropdownConfig::new().default_visible(true)),
    );
    assert_eq!(dropdown.visibility(), Visibility::Uncontrolled(true));
}

#[test]
fn test_overlay_click_in_controlled_mode_keeps_state() {
    let props = DropdownProps::new(button(), menu())
        .config(click_config().visible(true))
        .on_overlay_click(|e: ClickEvent| Msg::OverlayClick(e.key));
    let mut harness = Harness::new(props);

    harness.click_row("2");
    assert_eq!(
        harness.messages,
        vec![
            Msg::OverlayClick(Some("2".into())),
            Msg::MenuClick(Some("2".into())),
        ]
    );
    assert!(harness.dropdown.is_visible());
    assert!(harness.popup_shown());
}

#[test]
fn test_overlay_click_without_callbacks() {
    let mut dropdown = Dropdown::new(
        DropdownProps::new(button(), narrow_overlay())
            .config(DropdownConfig::new().default_visible(true)),
    );
    let event = ClickEvent::new(Point::zero(), MouseButton::Left);
    assert!(dropdown.handle_overlay_click(event).is_empty());
    assert!(!dropdown.is_visible());
}

#[test]
fn test_context_menu_hides_on_click() {
    let props = DropdownProps::new(button(), menu())
        .config(DropdownConfig::new().trigger(vec![Action::ContextMenu]));
    let mut harness = Harness::new(props);
    assert_eq!(harness.dropdown.render().hide_action, vec![Action::Click]);

    let center = harness.engine.trigger_center().unwrap();
    harness.press(MouseButton::Right, center);
    assert!(harness.popup_shown());

    harness.press(MouseButton::Left, Point::new(900.0, 700.0));
    assert!(!harness.popup_shown());
}

#[test]
fn test_hover_is_default_trigger() {
    let mut harness = Harness::new(DropdownProps::new(button(), narrow_overlay()));
    let center = harness.engine.trigger_center().unwrap();

    harness.dispatch(Event::MouseMoved { position: center });
    assert!(harness.popup_shown());
    harness.dispatch(Event::MouseMoved {
        position: Point::new(900.0, 700.0),
    });
    assert!(!harness.popup_shown());
}

// Dropping `visible` mid-lifetime hands ownership back with the last
// mirrored value, and passing it again takes ownership away.
#[test]
fn test_mode_flip_quirk() {
    let base = || {
        DropdownProps::new(button(), menu()).on_overlay_click(|e: ClickEvent| Msg::OverlayClick(e.key))
    };
    let mut harness = Harness::new(base().config(click_config().visible(true)));
    assert!(harness.dropdown.is_controlled());

    harness.update(base().config(click_config()));
    assert_eq!(harness.dropdown.visibility(), Visibility::Uncontrolled(true));

    harness.click_row("1");
    assert_eq!(harness.dropdown.visibility(), Visibility::Uncontrolled(false));

    harness.update(base().config(click_config().visible(true)));
    assert_eq!(harness.dropdown.visibility(), Visibility::Controlled(true));
    assert!(harness.popup_shown());
}

#[test]
fn test_prefix_only_for_components() {
    let dropdown = Dropdown::new(DropdownProps::new(button(), menu()));
    let decorated = dropdown.menu_element();
    assert_eq!(decorated.props().prefix_cls.as_deref(), Some("rc-dropdown-menu"));
    assert!(dropdown.overlay_element().props().prefix_cls.is_none());

    let dropdown = Dropdown::new(DropdownProps::new(button(), narrow_overlay()));
    let decorated = dropdown.menu_element();
    assert!(decorated.props().prefix_cls.is_none());
    assert!(decorated.props().on_click.is_some());
}

#[test]
fn test_custom_prefix() {
    let dropdown = Dropdown::new(
        DropdownProps::new(button(), menu())
            .config(DropdownConfig::new().prefix("my-drop".into()).visible(true)),
    );
    assert_eq!(dropdown.open_class_name(), "my-drop-open");
    assert_eq!(
        dropdown.menu_element().props().prefix_cls.as_deref(),
        Some("my-drop-menu")
    );
    assert_eq!(dropdown.render().prefix_cls, "my-drop");
}

#[test]
fn test_trigger_child_messages_pass_through() {
    let child = button().on_click(|_| Msg::ButtonClick);
    let props = DropdownProps::new(child, narrow_overlay())
        .config(click_config())
        .on_visible_change(Msg::VisibleChange);
    let mut harness = Harness::new(props);

    harness.click_trigger();
    assert_eq!(harness.messages, vec![Msg::ButtonClick, Msg::VisibleChange(true)]);
}

#[test]
fn test_render_passes_config_through() {
    let config = click_config()
        .placement(crate::placements::Placement::TopRight)
        .overlay_class_name("my-overlay".into())
        .show_action(vec![Action::Focus])
        .transition_name("slide-up".into());
    let dropdown = Dropdown::new(DropdownProps::new(button(), menu()).config(config));
    let props = dropdown.render();

    assert_eq!(props.popup_placement, crate::placements::Placement::TopRight);
    assert_eq!(props.popup_class_name, "my-overlay");
    assert_eq!(props.action, vec![Action::Click]);
    assert_eq!(props.show_action, vec![Action::Focus]);
    assert!(props.hide_action.is_empty());
    assert_eq!(props.popup_transition_name.as_deref(), Some("slide-up"));
    assert!(!props.popup_visible);
}

#[test]
fn test_popup_container_forwarded() {
    let portal = popdown_ui::DomNode::new("portal");
    let target = portal.clone();
    let props = DropdownProps::new(button(), narrow_overlay())
        .config(click_config().visible(true))
        .get_popup_container(move |_| target.clone());
    let harness = Harness::new(props);

    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap();
    assert!(portal.contains_child(&popup));
}

#[test]
fn test_secondary_press_in_overlay_keeps_it_open() {
    let props = DropdownProps::new(button(), menu())
        .config(click_config())
        .on_overlay_click(|e: ClickEvent| Msg::OverlayClick(e.key));
    let mut harness = Harness::new(props);
    harness.click_trigger();

    for button in [MouseButton::Right, MouseButton::Middle] {
        let row = harness.engine.row_center("1").unwrap();
        harness.press(button, row);
        assert!(harness.messages.is_empty());
        assert!(harness.dropdown.is_visible());
        assert!(harness.popup_shown());
    }

    harness.click_row("1");
    assert!(!harness.dropdown.is_visible());
}

#[test]
fn test_hover_reaches_overlay_across_gap() {
    let mut harness = Harness::new(DropdownProps::new(button(), menu()));
    let center = harness.engine.trigger_center().unwrap();
    harness.dispatch(Event::MouseMoved { position: center });
    assert!(harness.popup_shown());

    let trigger = harness.engine.root_dom_node().unwrap().bounds();
    let popup = harness.dropdown.popup_dom_node(&harness.engine).unwrap().bounds();
    assert!(popup.y > trigger.bottom());

    harness.dispatch(Event::MouseMoved {
        position: Point::new(center.x, trigger.bottom() + 2.0),
    });
    assert!(harness.popup_shown());

    let row = harness.engine.row_center("1");
    assert!(row.is_some());
    harness.dispatch(Event::MouseMoved {
        position: row.unwrap(),
    });
    assert!(harness.popup_shown());

    harness.dispatch(Event::MouseMoved {
        position: Point::new(900.0, 700.0),
    });
    assert!(!harness.popup_shown());
}
