//! Scripted walkthrough of a dropdown driven by the headless engine.
//!
//! Usage: `popdown-demo [config.json]`. The optional file holds a
//! `logLevel` and a `dropdown` object with [`DropdownConfig`] keys.

use std::path::Path;

use popdown::{
    Action, ConfigError, Dropdown, DropdownConfig, DropdownEvent, DropdownProps, HeadlessTrigger,
    LogLevel, PositioningEngine,
};
use popdown_ui::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
enum Msg {
    VisibleChange(bool),
    Selected(Option<String>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DemoConfig {
    log_level: LogLevel,
    dropdown: DropdownConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            dropdown: DropdownConfig::new().trigger(vec![Action::Click]),
        }
    }
}

impl DemoConfig {
    fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(Path::new(path))?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn init_logging(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(level.to_level_filter()),
    };
    builder.init();
}

fn menu() -> Element<Msg> {
    Element::component("menu")
        .on_click(|e: ClickEvent| Msg::Selected(e.key))
        .children(
            ["Open", "Rename", "Delete"]
                .into_iter()
                .map(|label| Element::primitive("li").key(label.to_lowercase()).text(label)),
        )
}

struct Demo {
    dropdown: Dropdown<Msg>,
    engine: HeadlessTrigger<DropdownEvent<Msg>>,
}

impl Demo {
    fn dispatch(&mut self, event: Event) {
        for event in self.engine.on_event(&event) {
            for msg in self.dropdown.handle(event, &mut self.engine) {
                log::info!("message: {msg:?}");
            }
        }
        self.dropdown.render_into(&mut self.engine);
        for event in self.engine.poll_transitions() {
            self.dropdown.handle(event, &mut self.engine);
        }
    }

    fn press(&mut self, position: Point) {
        self.dispatch(Event::MousePressed {
            button: MouseButton::Left,
            position,
        });
    }

    fn report(&self) {
        let trigger = self.engine.root_dom_node().map(|node| node.class_name());
        let popup = self
            .dropdown
            .popup_dom_node(&self.engine)
            .filter(|node| !node.is_hidden());
        println!(
            "visible={} trigger class={:?} popup={:?}",
            self.dropdown.is_visible(),
            trigger.unwrap_or_default(),
            popup.map(|node| node.bounds()),
        );
    }
}

fn main() {
    let path = std::env::args().nth(1);
    let config = match DemoConfig::load(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_logging(config.log_level);

    let trigger = Element::primitive("button")
        .class_name("file-button")
        .text("File");
    let props = DropdownProps::new(trigger, menu())
        .config(config.dropdown)
        .on_visible_change(Msg::VisibleChange);
    let mut demo = Demo {
        dropdown: Dropdown::new(props),
        engine: HeadlessTrigger::new().at(Point::new(40.0, 40.0)),
    };
    demo.dropdown.render_into(&mut demo.engine);
    demo.report();

    let Some(center) = demo.engine.trigger_center() else {
        log::error!("trigger was not mounted");
        return;
    };
    demo.press(center);
    demo.report();

    match demo.engine.row_center("rename") {
        Some(row) => demo.press(row),
        None => log::warn!("menu is not open; the configured trigger may not react to clicks"),
    }
    demo.report();
}
