//! Scripted in-memory driver used by the selection tests
//!
//! Selectors are matched literally against a table of nodes, and every primitive call is
//! recorded in order so tests can assert on what a selection actually did.

#![allow(dead_code)]

use browser_selection::{Driver, DriverError, Element, Point};
use std::cell::RefCell;
use std::collections::HashMap;

/// A fake remote node
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub text: String,
    pub attributes: HashMap<String, String>,
    pub css: HashMap<String, String>,
    pub selected: bool,
    pub displayed: bool,
    /// Primitive operations that fail on this node
    pub failing: Vec<&'static str>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            displayed: true,
            ..Default::default()
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new("").attr("type", "checkbox").selected(checked)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn css(mut self, property: &str, value: &str) -> Self {
        self.css.insert(property.to_string(), value.to_string());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.push(operation);
        self
    }
}

#[derive(Default)]
pub struct FakeDriver {
    nodes: RefCell<HashMap<String, Vec<Node>>>,
    calls: RefCell<Vec<String>>,
    unreachable: bool,
    failing: Vec<&'static str>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: make `selector` resolve to `nodes`
    pub fn with(self, selector: &str, nodes: Vec<Node>) -> Self {
        self.set(selector, nodes);
        self
    }

    /// Builder method: fail every resolution as if the browser went away
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Builder method: make a driver-level gesture (`move_to`, `double_click`) fail
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.push(operation);
        self
    }

    /// Replace the nodes `selector` resolves to
    pub fn set(&self, selector: &str, nodes: Vec<Node>) {
        self.nodes.borrow_mut().insert(selector.to_string(), nodes);
    }

    pub fn node(&self, selector: &str, index: usize) -> Node {
        self.nodes.borrow()[selector][index].clone()
    }

    /// Every recorded call, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Recorded calls excluding resolutions
    pub fn actions(&self) -> Vec<String> {
        self.calls().into_iter().filter(|call| !call.starts_with("resolve ")).collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Driver for FakeDriver {
    type Element<'a>
        = FakeElement<'a>
    where
        Self: 'a;

    fn elements(&self, selector: &str) -> Result<Vec<FakeElement<'_>>, DriverError> {
        self.record(format!("resolve {}", selector));
        if self.unreachable {
            return Err(DriverError::Protocol("connection refused".to_string()));
        }

        let count = self.nodes.borrow().get(selector).map_or(0, Vec::len);
        Ok((0..count)
            .map(|index| FakeElement {
                driver: self,
                selector: selector.to_string(),
                index,
            })
            .collect())
    }

    fn move_to(&self, element: &FakeElement<'_>, point: Option<Point>) -> Result<(), DriverError> {
        let target = match point {
            Some(point) => format!(" @{},{}", point.x, point.y),
            None => String::new(),
        };
        self.record(format!("move_to {}{}", element.id(), target));
        if self.failing.contains(&"move_to") {
            return Err(DriverError::Protocol("element is not interactable".to_string()));
        }
        Ok(())
    }

    fn double_click(&self) -> Result<(), DriverError> {
        self.record("double_click".to_string());
        if self.failing.contains(&"double_click") {
            return Err(DriverError::Protocol("no pointer position".to_string()));
        }
        Ok(())
    }
}

pub struct FakeElement<'a> {
    driver: &'a FakeDriver,
    selector: String,
    index: usize,
}

impl FakeElement<'_> {
    fn id(&self) -> String {
        format!("{}#{}", self.selector, self.index)
    }

    /// Record `operation` and fail if the node is scripted to
    fn invoke(&self, operation: &'static str, call: String) -> Result<Node, DriverError> {
        self.driver.record(call);

        let node = self.driver.node(&self.selector, self.index);
        if node.failing.contains(&operation) {
            return Err(DriverError::Protocol(format!("{} rejected", operation)));
        }
        Ok(node)
    }

    fn update(&self, change: impl FnOnce(&mut Node)) {
        let mut nodes = self.driver.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(&self.selector).and_then(|nodes| nodes.get_mut(self.index)) {
            change(node);
        }
    }
}

impl Element for FakeElement<'_> {
    fn click(&self) -> Result<(), DriverError> {
        let node = self.invoke("click", format!("click {}", self.id()))?;
        if node.attributes.get("type").map(String::as_str) == Some("checkbox") {
            self.update(|node| node.selected = !node.selected);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), DriverError> {
        self.invoke("clear", format!("clear {}", self.id()))?;
        self.update(|node| {
            node.attributes.insert("value".to_string(), String::new());
        });
        Ok(())
    }

    fn set_value(&self, text: &str) -> Result<(), DriverError> {
        self.invoke("set_value", format!("set_value {} {}", self.id(), text))?;
        self.update(|node| {
            node.attributes.insert("value".to_string(), text.to_string());
        });
        Ok(())
    }

    fn submit(&self) -> Result<(), DriverError> {
        self.invoke("submit", format!("submit {}", self.id()))?;
        Ok(())
    }

    fn text(&self) -> Result<String, DriverError> {
        Ok(self.invoke("text", format!("text {}", self.id()))?.text)
    }

    fn attribute(&self, name: &str) -> Result<String, DriverError> {
        let node = self.invoke("attribute", format!("attribute {} {}", self.id(), name))?;
        Ok(node.attributes.get(name).cloned().unwrap_or_default())
    }

    fn css(&self, property: &str) -> Result<String, DriverError> {
        let node = self.invoke("css", format!("css {} {}", self.id(), property))?;
        Ok(node.css.get(property).cloned().unwrap_or_default())
    }

    fn is_selected(&self) -> Result<bool, DriverError> {
        Ok(self.invoke("is_selected", format!("is_selected {}", self.id()))?.selected)
    }

    fn is_displayed(&self) -> Result<bool, DriverError> {
        Ok(self.invoke("is_displayed", format!("is_displayed {}", self.id()))?.displayed)
    }
}
