use crate::driver::{Driver, Element, Point};
use crate::error::DriverError;
use headless_chrome::Tab;
use headless_chrome::browser::tab::point::Point as ChromePoint;
use headless_chrome::protocol::cdp::Input;
use headless_chrome::protocol::cdp::Runtime::RemoteObjectSubtype;
use serde_json::Value;
use std::sync::{Arc, Mutex};

const CLEAR_JS: &str = r#"
    function() {
        if (!('value' in this)) {
            return false;
        }
        this.value = '';
        this.dispatchEvent(new Event('input', { bubbles: true }));
        this.dispatchEvent(new Event('change', { bubbles: true }));
        return true;
    }
"#;

const SUBMIT_JS: &str = r#"
    function() {
        const form = this.tagName === 'FORM' ? this : (this.form || this.closest('form'));
        if (!form) {
            return false;
        }
        if (typeof form.requestSubmit === 'function') {
            form.requestSubmit();
        } else {
            form.submit();
        }
        return true;
    }
"#;

const CSS_JS: &str = r#"
    function(property) {
        return window.getComputedStyle(this).getPropertyValue(property);
    }
"#;

const SELECT_OPTION_JS: &str = r#"
    function() {
        this.selected = true;
        const select = this.closest('select');
        if (select) {
            select.dispatchEvent(new Event('input', { bubbles: true }));
            select.dispatchEvent(new Event('change', { bubbles: true }));
        }
        return true;
    }
"#;

const SELECTED_JS: &str = r#"
    function() {
        return !!(this.checked || this.selected);
    }
"#;

const DISPLAYED_JS: &str = r#"
    function() {
        const style = window.getComputedStyle(this);
        if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') {
            return false;
        }
        const rect = this.getBoundingClientRect();
        return rect.width > 0 && rect.height > 0;
    }
"#;

const ORIGIN_JS: &str = r#"
    function() {
        const rect = this.getBoundingClientRect();
        return JSON.stringify({ x: rect.left, y: rect.top });
    }
"#;

/// [`Driver`] backed by a single Chrome tab over the DevTools Protocol
pub struct ChromeDriver {
    tab: Arc<Tab>,

    /// Last position the pointer was moved to, in viewport coordinates
    pointer: Mutex<Option<Point>>,
}

impl ChromeDriver {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self {
            tab,
            pointer: Mutex::new(None),
        }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Number of nodes currently matching `selector`
    fn match_count(&self, selector: &str) -> Result<u64, DriverError> {
        let quoted = serde_json::to_string(selector).map_err(|e| DriverError::Script(e.to_string()))?;
        let js = format!("document.querySelectorAll({}).length", quoted);

        log::trace!("Counting matches for '{}'", selector);
        let result = self.tab.evaluate(&js, false).map_err(DriverError::protocol)?;
        if result.subtype == Some(RemoteObjectSubtype::Error) {
            let description = result.description.unwrap_or_else(|| "unknown error".to_string());
            return Err(DriverError::Script(format!("invalid selector '{}': {}", selector, description)));
        }

        result
            .value
            .as_ref()
            .and_then(Value::as_u64)
            .ok_or_else(|| DriverError::UnexpectedResponse(format!("could not count matches for '{}'", selector)))
    }

    fn dispatch_mouse(
        &self,
        kind: Input::DispatchMouseEventTypeOption,
        point: Point,
        click_count: u32,
    ) -> Result<(), DriverError> {
        self.tab
            .call_method(Input::DispatchMouseEvent {
                Type: kind,
                x: point.x,
                y: point.y,
                button: Some(Input::MouseButton::Left),
                click_count: Some(click_count),
                modifiers: None,
                timestamp: None,
                buttons: None,
                force: None,
                tangential_pressure: None,
                tilt_x: None,
                tilt_y: None,
                twist: None,
                delta_x: None,
                delta_y: None,
                pointer_Type: None,
            })
            .map_err(DriverError::protocol)?;
        Ok(())
    }

    fn set_pointer(&self, point: Point) -> Result<(), DriverError> {
        let mut pointer = self
            .pointer
            .lock()
            .map_err(|e| DriverError::Protocol(format!("pointer state unavailable: {}", e)))?;
        *pointer = Some(point);
        Ok(())
    }

    fn pointer(&self) -> Result<Option<Point>, DriverError> {
        let pointer = self
            .pointer
            .lock()
            .map_err(|e| DriverError::Protocol(format!("pointer state unavailable: {}", e)))?;
        Ok(*pointer)
    }
}

impl Driver for ChromeDriver {
    type Element<'a>
        = ChromeElement<'a>
    where
        Self: 'a;

    fn elements(&self, selector: &str) -> Result<Vec<ChromeElement<'_>>, DriverError> {
        if self.match_count(selector)? == 0 {
            return Ok(Vec::new());
        }

        let elements = self.tab.find_elements(selector).map_err(DriverError::protocol)?;
        Ok(elements.into_iter().map(|element| ChromeElement { element }).collect())
    }

    fn move_to(&self, element: &ChromeElement<'_>, point: Option<Point>) -> Result<(), DriverError> {
        element.element.scroll_into_view().map_err(DriverError::protocol)?;

        let target = match point {
            None => {
                let midpoint = element.element.get_midpoint().map_err(DriverError::protocol)?;
                Point::new(midpoint.x, midpoint.y)
            }
            Some(offset) => {
                let origin = element.call_string(ORIGIN_JS, Vec::new())?;
                let origin: Point = serde_json::from_str(&origin)
                    .map_err(|e| DriverError::UnexpectedResponse(format!("invalid element origin: {}", e)))?;
                Point::new(origin.x + offset.x, origin.y + offset.y)
            }
        };

        log::debug!("Moving pointer to ({}, {})", target.x, target.y);
        self.tab
            .move_mouse_to_point(ChromePoint {
                x: target.x,
                y: target.y,
            })
            .map_err(DriverError::protocol)?;

        self.set_pointer(target)
    }

    fn double_click(&self) -> Result<(), DriverError> {
        let point = self
            .pointer()?
            .ok_or_else(|| DriverError::Protocol("pointer has not been moved onto the page".to_string()))?;

        log::debug!("Double-clicking at ({}, {})", point.x, point.y);
        for click_count in 1..=2 {
            self.dispatch_mouse(Input::DispatchMouseEventTypeOption::MousePressed, point, click_count)?;
            self.dispatch_mouse(Input::DispatchMouseEventTypeOption::MouseReleased, point, click_count)?;
        }
        Ok(())
    }
}

/// One element resolved in a Chrome tab
pub struct ChromeElement<'a> {
    element: headless_chrome::Element<'a>,
}

impl ChromeElement<'_> {
    fn call(&self, function: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        log::trace!("Calling function on element <{}>", self.element.tag_name);
        let result = self
            .element
            .call_js_fn(function, args, false)
            .map_err(DriverError::protocol)?;

        result
            .value
            .ok_or_else(|| DriverError::UnexpectedResponse("function returned no value".to_string()))
    }

    fn call_bool(&self, function: &str, args: Vec<Value>) -> Result<bool, DriverError> {
        let value = self.call(function, args)?;
        value
            .as_bool()
            .ok_or_else(|| DriverError::UnexpectedResponse(format!("expected a boolean, got {}", value)))
    }

    fn call_string(&self, function: &str, args: Vec<Value>) -> Result<String, DriverError> {
        match self.call(function, args)? {
            Value::String(text) => Ok(text),
            other => Err(DriverError::UnexpectedResponse(format!("expected a string, got {}", other))),
        }
    }
}

impl Element for ChromeElement<'_> {
    fn click(&self) -> Result<(), DriverError> {
        if selects_by_script(&self.element.tag_name) {
            return self.call_bool(SELECT_OPTION_JS, Vec::new()).map(|_| ());
        }

        self.element.click().map_err(DriverError::protocol)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), DriverError> {
        if self.call_bool(CLEAR_JS, Vec::new())? {
            Ok(())
        } else {
            Err(DriverError::Script(format!("<{}> has no value to clear", self.element.tag_name)))
        }
    }

    fn set_value(&self, text: &str) -> Result<(), DriverError> {
        self.element.type_into(text).map_err(DriverError::protocol)?;
        Ok(())
    }

    fn submit(&self) -> Result<(), DriverError> {
        if self.call_bool(SUBMIT_JS, Vec::new())? {
            Ok(())
        } else {
            Err(DriverError::Script(format!("<{}> is not part of a form", self.element.tag_name)))
        }
    }

    fn text(&self) -> Result<String, DriverError> {
        self.element.get_inner_text().map_err(DriverError::protocol)
    }

    fn attribute(&self, name: &str) -> Result<String, DriverError> {
        let value = self
            .element
            .get_attribute_value(name)
            .map_err(DriverError::protocol)?;
        Ok(value.unwrap_or_default())
    }

    fn css(&self, property: &str) -> Result<String, DriverError> {
        self.call_string(CSS_JS, vec![Value::String(property.to_string())])
    }

    fn is_selected(&self) -> Result<bool, DriverError> {
        self.call_bool(SELECTED_JS, Vec::new())
    }

    fn is_displayed(&self) -> Result<bool, DriverError> {
        self.call_bool(DISPLAYED_JS, Vec::new())
    }
}

/// Options inside a collapsed `<select>` have no box to click, so they are picked by script
fn selects_by_script(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("option")
}
