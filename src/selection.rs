//! Chainable element selections
//!
//! A [`Selection`] is an immutable list of selector fragments plus a shared reference to
//! a [`Driver`]. Nothing is resolved when a selection is built: every terminal operation
//! asks the driver to resolve the full path against the live document at call time,
//! checks how many elements matched, and then drives the element primitives.
//!
//! Operations acting on a single element (everything except [`Selection::count`] and
//! [`Selection::select`]) fail when the path matches zero or several elements, rather
//! than picking the first match.

use crate::driver::{Driver, Element};
use crate::error::{DriverError, Operation, SelectionError, SelectionResult};
use std::fmt;

/// Lazily-resolved, chainable query against a driver's document
pub struct Selection<'d, D: Driver> {
    driver: &'d D,
    selectors: Vec<String>,
}

impl<'d, D: Driver> Selection<'d, D> {
    /// Create a root selection from a single selector fragment
    pub fn new(driver: &'d D, selector: impl Into<String>) -> Self {
        Self {
            driver,
            selectors: vec![selector.into()],
        }
    }

    /// Narrow the selection to descendants matching `selector`.
    ///
    /// Returns a new selection; `self` keeps its current path.
    pub fn find(&self, selector: impl Into<String>) -> Self {
        let mut selectors = self.selectors.clone();
        selectors.push(selector.into());
        Self {
            driver: self.driver,
            selectors,
        }
    }

    /// The full selector path, fragments joined by a single space
    pub fn selector(&self) -> String {
        self.selectors.join(" ")
    }

    /// The selector fragments in the order they were added
    pub fn fragments(&self) -> &[String] {
        &self.selectors
    }

    pub fn driver(&self) -> &'d D {
        self.driver
    }

    /// Number of elements the path currently matches
    pub fn count(&self) -> SelectionResult<usize> {
        let selector = self.selector();
        let elements = self.resolve(&selector, &selector)?;
        Ok(elements.len())
    }

    pub fn click(&self) -> SelectionResult<()> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        log::debug!("Clicking '{}'", selector);
        element.click().map_err(wrap(Operation::Click, &selector))
    }

    /// Move the pointer to the centre of the element, then double-click there
    pub fn double_click(&self) -> SelectionResult<()> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        log::debug!("Double-clicking '{}'", selector);
        self.driver
            .move_to(&element, None)
            .map_err(wrap(Operation::MoveTo, &selector))?;
        self.driver
            .double_click()
            .map_err(wrap(Operation::DoubleClick, &selector))
    }

    /// Clear the element's value, then enter `text`
    pub fn fill(&self, text: &str) -> SelectionResult<()> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        log::debug!("Filling '{}' with {} characters", selector, text.chars().count());
        element.clear().map_err(wrap(Operation::Clear, &selector))?;
        element
            .set_value(text)
            .map_err(wrap(Operation::EnterText, &selector))
    }

    /// Ensure the checkbox is checked, clicking it only if it is not already
    pub fn check(&self) -> SelectionResult<()> {
        self.set_checked(true)
    }

    /// Ensure the checkbox is unchecked, clicking it only if it is currently checked
    pub fn uncheck(&self) -> SelectionResult<()> {
        self.set_checked(false)
    }

    fn set_checked(&self, checked: bool) -> SelectionResult<()> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        let element_type = element
            .attribute("type")
            .map_err(wrap(Operation::ReadType, &selector))?;
        if element_type != "checkbox" {
            return Err(SelectionError::NotACheckbox { selector });
        }

        let selected = element
            .is_selected()
            .map_err(wrap(Operation::ReadState, &selector))?;
        if selected == checked {
            log::debug!("Checkbox '{}' already {}", selector, state_name(checked));
            return Ok(());
        }

        log::debug!("Toggling checkbox '{}' to {}", selector, state_name(checked));
        element.click().map_err(wrap(Operation::Toggle, &selector))
    }

    /// Visible text of the element
    pub fn text(&self) -> SelectionResult<String> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        element.text().map_err(wrap(Operation::ReadText, &selector))
    }

    pub fn attribute(&self, attribute: &str) -> SelectionResult<String> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        element
            .attribute(attribute)
            .map_err(wrap(Operation::ReadAttribute, &selector))
    }

    /// Computed value of a CSS property on the element
    pub fn css(&self, property: &str) -> SelectionResult<String> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        element
            .css(property)
            .map_err(wrap(Operation::ReadCss, &selector))
    }

    pub fn selected(&self) -> SelectionResult<bool> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        element
            .is_selected()
            .map_err(wrap(Operation::ReadSelected, &selector))
    }

    pub fn visible(&self) -> SelectionResult<bool> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        element
            .is_displayed()
            .map_err(wrap(Operation::ReadVisible, &selector))
    }

    /// Click the first `option` below the selection whose text is exactly `text`
    pub fn select(&self, text: &str) -> SelectionResult<()> {
        let selector = self.selector();
        let options = self.resolve(&selector, &format!("{} option", selector))?;

        for option in &options {
            let option_text = option
                .text()
                .map_err(wrap(Operation::ReadOptionText, &selector))?;
            if option_text != text {
                continue;
            }

            log::debug!("Selecting option \"{}\" of '{}'", text, selector);
            return option.click().map_err(|source| SelectionError::OptionClick {
                text: option_text,
                selector,
                source,
            });
        }

        Err(SelectionError::OptionNotFound {
            text: text.to_string(),
            selector,
        })
    }

    pub fn submit(&self) -> SelectionResult<()> {
        let selector = self.selector();
        let element = self.single_element(&selector)?;

        log::debug!("Submitting '{}'", selector);
        element.submit().map_err(wrap(Operation::Submit, &selector))
    }

    /// Resolve `query` through the driver; failures are reported against `selector`
    fn resolve(&self, selector: &str, query: &str) -> SelectionResult<Vec<D::Element<'d>>> {
        let elements = self
            .driver
            .elements(query)
            .map_err(|source| SelectionError::Resolve {
                selector: selector.to_string(),
                source,
            })?;

        log::debug!("Resolved '{}' to {} element(s)", query, elements.len());
        Ok(elements)
    }

    /// Resolve the path and require exactly one match
    fn single_element(&self, selector: &str) -> SelectionResult<D::Element<'d>> {
        let mut elements = self.resolve(selector, selector)?;

        if elements.len() > 1 {
            return Err(SelectionError::MultipleElements {
                selector: selector.to_string(),
                count: elements.len(),
            });
        }

        elements.pop().ok_or_else(|| SelectionError::NotFound {
            selector: selector.to_string(),
        })
    }
}

fn wrap(operation: Operation, selector: &str) -> impl FnOnce(DriverError) -> SelectionError + '_ {
    move |source| SelectionError::Operation {
        operation,
        selector: selector.to_string(),
        source,
    }
}

fn state_name(checked: bool) -> &'static str {
    if checked { "checked" } else { "unchecked" }
}

impl<D: Driver> Clone for Selection<'_, D> {
    fn clone(&self) -> Self {
        Self {
            driver: self.driver,
            selectors: self.selectors.clone(),
        }
    }
}

impl<D: Driver> fmt::Display for Selection<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

impl<D: Driver> fmt::Debug for Selection<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("selectors", &self.selectors)
            .finish()
    }
}
