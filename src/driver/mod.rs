//! Driver boundary consumed by selections
//!
//! A [`Driver`] resolves selector paths against a live remote document and performs
//! pointer gestures that need driver-level context. Each resolved node is exposed as
//! an [`Element`] handle carrying the primitive actions and reads. Handles borrow
//! their driver and are only meant to live for the single operation that resolved them.

use crate::error::DriverError;
use serde::{Deserialize, Serialize};

/// Offset relative to the top-left corner of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A remote automation backend able to resolve selector paths
pub trait Driver {
    /// Handle to one resolved node, valid for as long as the driver is borrowed
    type Element<'a>: Element
    where
        Self: 'a;

    /// Resolve `selector` to every currently matching element, in document order.
    ///
    /// An empty match is `Ok(vec![])`, not an error.
    fn elements(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, DriverError>;

    /// Move the pointer onto `element`, at `point` or at its centre when `None`
    fn move_to(&self, element: &Self::Element<'_>, point: Option<Point>) -> Result<(), DriverError>;

    /// Double-click at the current pointer position
    fn double_click(&self) -> Result<(), DriverError>;
}

/// Primitive operations on one resolved remote node
pub trait Element {
    fn click(&self) -> Result<(), DriverError>;

    fn clear(&self) -> Result<(), DriverError>;

    /// Enter `text` as the element's value
    fn set_value(&self, text: &str) -> Result<(), DriverError>;

    fn submit(&self) -> Result<(), DriverError>;

    fn text(&self) -> Result<String, DriverError>;

    /// Value of the attribute `name`; an absent attribute reads as an empty string
    fn attribute(&self, name: &str) -> Result<String, DriverError>;

    /// Computed value of the CSS `property`
    fn css(&self, property: &str) -> Result<String, DriverError>;

    fn is_selected(&self) -> Result<bool, DriverError>;

    fn is_displayed(&self) -> Result<bool, DriverError>;
}
