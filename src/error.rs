use std::fmt;
use thiserror::Error;

/// Errors raised while managing the browser session itself
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Result alias for session-level operations
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors reported by a [`Driver`](crate::driver::Driver) or one of its element handles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The command could not be delivered or the remote end rejected it
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A script run against the remote document threw or reported failure
    #[error("script error: {0}")]
    Script(String),

    /// The remote end answered with a value of the wrong shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl DriverError {
    pub fn protocol(err: impl fmt::Display) -> Self {
        Self::Protocol(err.to_string())
    }
}

/// The primitive step that failed while running a selection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Click,
    MoveTo,
    DoubleClick,
    Clear,
    EnterText,
    ReadType,
    ReadState,
    Toggle,
    ReadText,
    ReadAttribute,
    ReadCss,
    ReadSelected,
    ReadVisible,
    ReadOptionText,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Operation::Click => "click on",
            Operation::MoveTo => "move mouse to",
            Operation::DoubleClick => "double-click on",
            Operation::Clear => "clear",
            Operation::EnterText => "enter text into",
            Operation::ReadType => "retrieve type of",
            Operation::ReadState => "retrieve state of",
            Operation::Toggle => "click",
            Operation::ReadText => "retrieve text for",
            Operation::ReadAttribute => "retrieve attribute value for",
            Operation::ReadCss => "retrieve CSS property for",
            Operation::ReadSelected => "determine selected state of",
            Operation::ReadVisible => "determine visibility of",
            Operation::ReadOptionText => "retrieve option text for",
            Operation::Submit => "submit",
        };
        f.write_str(phrase)
    }
}

/// Errors raised by [`Selection`](crate::selection::Selection) operations.
///
/// Every variant carries the rendered selector path of the selection that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("failed to retrieve elements for selector '{selector}': {source}")]
    Resolve {
        selector: String,
        #[source]
        source: DriverError,
    },

    #[error("failed to retrieve element with selector '{selector}': no element found")]
    NotFound { selector: String },

    #[error("failed to retrieve element with selector '{selector}': multiple elements ({count}) were selected")]
    MultipleElements { selector: String, count: usize },

    #[error("selector '{selector}' does not refer to a checkbox")]
    NotACheckbox { selector: String },

    #[error("no options with text \"{text}\" found for selector '{selector}'")]
    OptionNotFound { text: String, selector: String },

    #[error("failed to click on option with text \"{text}\" for selector '{selector}': {source}")]
    OptionClick {
        text: String,
        selector: String,
        #[source]
        source: DriverError,
    },

    #[error("failed to {operation} selector '{selector}': {source}")]
    Operation {
        operation: Operation,
        selector: String,
        #[source]
        source: DriverError,
    },
}

impl SelectionError {
    /// The rendered selector path of the selection that raised this error
    pub fn selector(&self) -> &str {
        match self {
            SelectionError::Resolve { selector, .. }
            | SelectionError::NotFound { selector }
            | SelectionError::MultipleElements { selector, .. }
            | SelectionError::NotACheckbox { selector }
            | SelectionError::OptionNotFound { selector, .. }
            | SelectionError::OptionClick { selector, .. }
            | SelectionError::Operation { selector, .. } => selector,
        }
    }

    /// Whether this error is a cardinality violation (zero or several matches)
    pub fn is_cardinality(&self) -> bool {
        matches!(self, SelectionError::NotFound { .. } | SelectionError::MultipleElements { .. })
    }
}

/// Result alias for selection operations
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
