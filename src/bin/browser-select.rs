//! browser-select
//!
//! Opens a page in Chrome, builds a selection from one or more `--find` fragments and runs a
//! single operation against it, printing the result.
//!
//! ```bash
//! browser-select https://example.com -f body -f h1 text
//! browser-select https://example.com/form -f form -f "input[name=q]" fill "rust"
//! ```

use anyhow::Context;
use browser_selection::{BrowserSession, ChromeDriver, LaunchOptions, Selection};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "browser-select", version, about = "Run one selection operation against a web page")]
struct Cli {
    /// URL of the page to open
    url: String,

    /// Selector fragment; repeat to narrow the selection to descendants
    #[arg(short = 'f', long = "find", required = true)]
    find: Vec<String>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long)]
    headed: bool,

    /// Path to the Chrome/Chromium binary
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print the number of matching elements
    Count,
    Click,
    DoubleClick,
    /// Clear the element and type TEXT into it
    Fill { text: String },
    Check,
    Uncheck,
    /// Pick the option whose text is exactly TEXT
    Select { text: String },
    Submit,
    /// Print the element's visible text
    Text,
    /// Print the value of an attribute
    Attribute { name: String },
    /// Print the computed value of a CSS property
    Css { property: String },
    /// Print whether the element is selected
    Selected,
    /// Print whether the element is visible
    Visible,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = LaunchOptions::new().headless(!cli.headed);
    if let Some(path) = cli.chrome_path {
        options = options.chrome_path(path);
    }

    let session = BrowserSession::launch(options).context("Failed to start browser")?;
    session.navigate(&cli.url)?;

    let mut fragments = cli.find.into_iter();
    let root = fragments.next().context("at least one --find fragment is required")?;
    let selection = fragments.fold(session.find(root), |selection, fragment| selection.find(fragment));

    eprintln!("Selection: {}", selection);
    if let Some(output) = run(&selection, cli.action)? {
        println!("{}", output);
    }

    Ok(())
}

fn run(selection: &Selection<'_, ChromeDriver>, action: Action) -> anyhow::Result<Option<String>> {
    let output = match action {
        Action::Count => Some(selection.count()?.to_string()),
        Action::Click => {
            selection.click()?;
            None
        }
        Action::DoubleClick => {
            selection.double_click()?;
            None
        }
        Action::Fill { text } => {
            selection.fill(&text)?;
            None
        }
        Action::Check => {
            selection.check()?;
            None
        }
        Action::Uncheck => {
            selection.uncheck()?;
            None
        }
        Action::Select { text } => {
            selection.select(&text)?;
            None
        }
        Action::Submit => {
            selection.submit()?;
            None
        }
        Action::Text => Some(selection.text()?),
        Action::Attribute { name } => Some(selection.attribute(&name)?),
        Action::Css { property } => Some(selection.css(&property)?),
        Action::Selected => Some(selection.selected()?.to_string()),
        Action::Visible => Some(selection.visible()?.to_string()),
    };

    Ok(output)
}
