//! Horizon Autocomplete Headless Session Example
//!
//! Attaches a widget to an in-memory document, types a query, waits for the
//! suggestions and walks the dropdown with the keyboard:
//! - Debounced fetch against an HTTP endpoint (or a built-in word list)
//! - Rendered dropdown markup printed to the console
//! - Arrow navigation and Enter to commit
//!
//! Run with: cargo run -p horizon-autocomplete --example headless_session -- [query] [endpoint]
//!
//! Set `RUST_LOG=horizon_autocomplete=debug` to watch the widget's transitions.

use std::env;
use std::error::Error;
use std::time::Duration;

use horizon_autocomplete::dom::{Dom, DomEvent, Key, MemoryDocument};
use horizon_autocomplete::net::{HttpClient, HttpSuggestionSource};
use horizon_autocomplete::{
    AutoCompleteDriver, AutoCompleteOptions, CaseSensitivity, StaticSuggestionSource,
    SuggestionSource,
};
use tracing_subscriber::EnvFilter;

const WORDS: &[&str] = &[
    "apple",
    "application",
    "apricot",
    "banana",
    "blueberry",
    "cherry",
    "grape",
    "green",
    "red",
    "redcurrant",
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("horizon_autocomplete::fetch=error")),
        )
        .init();

    let mut args = env::args().skip(1);
    let query = args.next().unwrap_or_else(|| "ap".to_string());

    match args.next() {
        Some(endpoint) => {
            println!("Fetching suggestions from {endpoint}");
            let source = HttpSuggestionSource::new(HttpClient::new());
            run(source, AutoCompleteOptions::new(endpoint), &query)
        }
        None => {
            println!("No endpoint given, using the built-in word list");
            let source = StaticSuggestionSource::from(WORDS.to_vec())
                .with_case_sensitivity(CaseSensitivity::CaseInsensitive);
            run(source, AutoCompleteOptions::new("/autocomplete.json"), &query)
        }
    }
}

fn run(
    source: impl SuggestionSource + 'static,
    options: AutoCompleteOptions,
    query: &str,
) -> Result<(), Box<dyn Error>> {
    let mut doc = MemoryDocument::new();
    let form = doc.create_element("form");
    let input = doc.create_element("input");
    doc.append_child(doc.body(), form)?;
    doc.append_child(form, input)?;

    let fetch_delay = options.fetch_delay();
    let mut driver = AutoCompleteDriver::new(doc, input, options, source)?;

    driver.widget().highlighted.connect(|value| println!("  highlighted: {value}"));
    driver.widget().activated.connect(|value| println!("  activated:   {value}"));
    driver
        .widget()
        .fetch_failed
        .connect(|message| println!("  fetch failed: {message}"));

    println!("Typing {query:?}");
    driver.type_text(query)?;
    driver.advance(fetch_delay)?;
    if !driver.widget().is_open() {
        driver.wait_for_replies(Duration::from_secs(5))?;
    }

    let widget = driver.widget();
    if !widget.is_open() {
        println!("No suggestions for {query:?}");
        return Ok(());
    }

    println!("{} suggestion(s):", widget.items().len());
    for item in widget.rendered_items() {
        let marked: String = item
            .segments
            .iter()
            .map(|segment| {
                if segment.is_match() {
                    format!("[{}]", segment.as_str())
                } else {
                    segment.as_str().to_string()
                }
            })
            .collect();
        println!("  {marked}");
    }
    println!("Markup: {}", widget.markup());

    println!("Selecting the second suggestion");
    driver.dispatch(DomEvent::KeyUp(Key::ArrowDown))?;
    driver.dispatch(DomEvent::KeyUp(Key::ArrowDown))?;
    driver.dispatch(DomEvent::KeyUp(Key::Enter))?;

    let value = driver.document().value(input).unwrap_or_default();
    println!("Input value is now {value:?}");
    Ok(())
}
