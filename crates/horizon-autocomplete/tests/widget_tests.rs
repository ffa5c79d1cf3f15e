//! Widget behaviour driven through the in-memory document.

mod common;

use std::sync::Arc;
use std::time::Duration;

use horizon_autocomplete::dom::{ClickTarget, Dom, DomEvent, Key};
use horizon_autocomplete::widget::Segment;
use horizon_autocomplete::{
    AutoComplete, AutoCompleteDriver, AutoCompleteOptions, ConfigError, DomError, Error,
    FnSuggestionSource, HighlightMode, Phase, SuggestionRequest,
};
use parking_lot::Mutex;

use common::{document, endpoint, options, recording_source, strings, LogBuffer};

const FETCH_DELAY: Duration = Duration::from_millis(500);

type Driver = AutoCompleteDriver<horizon_autocomplete::dom::MemoryDocument>;

fn driver() -> Driver {
    let (doc, input) = document();
    AutoCompleteDriver::new(doc, input, options(), FnSuggestionSource::new(endpoint)).unwrap()
}

fn search(driver: &mut Driver, text: &str) {
    driver.type_text(text).unwrap();
    driver.advance(FETCH_DELAY).unwrap();
}

fn key(driver: &mut Driver, key: Key) {
    driver.dispatch(DomEvent::KeyUp(key)).unwrap();
}

#[test]
fn test_missing_url_fails_before_any_mutation() {
    let (mut doc, input) = document();
    let before = doc.mutation_count();
    let elements = doc.element_count();

    let result = AutoComplete::new(&mut doc, input, AutoCompleteOptions::default());

    assert!(matches!(result, Err(Error::Config(ConfigError::MissingUrl))));
    assert_eq!(doc.mutation_count(), before);
    assert_eq!(doc.element_count(), elements);
    assert_eq!(doc.attribute(input, "autocomplete"), None);
}

#[test]
fn test_missing_url_from_json_options() {
    let (doc, input) = document();
    let options = AutoCompleteOptions::from_json_str(r#"{ "minCharacters": 1 }"#).unwrap();

    let result = AutoCompleteDriver::new(doc, input, options, FnSuggestionSource::new(endpoint));
    assert!(matches!(result, Err(Error::Config(ConfigError::MissingUrl))));
}

#[test]
fn test_input_without_parent_is_a_dom_error() {
    let (mut doc, _) = document();
    let detached = doc.create_element("input");

    let result = AutoComplete::new(&mut doc, detached, options());
    assert!(matches!(result, Err(Error::Dom(DomError::NoParent(_)))));
}

#[test]
fn test_short_query_issues_no_request() {
    let (doc, input) = document();
    let (source, requests) = recording_source();
    let mut driver = AutoCompleteDriver::new(doc, input, options(), source).unwrap();

    search(&mut driver, "app");
    assert!(driver.widget().is_open());
    assert_eq!(requests.lock().len(), 1);

    search(&mut driver, "a");
    assert_eq!(requests.lock().len(), 1);
    assert!(driver.widget().items().is_empty());
    assert!(!driver.widget().is_open());
    assert_eq!(driver.document().inner_html(driver.widget().container()).as_deref(), Some(""));
}

#[test]
fn test_min_characters_counts_characters() {
    let (doc, input) = document();
    let (source, requests) = recording_source();
    let options = options().with_min_characters(3);
    let mut driver = AutoCompleteDriver::new(doc, input, options, source).unwrap();

    // Two characters, six bytes.
    search(&mut driver, "日本");
    assert!(requests.lock().is_empty());

    search(&mut driver, "日本語");
    assert_eq!(requests.lock().len(), 1);
}

#[test]
fn test_only_the_last_debounce_fires() {
    let (doc, input) = document();
    let (source, requests) = recording_source();
    let mut driver = AutoCompleteDriver::new(doc, input, options(), source).unwrap();

    for text in ["a", "ap", "app"] {
        driver.type_text(text).unwrap();
        driver.advance(Duration::from_millis(100)).unwrap();
    }
    assert!(requests.lock().is_empty());
    assert_eq!(driver.pending_timers(), 1);

    driver.advance(Duration::from_millis(400)).unwrap();

    let requests = requests.lock();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "app");
    assert_eq!(requests[0].url, "/autocomplete.json?query=app");
}

#[test]
fn test_query_highlighting() {
    let mut driver = driver();
    search(&mut driver, "app");

    let widget = driver.widget();
    assert_eq!(widget.items(), &strings(&["apple", "application", "banana"])[..]);

    let rendered = widget.rendered_items();
    assert_eq!(
        rendered[0].segments,
        vec![Segment::Match("app".into()), Segment::Text("le".into())]
    );
    assert_eq!(
        rendered[1].segments,
        vec![Segment::Match("app".into()), Segment::Text("lication".into())]
    );
    assert_eq!(rendered[2].segments, vec![Segment::Text("banana".into())]);

    let markup = driver.document().inner_html(widget.container()).unwrap();
    assert_eq!(
        markup
            .matches(r#"<span class="autocomplete__highlight">app</span>"#)
            .count(),
        2
    );
    assert!(markup.contains(
        r#"<li class="autocomplete__item" data-autocomplete-value="banana">banana</li>"#
    ));
}

#[test]
fn test_arrow_navigation_clamps() {
    let mut driver = driver();
    search(&mut driver, "abc");
    assert_eq!(driver.widget().selected_index(), None);

    key(&mut driver, Key::ArrowDown);
    assert_eq!(driver.widget().selected_index(), Some(0));

    key(&mut driver, Key::ArrowDown);
    key(&mut driver, Key::ArrowDown);
    assert_eq!(driver.widget().selected_index(), Some(2));

    key(&mut driver, Key::ArrowDown);
    assert_eq!(driver.widget().selected_index(), Some(2));

    key(&mut driver, Key::ArrowUp);
    key(&mut driver, Key::ArrowUp);
    assert_eq!(driver.widget().selected_index(), Some(0));

    key(&mut driver, Key::ArrowUp);
    assert_eq!(driver.widget().selected_index(), Some(0));
}

#[test]
fn test_arrow_up_from_no_selection_selects_first() {
    let mut driver = driver();
    search(&mut driver, "abc");

    key(&mut driver, Key::ArrowUp);
    assert_eq!(driver.widget().selected_index(), Some(0));
}

#[test]
fn test_selection_is_rendered() {
    let mut driver = driver();
    search(&mut driver, "abc");

    key(&mut driver, Key::ArrowDown);
    key(&mut driver, Key::ArrowDown);

    let markup = driver
        .document()
        .inner_html(driver.widget().container())
        .unwrap();
    assert!(markup.contains(
        r#"<li class="autocomplete__item autocomplete__item--selected" data-autocomplete-value="b">"#
    ));
    assert_eq!(markup.matches("autocomplete__item--selected").count(), 1);
}

#[test]
fn test_enter_commits_selection_and_closes() {
    let mut driver = driver();
    let committed = Arc::new(Mutex::new(Vec::new()));
    let committed_clone = committed.clone();
    driver
        .widget()
        .activated
        .connect(move |value| committed_clone.lock().push(value.clone()));

    search(&mut driver, "abc");
    key(&mut driver, Key::ArrowDown);
    key(&mut driver, Key::ArrowDown);
    assert_eq!(driver.widget().selected_index(), Some(1));

    key(&mut driver, Key::Enter);

    let widget = driver.widget();
    let input = widget.input();
    assert_eq!(driver.document().value(input).as_deref(), Some("b"));
    assert_eq!(widget.phase(), Phase::Closed);
    assert_eq!(widget.selected_index(), None);
    assert!(!widget.has_pending_close());
    assert!(!driver.document().has_class(input, "input--autocompleting"));
    assert!(!driver.document().has_class(widget.container(), "autocomplete--visible"));
    assert_eq!(*committed.lock(), vec!["b".to_string()]);
}

#[test]
fn test_enter_without_selection_does_nothing() {
    let mut driver = driver();
    search(&mut driver, "abc");
    let input = driver.widget().input();

    key(&mut driver, Key::Enter);

    assert!(driver.widget().is_open());
    assert_eq!(driver.document().value(input).as_deref(), Some("abc"));
}

#[test]
fn test_highlighted_signal_follows_selection() {
    let mut driver = driver();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    driver
        .widget()
        .highlighted
        .connect(move |value| seen_clone.lock().push(value.clone()));

    search(&mut driver, "abc");
    key(&mut driver, Key::ArrowDown);
    key(&mut driver, Key::ArrowDown);
    key(&mut driver, Key::ArrowDown);
    // Clamped at the end: no change, no emission.
    key(&mut driver, Key::ArrowDown);

    assert_eq!(*seen.lock(), strings(&["a", "b", "c"]));
}

#[test]
fn test_server_error_is_recovered() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "horizon_autocomplete::fetch=error",
        ))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let failures = Arc::new(Mutex::new(Vec::new()));
    let (widget_open, items_empty, input_active, results) =
        tracing::subscriber::with_default(subscriber, || {
            let mut driver = driver();
            let failures_clone = failures.clone();
            driver
                .widget()
                .fetch_failed
                .connect(move |message| failures_clone.lock().push(message.clone()));

            let typed = driver.type_text("xy");
            let advanced = driver.advance(FETCH_DELAY);

            let widget = driver.widget();
            (
                widget.is_open(),
                widget.items().is_empty(),
                driver
                    .document()
                    .has_class(widget.input(), "input--autocompleting"),
                (typed.is_ok(), advanced.is_ok()),
            )
        });

    assert_eq!(results, (true, true));
    assert!(!widget_open);
    assert!(items_empty);
    assert!(!input_active);
    assert_eq!(
        *failures.lock(),
        vec!["HTTP 500: Internal Server Error".to_string()]
    );

    let logs = buffer.contents();
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("suggestion fetch failed"));
}

#[test]
fn test_red_green_scenario() {
    let mut driver = driver();
    search(&mut driver, "re");

    let widget = driver.widget();
    assert!(widget.is_open());
    assert_eq!(widget.items(), &strings(&["red", "green"])[..]);

    let red = &widget.rendered_items()[0];
    assert_eq!(red.segments[0], Segment::Match("re".into()));
    assert_eq!(red.segments[0].as_str().chars().count(), 2);
    assert_eq!(red.segments[1], Segment::Text("d".into()));

    let green = &widget.rendered_items()[1];
    assert!(!green.has_highlight());
    assert_eq!(green.segments, vec![Segment::Text("green".into())]);

    let input = widget.input();
    assert!(driver.document().has_class(input, "input--autocompleting"));
    assert!(driver.document().has_class(widget.container(), "autocomplete--visible"));
}

#[test]
fn test_item_click_commits_value() {
    let mut driver = driver();
    search(&mut driver, "re");
    let target = driver.widget().item_click_target(1).unwrap();

    driver.dispatch(DomEvent::ContainerClick(target)).unwrap();

    let input = driver.widget().input();
    assert_eq!(driver.document().value(input).as_deref(), Some("green"));
    assert!(!driver.widget().is_open());
}

#[test]
fn test_click_outside_items_is_ignored() {
    let mut driver = driver();
    search(&mut driver, "re");
    let input = driver.widget().input();

    let list = ClickTarget::new(vec!["autocomplete__list".to_string()], None);
    driver.dispatch(DomEvent::ContainerClick(list)).unwrap();

    assert!(driver.widget().is_open());
    assert_eq!(driver.document().value(input).as_deref(), Some("re"));
}

#[test]
fn test_empty_reply_keeps_dropdown_closed() {
    let mut driver = driver();
    search(&mut driver, "zzz");

    let widget = driver.widget();
    assert!(!widget.is_open());
    assert!(widget.items().is_empty());
    assert!(!driver.document().has_class(widget.container(), "autocomplete--visible"));
}

#[test]
fn test_focus_reopens_previous_results() {
    let mut driver = driver();
    search(&mut driver, "re");
    key(&mut driver, Key::ArrowDown);

    driver.dispatch(DomEvent::Blur { related: None }).unwrap();
    driver.advance(Duration::from_millis(150)).unwrap();
    assert!(!driver.widget().is_open());

    driver.dispatch(DomEvent::Focus).unwrap();

    let widget = driver.widget();
    assert!(widget.is_open());
    assert_eq!(widget.selected_index(), None);
    assert!(driver.document().has_class(widget.input(), "input--autocompleting"));
    let markup = driver.document().inner_html(widget.container()).unwrap();
    assert!(!markup.contains("--selected"));
    assert_eq!(markup, widget.markup());
}

#[test]
fn test_click_on_input_acts_as_focus() {
    let mut driver = driver();
    search(&mut driver, "re");
    driver.dispatch(DomEvent::Blur { related: None }).unwrap();
    driver.advance(Duration::from_millis(150)).unwrap();

    driver.dispatch(DomEvent::Click).unwrap();
    assert!(driver.widget().is_open());
}

#[test]
fn test_arrow_key_reopens_closed_dropdown() {
    let mut driver = driver();
    search(&mut driver, "re");
    driver.dispatch(DomEvent::Blur { related: None }).unwrap();
    driver.advance(Duration::from_millis(150)).unwrap();

    key(&mut driver, Key::ArrowDown);

    assert!(driver.widget().is_open());
    assert_eq!(driver.widget().selected_index(), Some(0));
}

#[test]
fn test_key_codes_drive_navigation() {
    let mut driver = driver();
    search(&mut driver, "abc");

    for code in [40, 40, 38, 13] {
        key(&mut driver, Key::from_key_code(code));
    }

    let input = driver.widget().input();
    assert_eq!(driver.document().value(input).as_deref(), Some("a"));
}

#[test]
fn test_pattern_highlight_mode() {
    let (doc, input) = document();
    let source = FnSuggestionSource::new(|_: &SuggestionRequest| Ok(strings(&["abc", "xyz"])));
    let options = options().with_highlight_mode(HighlightMode::Pattern);
    let mut driver = AutoCompleteDriver::new(doc, input, options, source).unwrap();

    search(&mut driver, "a.c");

    let rendered = driver.widget().rendered_items();
    assert_eq!(rendered[0].segments, vec![Segment::Match("abc".into())]);
    assert!(!rendered[1].has_highlight());
}

#[test]
fn test_custom_class_names() {
    let (doc, input) = document();
    let options = options()
        .with_base_class("suggest")
        .with_input_class_name("field");
    let mut driver =
        AutoCompleteDriver::new(doc, input, options, FnSuggestionSource::new(endpoint)).unwrap();

    search(&mut driver, "re");

    let widget = driver.widget();
    let doc = driver.document();
    assert!(doc.has_class(widget.container(), "suggest"));
    assert!(doc.has_class(widget.container(), "suggest--visible"));
    assert!(doc.has_class(input, "field--autocompleting"));
    assert!(widget.markup().starts_with(r#"<ul class="suggest__list">"#));
}
