//! Integration tests for keydown dispatch in the search input.

mod common;

use common::{default_select, init_tracing, multi_select, strings, Recorder};
use horizon_select::{codes, KeyAction, Select};
use serde_json::{json, Value};

#[test]
fn test_backspace_removes_last_value_in_multi_mode() {
    let mut select = multi_select();
    select.set_value(json!(["one", "two"]));
    let values = Recorder::attach(&select.value_changed);

    assert!(select.on_search_keydown(codes::BACKSPACE));
    assert_eq!(values.events(), vec![json!(["one"])]);
}

#[test]
fn test_backspace_clears_single_value() {
    let mut select = default_select();
    select.set_value(json!("one"));
    let values = Recorder::attach(&select.value_changed);

    select.on_search_keydown(codes::BACKSPACE);
    assert!(select.is_value_empty());
    assert_eq!(values.events(), vec![Value::Null]);
}

#[test]
fn test_backspace_keeps_value_while_searching() {
    let mut select = multi_select();
    select.set_value(json!(["one"]));
    select.set_search("t");

    select.on_search_keydown(codes::BACKSPACE);
    assert_eq!(select.value(), json!(["one"]));
}

#[test]
fn test_backspace_keeps_value_when_not_clearable() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.clearable = false)
        .with_value(json!("one"))
        .build()
        .unwrap();

    select.on_search_keydown(codes::BACKSPACE);
    assert_eq!(select.value(), json!("one"));
}

#[test]
fn test_tab_selects_when_enabled() {
    let mut select = Select::builder()
        .with_options(strings(&["one", "two"]))
        .configure(|c| c.select_on_tab = true)
        .build()
        .unwrap();
    select.on_search_focus();

    assert!(select.on_search_keydown(codes::TAB));
    assert_eq!(select.value(), json!("one"));
}

#[test]
fn test_tab_does_nothing_by_default() {
    let mut select = default_select();
    select.on_search_focus();

    select.on_search_keydown(codes::TAB);
    assert!(select.is_value_empty());
}

#[test]
fn test_enter_selects_highlighted_option() {
    let mut select = default_select();
    select.on_search_focus();

    select.on_search_keydown(codes::ENTER);
    assert_eq!(select.value(), json!("one"));
}

#[test]
fn test_custom_select_key_codes() {
    let mut select = Select::builder()
        .with_options(strings(&["one", "two"]))
        .configure(|c| c.select_on_key_codes = vec![codes::SPACE])
        .build()
        .unwrap();

    assert!(!select.on_search_keydown(codes::ENTER));
    assert!(select.is_value_empty());

    assert!(select.on_search_keydown(codes::SPACE));
    assert_eq!(select.value(), json!("one"));
}

#[test]
fn test_map_keydown_adds_handler() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .with_map_keydown(|map| {
            map.with(codes::SPACE, KeyAction::custom(|select| select.set_search("custom")))
        })
        .build()
        .unwrap();

    assert!(select.on_search_keydown(codes::SPACE));
    assert_eq!(select.search(), "custom");
}

#[test]
fn test_map_keydown_can_remove_bindings() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .with_map_keydown(|mut map| {
            map.remove(codes::ENTER);
            map
        })
        .build()
        .unwrap();

    assert!(!select.on_search_keydown(codes::ENTER));
    assert!(select.is_value_empty());
}

#[test]
fn test_unbound_key_is_not_handled() {
    let mut select = default_select();
    assert!(!select.on_search_keydown(65));
}

#[test]
fn test_escape_clears_search_then_closes() {
    let mut select = default_select();
    let blurs = Recorder::attach(&select.search_blur);
    select.on_search_focus();
    select.set_search("foo");

    select.on_search_keydown(codes::ESCAPE);
    assert_eq!(select.search(), "");
    assert!(select.is_open());
    assert_eq!(blurs.count(), 0);

    select.on_search_keydown(codes::ESCAPE);
    assert!(!select.is_open());
    assert_eq!(blurs.count(), 1);
}

#[test]
fn test_arrow_keys_open_before_moving() {
    let mut select = default_select();

    select.on_search_keydown(codes::ARROW_DOWN);
    assert!(select.is_open());
    assert_eq!(select.pointer_index(), Some(0));

    select.on_search_keydown(codes::ARROW_DOWN);
    assert_eq!(select.pointer_index(), Some(1));

    select.on_search_keydown(codes::ARROW_UP);
    assert_eq!(select.pointer_index(), Some(0));
}

#[test]
fn test_arrow_up_opens_closed_select() {
    let mut select = default_select();
    select.on_search_keydown(codes::ARROW_UP);
    assert!(select.is_open());
}

#[test]
fn test_enter_ignored_while_composing() {
    init_tracing();
    let mut select = default_select();
    select.on_search_focus();

    select.on_composition_start();
    assert!(select.is_composing());
    select.on_search_keydown(codes::ENTER);
    assert!(select.is_value_empty());

    select.on_composition_end();
    select.on_search_keydown(codes::ENTER);
    assert_eq!(select.value(), json!("one"));
}

#[test]
fn test_tab_ignored_while_composing() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.select_on_tab = true)
        .build()
        .unwrap();

    select.on_composition_start();
    select.on_search_keydown(codes::TAB);
    assert!(select.is_value_empty());
}
