//! Integration tests for the open state and the dropdown list.

mod common;

use common::{default_select, strings, Recorder};
use horizon_select::{ClickTarget, Select};
use serde_json::{json, Value};

fn multi(close_on_select: bool) -> Select {
    Select::builder()
        .with_options(strings(&["one", "two", "three"]))
        .with_multiple(true)
        .configure(|c| c.close_on_select = close_on_select)
        .build()
        .unwrap()
}

#[test]
fn test_closes_after_single_selection() {
    let mut select = default_select();
    select.on_search_focus();
    select.select(json!("one"));
    assert!(!select.is_open());
}

#[test]
fn test_single_mode_closes_even_without_close_on_select() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.close_on_select = false)
        .build()
        .unwrap();
    select.on_search_focus();
    select.select(json!("one"));
    assert!(!select.is_open());
}

#[test]
fn test_multi_close_on_select() {
    let mut select = multi(true);
    select.on_search_focus();
    select.select(json!("one"));
    assert!(!select.is_open());
}

#[test]
fn test_multi_stays_open_without_close_on_select() {
    let mut select = multi(false);
    select.on_search_focus();
    select.select(json!("one"));
    assert!(select.is_open());
    assert_eq!(select.value(), json!(["one"]));
}

#[test]
fn test_open_and_close_signals() {
    let mut select = default_select();
    let opened = Recorder::attach(&select.opened);
    let closed = Recorder::attach(&select.closed);

    select.set_open(true);
    select.set_open(true);
    select.set_open(false);

    assert_eq!(opened.count(), 1);
    assert_eq!(closed.count(), 1);
}

#[test]
fn test_toggle_dropdown() {
    let mut select = default_select();
    let focus = Recorder::attach(&select.search_focus);

    select.toggle_dropdown(ClickTarget::Control);
    assert!(select.is_open());
    assert_eq!(focus.count(), 1);

    select.toggle_dropdown(ClickTarget::SearchInput);
    assert!(select.is_open());

    select.toggle_dropdown(ClickTarget::SelectedTag);
    assert!(!select.is_open());
}

#[test]
fn test_toggle_ignores_buttons() {
    let mut select = default_select();
    select.toggle_dropdown(ClickTarget::ClearButton);
    select.toggle_dropdown(ClickTarget::DeselectButton);
    assert!(!select.is_open());

    select.set_open(true);
    select.toggle_dropdown(ClickTarget::DeselectButton);
    assert!(select.is_open());
}

#[test]
fn test_disabled_does_not_open() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.disabled = true)
        .build()
        .unwrap();
    select.toggle_dropdown(ClickTarget::Control);
    assert!(!select.is_open());
}

#[test]
fn test_dropdown_visibility() {
    let mut select = default_select();
    assert!(!select.is_dropdown_open());

    select.set_open(true);
    assert!(select.is_dropdown_open());

    select.set_loading(true);
    assert!(!select.is_dropdown_open());
}

#[test]
fn test_no_drop_hides_list() {
    let mut select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.no_drop = true)
        .build()
        .unwrap();
    select.set_open(true);
    assert!(select.is_open());
    assert!(!select.is_dropdown_open());
}

#[test]
fn test_dropdown_should_open_overrides_default() {
    let select = Select::builder()
        .with_options(strings(&["one"]))
        .configure(|c| c.no_drop = true)
        .with_dropdown_should_open(|_| true)
        .build()
        .unwrap();
    assert!(select.is_dropdown_open());
}

#[test]
fn test_deselect_from_dropdown() {
    let mut select = Select::builder()
        .with_options(strings(&["one", "two"]))
        .configure(|c| c.deselect_from_dropdown = true)
        .build()
        .unwrap();
    let values = Recorder::attach(&select.value_changed);

    select.select(json!("one"));
    assert!(select.is_option_deselectable(&json!("one")));
    assert!(!select.is_option_deselectable(&json!("two")));

    select.select(json!("one"));
    assert!(select.is_value_empty());
    assert_eq!(values.events(), vec![json!("one"), Value::Null]);
}

#[test]
fn test_deselect_from_dropdown_keeps_last_unclearable_value() {
    let mut select = Select::builder()
        .with_options(strings(&["one", "two"]))
        .with_multiple(true)
        .configure(|c| {
            c.deselect_from_dropdown = true;
            c.clearable = false;
        })
        .build()
        .unwrap();

    select.select(json!("one"));
    select.select(json!("two"));
    select.select(json!("one"));
    assert_eq!(select.value(), json!(["two"]));

    select.select(json!("two"));
    assert_eq!(select.value(), json!(["two"]));
}

#[test]
fn test_reselect_without_deselect_from_dropdown() {
    let mut select = default_select();
    let values = Recorder::attach(&select.value_changed);
    select.select(json!("one"));
    select.select(json!("one"));
    assert_eq!(select.value(), json!("one"));
    assert_eq!(values.count(), 1);
}

#[test]
fn test_selection_events_in_order() {
    let mut select = multi(false);
    let selecting = Recorder::attach(&select.option_selecting);
    let selected = Recorder::attach(&select.option_selected);
    let deselecting = Recorder::attach(&select.option_deselecting);
    let deselected = Recorder::attach(&select.option_deselected);

    select.toggle(json!("two"));
    select.toggle(json!("two"));
    select.deselect(&json!("three"));

    assert_eq!(selecting.events(), vec![json!("two")]);
    assert_eq!(selected.events(), vec![json!("two")]);
    assert_eq!(deselecting.events(), vec![json!("two")]);
    assert_eq!(deselected.events(), vec![json!("two")]);
}

#[test]
fn test_clear_selection() {
    let mut select = multi(false);
    select.set_value(json!(["one", "two"]));
    let values = Recorder::attach(&select.value_changed);

    select.clear_selection();
    assert!(select.is_value_empty());
    assert_eq!(values.events(), vec![json!([])]);
}

#[test]
fn test_changing_multiple_clears_selection() {
    let mut select = default_select();
    select.set_value(json!("one"));
    let values = Recorder::attach(&select.value_changed);

    select.set_multiple(true);
    assert!(select.is_multiple());
    assert_eq!(values.events(), vec![json!([])]);

    select.set_multiple(true);
    assert_eq!(values.count(), 1);
}
