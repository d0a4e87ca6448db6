use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::{
    domain::{AddressField, InputKind, ItemValue, WidgetOptions},
    store::MemoryFieldStore,
};

fn press(app: &mut App<MemoryFieldStore>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn chord(app: &mut App<MemoryFieldStore>, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key(KeyEvent::new(code, modifiers));
}

fn type_text(app: &mut App<MemoryFieldStore>, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn app_with(store: &MemoryFieldStore, options: WidgetOptions) -> App<MemoryFieldStore> {
    let controller = ListController::mount(store.clone(), options);
    App::new(controller, UiOptions::default())
}

fn seeded_store() -> MemoryFieldStore {
    MemoryFieldStore::with_items(vec![
        ListItem::new("a", ItemValue::from("alpha"), 0),
        ListItem::new("b", ItemValue::from("beta"), 1),
        ListItem::new("c", ItemValue::from("gamma"), 2),
    ])
}

fn values(store: &MemoryFieldStore) -> Vec<String> {
    store
        .value()
        .unwrap_or_default()
        .iter()
        .map(ListItem::summary)
        .collect()
}

#[test]
fn empty_list_starts_in_draft_and_enter_saves() {
    let store = MemoryFieldStore::new();
    let mut app = app_with(&store, WidgetOptions::scalar(InputKind::Url));
    assert_eq!(app.context(), KeymapContext::Draft);

    type_text(&mut app, "http://x.com");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "home");
    press(&mut app, KeyCode::Enter);

    let stored = store.value().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].value, ItemValue::from("http://x.com"));
    assert_eq!(stored[0].item_type.as_deref(), Some("home"));
    assert_eq!(app.status.message(), "Saved");
}

#[test]
fn invalid_draft_reports_instead_of_saving() {
    let store = MemoryFieldStore::new();
    let mut app = app_with(&store, WidgetOptions::scalar(InputKind::Url));
    type_text(&mut app, "not-a-url");
    press(&mut app, KeyCode::Enter);
    assert_eq!(store.write_count(), 1, "only the mount normalization");
    assert_eq!(app.status.message(), "1 field(s) need attention before saving");
}

#[test]
fn list_keys_reorder_and_delete_the_selection() {
    let store = seeded_store();
    let mut app = app_with(&store, WidgetOptions::default());
    assert_eq!(app.context(), KeymapContext::List);

    press(&mut app, KeyCode::Down);
    chord(&mut app, KeyCode::Down, KeyModifiers::ALT);
    assert_eq!(values(&store), vec!["alpha", "gamma", "beta"]);
    assert_eq!(app.selected, 2, "selection follows the moved row");

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(values(&store), vec!["alpha", "gamma"]);
    assert_eq!(app.selected, 1);
}

#[test]
fn selection_tracks_moved_row_after_external_reorder() {
    let store = seeded_store();
    let mut app = app_with(&store, WidgetOptions::default());
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected, 1);

    store.set_external(vec![
        ListItem::new("c", ItemValue::from("gamma"), 0),
        ListItem::new("a", ItemValue::from("alpha"), 1),
        ListItem::new("b", ItemValue::from("beta"), 2),
    ]);
    chord(&mut app, KeyCode::Up, KeyModifiers::ALT);
    assert_eq!(values(&store), vec!["gamma", "beta", "alpha"]);
    assert_eq!(app.selected, 1);
    assert_eq!(app.controller.items()[app.selected].id, "b");
}

#[test]
fn edit_round_trip_through_keys() {
    let store = seeded_store();
    let mut app = app_with(&store, WidgetOptions::default());
    press(&mut app, KeyCode::Enter);
    assert!(app.controller.is_editing());
    assert_eq!(app.context(), KeymapContext::Draft);

    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "A");
    press(&mut app, KeyCode::Enter);
    assert!(!app.controller.is_editing());
    assert_eq!(values(&store), vec!["alphA", "beta", "gamma"]);
    assert_eq!(app.context(), KeymapContext::List);
}

#[test]
fn escape_discards_edit_without_writing() {
    let store = seeded_store();
    let mut app = app_with(&store, WidgetOptions::default());
    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, "zzz");
    press(&mut app, KeyCode::Esc);
    assert!(!app.controller.is_editing());
    assert_eq!(store.write_count(), 0);
    assert_eq!(app.context(), KeymapContext::List);
}

#[test]
fn quitting_with_a_draft_needs_confirmation() {
    let store = MemoryFieldStore::new();
    let mut app = app_with(&store, WidgetOptions::default());
    type_text(&mut app, "pending");
    chord(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(!app.should_quit);
    assert!(app.exit_armed);
    chord(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}

#[test]
fn quitting_clean_is_immediate() {
    let mut app = app_with(&seeded_store(), WidgetOptions::default());
    chord(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}

#[test]
fn country_picker_filters_and_resets_province() {
    let store = MemoryFieldStore::new();
    let mut app = app_with(&store, WidgetOptions::address());
    assert_eq!(
        app.current_field(),
        Some(DraftField::Address(AddressField::Country))
    );

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.context(), KeymapContext::Picker);
    type_text(&mut app, "ontar");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.controller.new_draft().get(DraftField::Address(AddressField::Province)),
        Some("Ontario")
    );

    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "zeal");
    press(&mut app, KeyCode::Enter);
    let draft = app.controller.new_draft();
    assert_eq!(
        draft.get(DraftField::Address(AddressField::Country)),
        Some("New Zealand")
    );
    assert_eq!(
        draft.get(DraftField::Address(AddressField::Province)),
        Some("")
    );
    assert_eq!(app.context(), KeymapContext::Draft);
}

#[test]
fn typing_on_a_picker_field_does_not_edit_it() {
    let mut app = app_with(&MemoryFieldStore::new(), WidgetOptions::address());
    type_text(&mut app, "x");
    assert_eq!(
        app.controller.new_draft().get(DraftField::Address(AddressField::Country)),
        Some("Canada")
    );
    assert_eq!(app.status.message(), "Press Enter to pick from the list");
}

#[test]
fn tick_picks_up_external_changes() {
    let store = seeded_store();
    let mut app = app_with(&store, WidgetOptions::default());
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    store.set_external(vec![ListItem::new("z", ItemValue::from("only"), 0)]);
    app.on_tick();
    assert_eq!(app.selected, 0);
    assert_eq!(app.status.message(), "List changed elsewhere; reloaded");
}
