use std::fs;

use field_repeater::{
    Address, DraftField, FieldStore, ItemValue, JsonFileStore, ListController, ListItem,
    StoreError, WidgetOptions,
};
use serde_json::{Value, json};

#[test]
fn round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contact.json");
    let mut store = JsonFileStore::open(&path, "#/fields/addresses").unwrap();

    let list = vec![
        ListItem::new(
            "a",
            ItemValue::from(Address {
                address_line1: "1 Rue Principale".to_string(),
                city: "Québec".to_string(),
                province: "Quebec".to_string(),
                country: "Canada".to_string(),
                ..Address::default()
            }),
            0,
        )
        .with_type("Official"),
        ListItem::new("b", ItemValue::from("plain text"), 1),
    ];
    store.write(&list).unwrap();

    let reopened = JsonFileStore::open(&path, "/fields/addresses").unwrap();
    assert_eq!(reopened.read().unwrap(), Some(list));

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let stored = &document["fields"]["addresses"][0];
    assert_eq!(stored["type"], json!("Official"));
    assert_eq!(stored["value"]["addressLine1"], json!("1 Rue Principale"));
    assert_eq!(stored["value"]["postalCode"], json!(""));
}

#[test]
fn controller_on_file_store_normalizes_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entry.json");
    fs::write(&path, r#"{"fields": {"links": null}}"#).unwrap();

    let store = JsonFileStore::open(&path, "/fields/links").unwrap();
    let mut controller = ListController::mount(store, WidgetOptions::default());
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["fields"]["links"], json!([]));

    controller.change_new_field(DraftField::Value, "first");
    assert!(controller.save_new());
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["fields"]["links"][0]["value"], json!("first"));
    assert_eq!(on_disk["fields"]["links"][0]["index"], json!(0));
}

#[test]
fn external_file_edit_reaches_controller_on_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    let store = JsonFileStore::open(&path, "").unwrap();
    let mut controller = ListController::mount(store, WidgetOptions::default());
    assert!(!controller.refresh());

    let edited = json!([{"id": "ext", "value": "from elsewhere", "index": 0}]);
    fs::write(&path, edited.to_string()).unwrap();
    assert!(controller.refresh());
    assert_eq!(controller.items()[0].id, "ext");
}

#[test]
fn unreadable_document_is_not_overwritten_on_mount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[]").unwrap();
    let store = JsonFileStore::open(&path, "").unwrap();
    fs::write(&path, "{ not json").unwrap();

    let controller = ListController::mount(store, WidgetOptions::default());
    assert!(controller.items().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn invalid_pointer_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonFileStore::open(dir.path().join("x.json"), "fields/links").unwrap_err();
    assert!(matches!(err, StoreError::Pointer { .. }), "{err}");
}

#[test]
fn mounting_past_the_end_of_an_array_keeps_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    let original = r#"{"entries":[{"title":"one"},{"title":"two"}]}"#;
    fs::write(&path, original).unwrap();

    let store = JsonFileStore::open(&path, "/entries/2/links").unwrap();
    let controller = ListController::mount(store, WidgetOptions::default());
    assert!(controller.items().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
