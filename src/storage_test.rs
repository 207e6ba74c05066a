use serde_json::json;

use super::*;

/// Store that rejects every write, like a full `localStorage`.
struct QuotaExceededStore;

impl KeyValueStore for QuotaExceededStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, PortError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), PortError> {
        Err(PortError::Storage("QuotaExceededError".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), PortError> {
        Ok(())
    }
}

fn port() -> StoragePort<MemoryStore> {
    StoragePort::new(MemoryStore::new())
}

fn persist(port: &StoragePort<MemoryStore>, key: &str, value: serde_json::Value) {
    let request = StorageWriteRequest { key: key.to_owned(), value: Some(value) };
    port.on_persist_request(request).unwrap();
}

// =============================================================
// Write / read back
// =============================================================

#[test]
fn persisted_values_read_back_deep_equal() {
    let port = port();
    let values = [
        json!(42),
        json!(-3.5),
        json!("groceries"),
        json!(true),
        json!([]),
        json!({ "budget": { "items": [{ "name": "rent", "amount": 900 }], "currency": "EUR" } }),
    ];
    for (i, value) in values.iter().enumerate() {
        let key = format!("key-{i}");
        persist(&port, &key, value.clone());
        let read: Option<serde_json::Value> = port.read(&key).unwrap();
        assert_eq!(read.as_ref(), Some(value));
    }
}

/// Shortest float text as `JSON.stringify` emits it for runtime payloads.
const RUNTIME_FLOATS: [&str; 4] = [
    "19699246.092690002",
    "32369374.745573338",
    "1.0715660391465826e-75",
    "0.30000000000000004",
];

#[test]
fn runtime_float_text_persists_bit_identical() {
    let port = port();
    for text in RUNTIME_FLOATS {
        let payload = format!(r#"{{ "key": "amount", "value": {text} }}"#);
        let request: StorageWriteRequest = serde_json::from_str(&payload).unwrap();
        port.on_persist_request(request).unwrap();

        let expected: f64 = text.parse().unwrap();
        let read: f64 = port.read("amount").unwrap().unwrap();
        assert_eq!(read.to_bits(), expected.to_bits(), "read back of {text}");

        let raw = port.store().get_item("amount").unwrap().unwrap();
        let stored: f64 = raw.parse().unwrap();
        assert_eq!(stored.to_bits(), expected.to_bits(), "stored text {raw} for {text}");
    }
}

#[test]
fn decimal_amount_text_is_stored_verbatim() {
    let port = port();
    let request: StorageWriteRequest =
        serde_json::from_str(r#"{ "key": "amount", "value": 19699246.092690002 }"#).unwrap();
    port.on_persist_request(request).unwrap();
    let raw = port.store().get_item("amount").unwrap();
    assert_eq!(raw.as_deref(), Some("19699246.092690002"));
}

#[test]
fn write_overwrites_previous_value() {
    let port = port();
    persist(&port, "model", json!({ "v": 1 }));
    persist(&port, "model", json!({ "v": 2 }));
    let read: Option<serde_json::Value> = port.read("model").unwrap();
    assert_eq!(read, Some(json!({ "v": 2 })));
    assert_eq!(port.store().len(), 1);
}

#[test]
fn values_are_stored_as_pretty_json() {
    let port = port();
    persist(&port, "model", json!({ "a": 1 }));
    let raw = port.store().get_item("model").unwrap();
    assert_eq!(raw.as_deref(), Some("{\n  \"a\": 1\n}"));
}

#[test]
fn read_decodes_into_typed_values() {
    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Entry {
        label: String,
        amount: i64,
    }

    let port = port();
    let entry = Entry { label: "salary".into(), amount: 2500 };
    port.on_persist_request(StorageWriteRequest::write("entry", &entry).unwrap()).unwrap();
    assert_eq!(port.read::<Entry>("entry").unwrap(), Some(entry));
}

#[test]
fn read_of_missing_key_is_none() {
    assert_eq!(port().read::<serde_json::Value>("nothing").unwrap(), None);
}

#[test]
fn read_of_non_json_text_is_an_error() {
    let port = port();
    port.store().set_item("raw", "not json").unwrap();
    let err = port.read::<serde_json::Value>("raw").unwrap_err();
    assert_eq!(err.error_code(), "E_JSON");
}

// =============================================================
// Removal
// =============================================================

#[test]
fn null_value_removes_existing_key() {
    let port = port();
    persist(&port, "model", json!([1, 2, 3]));
    port.on_persist_request(StorageWriteRequest::remove("model")).unwrap();
    assert!(!port.store().contains_key("model"));
}

#[test]
fn removing_unknown_key_is_a_noop() {
    let port = port();
    persist(&port, "keep", json!("me"));
    port.on_persist_request(StorageWriteRequest::remove("never-set")).unwrap();
    assert_eq!(port.store().len(), 1);
    assert!(port.store().contains_key("keep"));
}

// =============================================================
// Payload decoding
// =============================================================

#[test]
fn request_with_null_value_decodes_as_remove() {
    let request: StorageWriteRequest =
        serde_json::from_value(json!({ "key": "model", "value": null })).unwrap();
    assert_eq!(request, StorageWriteRequest::remove("model"));
}

#[test]
fn request_without_value_decodes_as_remove() {
    let request: StorageWriteRequest = serde_json::from_value(json!({ "key": "model" })).unwrap();
    assert_eq!(request.value, None);
}

#[test]
fn write_of_unit_value_becomes_remove() {
    let request = StorageWriteRequest::write("model", &()).unwrap();
    assert_eq!(request, StorageWriteRequest::remove("model"));
}

// =============================================================
// Failures
// =============================================================

#[test]
fn store_failures_propagate() {
    let port = StoragePort::new(QuotaExceededStore);
    let err = port
        .on_persist_request(StorageWriteRequest { key: "big".into(), value: Some(json!("x")) })
        .unwrap_err();
    assert!(matches!(err, PortError::Storage(ref msg) if msg == "QuotaExceededError"));
}

#[test]
fn removal_does_not_touch_failing_writes() {
    let port = StoragePort::new(QuotaExceededStore);
    assert!(port.on_persist_request(StorageWriteRequest::remove("big")).is_ok());
}
