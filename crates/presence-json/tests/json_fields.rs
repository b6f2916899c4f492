//! Integration tests for decoding request-like JSON bodies.

use presence_core::Presence;
use presence_json::{decode_field, parse_object, to_object, JsonObject, ObjectWriter};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct PersonPatch {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    id: Presence<Uuid>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    age: Presence<u8>,
}

#[test]
fn test_patch_body_three_states() {
    let id = Uuid::now_v7();
    let body = format!(r#"{{"id": "{id}", "name": null}}"#);
    let object = parse_object(body.as_bytes()).unwrap();

    assert_eq!(decode_field::<Uuid>(&object, "id").unwrap(), Presence::present(id));
    assert_eq!(decode_field::<String>(&object, "name").unwrap(), Presence::null());
    assert_eq!(decode_field::<u8>(&object, "age").unwrap(), Presence::absent());
}

#[test]
fn test_invalid_uuid_is_mismatch_not_absent() {
    let object = parse_object(br#"{"id": "not-a-uuid"}"#).unwrap();

    let err = decode_field::<Uuid>(&object, "id").unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_struct_and_field_paths_agree() {
    let object = parse_object(br#"{"name": "Karl", "age": null}"#).unwrap();
    let view = JsonObject::new(&object);

    let patch: PersonPatch = serde_json::from_value(Value::Object(object.clone())).unwrap();

    assert_eq!(patch.id, view.field::<Uuid>("id").unwrap());
    assert_eq!(patch.name, view.field::<String>("name").unwrap());
    assert_eq!(patch.age, view.field::<u8>("age").unwrap());
}

#[test]
fn test_absent_never_written_as_null() {
    let patch = PersonPatch {
        id: Presence::absent(),
        name: Presence::present("Karl".to_string()),
        age: Presence::null(),
    };

    let object = to_object(&patch).unwrap();
    assert_eq!(Value::Object(object), json!({"name": "Karl", "age": null}));
}

fn presence_strategy() -> impl Strategy<Value = Presence<String>> {
    prop_oneof![
        Just(Presence::absent()),
        Just(Presence::null()),
        "[a-z]{0,8}".prop_map(Presence::present),
    ]
}

proptest! {
    #[test]
    fn writer_then_decode_preserves_state(value in presence_strategy()) {
        let object = ObjectWriter::new().field("v", &value).unwrap().into_map();
        let decoded: Presence<String> = decode_field(&object, "v").unwrap();
        prop_assert_eq!(decoded, value);
    }
}
