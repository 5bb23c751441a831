//! Property tests for the closed-schema and identifier rules.

use cms_admin_validation::{
    ComponentValidationDeps, UID_OR_TMP_UID_MESSAGE, validate_component_input,
    validate_role_create_input,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn unknown_key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,12}".prop_filter("must not be a role field", |key| {
        key != "name" && key != "description"
    })
}

proptest! {
    #[test]
    fn role_create_rejects_any_unknown_field(key in unknown_key(), value in any::<i64>()) {
        let mut payload = json!({"name": "Editors"});
        if let Some(object) = payload.as_object_mut() {
            object.insert(key.clone(), Value::from(value));
        }

        let error = validate_role_create_input(&payload).err();
        let expected = format!("this field has unspecified keys: {key}");
        prop_assert!(matches!(error, Some(error) if error.messages_at("") == vec![expected.as_str()]));
    }

    #[test]
    fn role_create_requires_a_name(description in proptest::option::of("[ -~]{0,20}"), empty in any::<bool>()) {
        let mut payload = json!({"description": description});
        if empty && let Some(object) = payload.as_object_mut() {
            object.insert("name".to_string(), json!(""));
        }

        let error = validate_role_create_input(&payload).err();
        prop_assert!(matches!(error, Some(error) if error.has_issue_at("name")));
    }

    #[test]
    fn nested_identifier_rule(has_uid in any::<bool>(), has_tmp_uid in any::<bool>()) {
        let mut entry = json!({
            "name": "Slide",
            "icon": "image",
            "category": "media",
            "attributes": {}
        });
        if let Some(object) = entry.as_object_mut() {
            if has_uid {
                object.insert("uid".to_string(), json!("media.slide"));
            }
            if has_tmp_uid {
                object.insert("tmpUID".to_string(), json!("media.slide"));
            }
        }

        let result = validate_component_input(
            &ComponentValidationDeps::default(),
            &json!({"components": [entry]}),
        );
        if has_uid == has_tmp_uid {
            prop_assert!(matches!(
                result,
                Err(error) if error.messages_at("components[0]") == vec![UID_OR_TMP_UID_MESSAGE]
            ));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
