//! Integration tests for template substitution

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jsoninja::{
    replace, replace_with_options, Engine, Error, ReplaceOptions, Replacements, ValueKind,
    VariablePattern,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn test_no_dict_template_received() {
    let result = replace(&json!({}), &Replacements::new());
    let err = result.unwrap_err();
    assert!(matches!(err, Error::EmptyTemplate));
    assert_eq!(err.to_string(), "a template has not been loaded");
}

#[test]
fn test_no_list_template_received() {
    let result = replace(&json!([]), &Replacements::new());
    assert!(matches!(result, Err(Error::EmptyTemplate)));
}

#[test]
fn test_returns_new_object() {
    let template = json!({"foo": "{{foo}}"});
    let out = replace(&template, &Replacements::new().with("foo", "bar")).unwrap();
    assert_ne!(out, template);
    assert_eq!(template, json!({"foo": "{{foo}}"}));
}

#[test]
fn test_returns_new_list_object() {
    let template = json!([{"foo": "{{foo}}"}]);
    let out = replace(&template, &Replacements::new().with("foo", "bar")).unwrap();
    assert_eq!(out, json!([{"foo": "bar"}]));
    assert_eq!(template, json!([{"foo": "{{foo}}"}]));
}

#[test]
fn test_template_without_placeholders_is_equal() {
    let template = json!({
        "str": "str",
        "int": 1,
        "float": 1.5,
        "bool": true,
        "null": null,
        "dict": {"foo": "bar"},
        "list": ["foo", "bar"]
    });
    let out = replace(&template, &Replacements::new()).unwrap();
    assert_eq!(out, template);
}

#[test]
fn test_variable_declarations() {
    let template = json!({
        "declaration1": "{{type1}}",
        "declaration2": "{{ type2 }}",
        "declaration3": "{{type1}}-{{ type2 }}",
        "{{type1}}": "declaration1",
        "{{ type2 }}": "declaration2",
        "{{type1}}-{{ type2 }}": "declaration3"
    });
    let replacements = Replacements::new()
        .with("type1", "type1")
        .with("type2", "type2");

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "declaration1": "type1",
            "declaration2": "type2",
            "declaration3": "type1-type2",
            "type1": "declaration1",
            "type2": "declaration2",
            "type1-type2": "declaration3"
        })
    );
}

#[test]
fn test_typed_replacements_are_preserved() {
    let template = json!({
        "str": "{{str}}",
        "int": "{{int}}",
        "float": "{{float}}",
        "bool": "{{bool}}",
        "null": "{{null}}",
        "dict": "{{dict}}",
        "list": "{{list}}"
    });
    let replacements = Replacements::new()
        .with("str", "str")
        .with("int", 1)
        .with("float", 1.5)
        .with("bool", true)
        .with("null", Value::Null)
        .with("dict", json!({"foo": "bar"}))
        .with("list", json!(["foo", "bar"]));

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "str": "str",
            "int": 1,
            "float": 1.5,
            "bool": true,
            "null": null,
            "dict": {"foo": "bar"},
            "list": ["foo", "bar"]
        })
    );
}

#[test]
fn test_partial_tokens_are_stringified() {
    let template = json!({
        "joined": "{{a}}-{{b}}",
        "mixed": "n={{n}} ok={{ok}} list={{list}}"
    });
    let replacements = Replacements::new()
        .with("a", "x")
        .with("b", "y")
        .with("n", 3)
        .with("ok", false)
        .with("list", json!([1, 2]));

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "joined": "x-y",
            "mixed": "n=3 ok=false list=[1,2]"
        })
    );
}

#[test]
fn test_key_replacement_type() {
    let template = json!({
        "{{str}}": "str",
        "{{int}}": "int",
        "{{float}}": "float",
        "{{bool}}": "bool",
        "{{list}}": "list"
    });
    let replacements = Replacements::new()
        .with("str", "str")
        .with("int", 0)
        .with("float", 1.5)
        .with("bool", true)
        .with("list", json!(["foo", "bar"]));

    let err = replace(&template, &replacements).unwrap_err();
    match err {
        Error::InvalidKeyType { name, kind } => {
            assert_eq!(name, "list");
            assert_eq!(kind, ValueKind::Array);
        }
        other => panic!("Expected InvalidKeyType, got {:?}", other),
    }
}

#[test]
fn test_primitive_key_replacements() {
    let template = json!({
        "{{str}}": "str",
        "{{int}}": "int",
        "{{float}}": "float",
        "{{bool}}": "bool"
    });
    let replacements = Replacements::new()
        .with("str", "str")
        .with("int", 0)
        .with("float", 1.5)
        .with("bool", true);

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({"str": "str", "0": "int", "1.5": "float", "true": "bool"})
    );
}

#[test]
fn test_missing_replacement() {
    let template = json!({"firstname": "{{firstname}}", "lastname": "{{lastname}}"});
    let replacements = Replacements::new().with("firstname", "John");

    let err = replace(&template, &replacements).unwrap_err();
    assert!(matches!(err, Error::MissingReplacement { ref name } if name == "lastname"));
    assert_eq!(
        err.to_string(),
        "unable to find a replacement for \"lastname\""
    );
}

#[test]
fn test_missing_replacement_skipped() {
    let template = json!({"firstname": "{{firstname}}", "lastname": "{{lastname}}"});
    let replacements = Replacements::new().with("firstname", "John");

    let out = replace_with_options(
        &template,
        &replacements,
        &ReplaceOptions::new().with_raise_on_missing(false),
    )
    .unwrap();
    assert_eq!(out, json!({"firstname": "John", "lastname": "{{lastname}}"}));
}

#[test]
fn test_missing_key_replacement() {
    let template = json!({"{{unknown}}": 1});
    let err = replace(&template, &Replacements::new()).unwrap_err();
    assert_eq!(err.placeholder(), Some("unknown"));
}

#[test]
fn test_replace_same_variable() {
    let template = json!({
        "message1": "{{message}}",
        "{{message}}": "message2",
        "message3": "{{message}}"
    });
    let replacements = Replacements::new().with("message", "I am duplicated!");

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "message1": "I am duplicated!",
            "I am duplicated!": "message2",
            "message3": "I am duplicated!"
        })
    );
}

#[test]
fn test_duplicate_source_keeps_key_order() {
    let template = json!({"m1": "{{message}}", "{{message}}": "m2", "m3": "{{message}}"});
    let out = replace(&template, &Replacements::new().with("message", "DUP")).unwrap();

    let keys: Vec<&str> = out
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["m1", "DUP", "m3"]);
}

#[test]
fn test_callback_functions() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let template = json!({"password": "{{password}}", "{{password}}": "password"});
    let replacements = Replacements::new().with_lazy("password", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        json!("super_secret_password")
    });

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "password": "super_secret_password",
            "super_secret_password": "password"
        })
    );
    // once for the value, once for the key
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unused_callback_is_never_invoked() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let replacements = Replacements::new()
        .with("used", 1)
        .with_lazy("unused", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::Null
        });

    replace(&json!({"a": "{{used}}"}), &replacements).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_full_replacement_flow() {
    let template = json!({
        "firstname": "{{name}}",
        "lastname": "Doe",
        "age": "{{age}}",
        "married": "{{married}}",
        "children": "{{children}}",
        "money": "{{money}}",
        "attributes": "{{attributes}}",
        "hobbies": "{{hobbies}}",
        "pets": [
            {"name": "Qwerty", "type": "fish"},
            "{{pet}}"
        ]
    });
    let replacements = Replacements::from_json(json!({
        "name": "John",
        "age": 25,
        "married": false,
        "children": null,
        "money": 123.45,
        "attributes": {"height": 180, "weight": 75.5},
        "hobbies": ["climbing", "videogames"],
        "pet": {"name": "Firulais", "type": "dog"}
    }))
    .unwrap();

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({
            "firstname": "John",
            "lastname": "Doe",
            "age": 25,
            "married": false,
            "children": null,
            "money": 123.45,
            "attributes": {"height": 180, "weight": 75.5},
            "hobbies": ["climbing", "videogames"],
            "pets": [
                {"name": "Qwerty", "type": "fish"},
                {"name": "Firulais", "type": "dog"}
            ]
        })
    );
}

#[test]
fn test_replaced_values_are_not_rescanned() {
    let template = json!({"a": "{{outer}}", "b": "x{{outer}}x"});
    let replacements = Replacements::new().with("outer", json!({"nested": "{{inner}}"}));

    let out = replace(&template, &replacements).unwrap();
    assert_eq!(
        out,
        json!({"a": {"nested": "{{inner}}"}, "b": "x{\"nested\":\"{{inner}}\"}x"})
    );
}

#[test]
fn test_custom_regex_pattern() {
    let engine = Engine::with_pattern(&VariablePattern::regex(r"\$\{(\w+)\}")).unwrap();
    let template = json!({"host": "${host}", "port": "${port}", "url": "http://${host}:${port}"});
    let replacements = Replacements::new().with("host", "localhost").with("port", 8080);

    let out = engine
        .replace(&template, &replacements, &ReplaceOptions::default())
        .unwrap();
    assert_eq!(
        out,
        json!({"host": "localhost", "port": 8080, "url": "http://localhost:8080"})
    );
}

#[test]
fn test_pretty_output_snapshot() {
    let template = json!({
        "user": {"{{field}}": "{{value}}", "tags": ["{{tag}}", "static"]},
        "note": "{{ field }} is {{value}}"
    });
    let replacements = Replacements::new()
        .with("field", "role")
        .with("value", "admin")
        .with("tag", json!({"id": 1}));

    let out = replace(&template, &replacements).unwrap();
    insta::assert_snapshot!(serde_json::to_string_pretty(&out).unwrap(), @r###"
    {
      "user": {
        "role": "admin",
        "tags": [
          {
            "id": 1
          },
          "static"
        ]
      },
      "note": "role is admin"
    }
    "###);
}
