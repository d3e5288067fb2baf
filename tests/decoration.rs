mod common;

use std::sync::Arc;

use common::{container, type_of, CachedStore, Item, LabelledItem};
use parking_lot::Mutex;
use wiring::{ContainerError, Decorator, Overrides, Value};

#[test]
fn test_inflection_calls_setter_on_each_instance() {
    let container = container();
    container.bind("item", "Item").unwrap();
    container.inflect("item", "set_value", Overrides::new().with("value", "inflected"));

    for _ in 0..2 {
        let item = container.make("item").unwrap();
        let value = item.downcast_ref::<Item>().unwrap().value.lock().clone();
        assert_eq!(value.as_deref(), Some("inflected"));
    }
}

#[test]
fn test_inflection_applies_to_subtypes() {
    let container = container();
    container.bind("labelled", "LabelledItem").unwrap();
    container.inflect("Item", "set_value", Overrides::new().with("value", "from parent"));

    for id in ["labelled", "LabelledItem"] {
        let item = container.make(id).unwrap();
        let label = item.downcast_ref::<LabelledItem>().unwrap().label.lock().clone();
        assert_eq!(label.as_deref(), Some("from parent"));
    }
}

#[test]
fn test_inflection_skips_subtypes_without_the_method() {
    let container = container();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    container.resolved("SpecialItem", move |value| seen.lock().push(type_of(value).to_string()));
    container.inflect("Item", "set_value", Overrides::new().with("value", "x"));

    // SpecialItem has no `set_value` of its own, so the call is skipped.
    assert_eq!(type_of(&container.make("SpecialItem").unwrap()), "SpecialItem");
    assert_eq!(*calls.lock(), ["SpecialItem"]);
}

#[test]
fn test_inflection_ignores_unrelated_types() {
    let container = container();
    container.inflect("LabelledItem", "set_value", Overrides::new().with("value", "nope"));

    let item = container.make("Item").unwrap();
    assert!(item.downcast_ref::<Item>().unwrap().value.lock().is_none());
}

#[test]
fn test_decorators_chain_in_order() {
    let container = container();
    container.share("greeting", Value::from("hi")).unwrap();
    for suffix in ["!", "?"] {
        container
            .decorate(
                "greeting",
                Decorator::function(move |_, previous, shared| {
                    assert!(shared);
                    Ok(Value::from(format!("{}{}", previous.as_str().unwrap_or_default(), suffix)))
                }),
            )
            .unwrap();
    }

    assert_eq!(container.make("greeting").unwrap().as_str(), Some("hi!?"));
    assert_eq!(container.make("greeting").unwrap().as_str(), Some("hi!?"));
}

#[test]
fn test_class_decorator_receives_previous_value() {
    let container = container();
    container.share("Store", "FileStore").unwrap();
    container.decorate("Store", "CachedStore").unwrap();

    let store = container.make("Store").unwrap();
    let cached = store.downcast_ref::<CachedStore>().unwrap();
    assert_eq!(cached.inner.type_name().as_str(), "FileStore");
}

#[test]
fn test_decorator_sees_transient_flag() {
    let container = container();
    container.bind("item", "Item").unwrap();
    let flags = Arc::new(Mutex::new(Vec::new()));
    let seen = flags.clone();
    container
        .decorate(
            "item",
            Decorator::function(move |_, previous, shared| {
                seen.lock().push(shared);
                Ok(previous)
            }),
        )
        .unwrap();

    container.make("item").unwrap();
    container.make("item").unwrap();
    assert_eq!(*flags.lock(), [false, false]);
}

#[test]
fn test_decorate_requires_resolvable_identifier() {
    let container = container();
    let err = container.decorate("ghost", "CachedStore").unwrap_err();
    assert!(matches!(err, ContainerError::InvalidIdentifier(id) if id.as_str() == "ghost"));

    // Known classes may be decorated without a binding.
    container
        .decorate("Item", Decorator::function(|_, previous, _| Ok(previous)))
        .unwrap();
}

#[test]
fn test_class_decorator_without_matching_parameter_fails() {
    let container = container();
    container.bind("item", "Item").unwrap();
    container.decorate("item", "CachedStore").unwrap();

    assert!(matches!(container.make("item"), Err(ContainerError::Construction(_))));
}
