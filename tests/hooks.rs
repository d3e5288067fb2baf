mod common;

use std::sync::Arc;

use common::{container, container_with, type_of, Item};
use parking_lot::Mutex;
use wiring::{ContainerConfig, ContainerError, Decorator, Phase, PhaseOrder, Value};

#[test]
fn test_resolving_callbacks_substitute_subtypes() {
    let container = container();

    container.resolving("Item", |_| None);
    container.resolving("Item", |_| Some(Value::object("SpecialItem", common::SpecialItem)));

    assert_eq!(type_of(&container.make("Item").unwrap()), "SpecialItem");
}

#[test]
fn test_resolving_rejects_unrelated_substitute() {
    let container = container();
    container.resolving("Item", |_| Some(Value::object("Stranger", common::Stranger)));

    match container.make("Item") {
        Err(ContainerError::IncompatibleSubstitution { expected, actual }) => {
            assert_eq!(expected.as_str(), "Item");
            assert_eq!(actual.as_str(), "Stranger");
        }
        other => panic!("unexpected: {:?}", other.map(|v| v.kind())),
    }
}

#[test]
fn test_resolving_null_keeps_the_value() {
    let container = container();
    container.share("item", "Item").unwrap();
    container.resolving("item", |_| Some(Value::Null));
    container.resolving("item", |value| {
        assert_eq!(type_of(value), "Item");
        None
    });

    let item = container.make("item").unwrap();
    assert_eq!(type_of(&item), "Item");
    assert!(item.same_instance(&container.make("item").unwrap()));
}

#[test]
fn test_resolving_may_return_the_same_instance() {
    let container = container();
    container.resolving("Item", |value| Some(value.clone()));
    assert_eq!(type_of(&container.make("Item").unwrap()), "Item");
}

#[test]
fn test_resolved_callbacks_observe_final_value() {
    let container = container();
    container.resolved("Item", |value| {
        if let Some(item) = value.downcast_ref::<Item>() {
            *item.value.lock() = Some("value".to_string());
        }
    });

    let item = container.make("Item").unwrap();
    assert_eq!(item.downcast_ref::<Item>().unwrap().value.lock().as_deref(), Some("value"));
}

#[test]
fn test_callbacks_run_in_registration_order() {
    let container = container();
    container.bind("n", Value::Int(1)).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    for step in 0..3 {
        let log = log.clone();
        container.resolving("n", move |value| {
            log.lock().push(format!("resolving {}", step));
            value.as_int().map(|n| Value::Int(n * 10 + step))
        });
    }
    let seen = log.clone();
    container.resolved("n", move |value| seen.lock().push(format!("resolved {:?}", value.as_int())));

    assert_eq!(container.make("n").unwrap().as_int(), Some(1012));
    assert_eq!(
        *log.lock(),
        vec!["resolving 0", "resolving 1", "resolving 2", "resolved Some(1012)"]
    );
    assert_eq!(container.hook_count("n", Phase::Resolving), 3);
}

#[test]
fn test_shared_binding_fires_hooks_once() {
    let container = container();
    container.share("item", "Item").unwrap();
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    container.resolved("item", move |_| *counter.lock() += 1);

    container.make("item").unwrap();
    container.make("item").unwrap();
    assert_eq!(*calls.lock(), 1);
}

#[test]
fn test_hooks_for_unbound_identifiers_never_fire() {
    let container = container();
    container.resolved("ghost", |_| panic!("must not run"));
    container.make("Item").unwrap();
}

#[test]
fn test_hooks_registered_on_alias_fire_for_target() {
    let container = container();
    container.bind("item", "Item").unwrap();
    container.alias("thing", "item").unwrap();
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    container.resolved("thing", move |_| *counter.lock() += 1);

    container.make("item").unwrap();
    container.make("thing").unwrap();
    assert_eq!(*calls.lock(), 2);
}

fn phase_log(order: PhaseOrder) -> Vec<String> {
    let container = container_with(ContainerConfig::default().with_phase_order(order));
    container.bind("n", Value::Int(1)).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    let decorator_log = log.clone();
    container
        .decorate(
            "n",
            Decorator::function(move |_, previous, _| {
                decorator_log.lock().push("decorate".to_string());
                Ok(previous)
            }),
        )
        .unwrap();
    let hook_log = log.clone();
    container.resolving("n", move |_| {
        hook_log.lock().push("resolving".to_string());
        None
    });
    let done_log = log.clone();
    container.resolved("n", move |_| done_log.lock().push("resolved".to_string()));

    container.make("n").unwrap();
    let entries = log.lock().clone();
    entries
}

#[test]
fn test_phase_order_is_configurable() {
    assert_eq!(phase_log(PhaseOrder::DecorateFirst), ["decorate", "resolving", "resolved"]);
    assert_eq!(phase_log(PhaseOrder::HooksFirst), ["resolving", "decorate", "resolved"]);
}
