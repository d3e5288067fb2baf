mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{container, type_of, FileStore};
use wiring::{ContainerError, Factory, Value};

#[test]
fn test_interface_bound_to_implementation() {
    let container = container();
    container.share("Store", "FileStore").unwrap();

    assert_eq!(type_of(&container.make("Store").unwrap()), "FileStore");
    // Dependents asking for the interface get the bound implementation.
    let cached = container.make("CachedStore").unwrap();
    let inner = Value::Object(cached.downcast_ref::<common::CachedStore>().unwrap().inner.clone());
    assert!(inner.same_instance(&container.make("Store").unwrap()));
}

#[test]
fn test_interface_bound_to_non_implementation_is_rejected() {
    let container = container();
    let err = container.bind("Store", "Item").unwrap_err();

    assert!(matches!(
        err,
        ContainerError::InterfaceBinding { ref interface, ref actual }
            if interface.as_str() == "Store" && actual == "Item"
    ));
    assert!(!container.has("Store"));
}

#[test]
fn test_interface_bound_to_scalar_is_rejected() {
    let container = container();
    let err = container.bind("Store", Value::from(3)).unwrap_err();
    assert!(matches!(err, ContainerError::InterfaceBinding { ref actual, .. } if actual == "int"));
}

fn counting_store(built: &Arc<AtomicUsize>) -> Factory {
    let counter = built.clone();
    Factory::from_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::object("FileStore", FileStore))
    })
}

#[test]
fn test_shared_interface_binding_reuses_the_checked_value() {
    let container = container();
    let built = Arc::new(AtomicUsize::new(0));
    container.share("Store", counting_store(&built)).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(!container.descriptor("Store").unwrap().resolved);

    let hooked = Arc::new(AtomicUsize::new(0));
    let seen = hooked.clone();
    container.resolved("Store", move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let a = container.make("Store").unwrap();
    let b = container.make("Store").unwrap();
    assert!(a.same_instance(&b));
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(hooked.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_interface_binding_discards_the_checked_value() {
    let container = container();
    let built = Arc::new(AtomicUsize::new(0));
    container.bind("Store", counting_store(&built)).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);

    let a = container.make("Store").unwrap();
    let b = container.make("Store").unwrap();
    assert!(!a.same_instance(&b));
    assert_eq!(built.load(Ordering::SeqCst), 3);
}

#[test]
fn test_rewrite_of_interface_binding_builds_fresh_values() {
    let container = container();
    let built = Arc::new(AtomicUsize::new(0));
    container.share("Store", counting_store(&built)).unwrap();
    let first = container.make("Store").unwrap();

    container.rewrite("Store", counting_store(&built)).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 2);

    let second = container.make("Store").unwrap();
    assert!(!second.same_instance(&first));
    assert_eq!(built.load(Ordering::SeqCst), 3);
}

#[test]
fn test_unbound_interface_is_not_found() {
    let container = container();
    assert!(matches!(container.make("Store"), Err(ContainerError::NotFound(_))));
    assert!(matches!(container.make("CachedStore"), Err(ContainerError::NotFound(_))));
}
