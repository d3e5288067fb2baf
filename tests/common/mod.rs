//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use wiring::{Container, ContainerConfig, Object, ParameterDescriptor, TypeDescriptor, TypeRegistry, Value};

/// Plain class with a settable value.
#[derive(Default)]
pub struct Item {
    pub value: Mutex<Option<String>>,
}

/// Subclass of `Item`.
#[derive(Default)]
pub struct SpecialItem;

/// Subclass of `Item` that declares its own setter.
#[derive(Default)]
pub struct LabelledItem {
    pub label: Mutex<Option<String>>,
}

/// Unrelated class.
#[derive(Default)]
pub struct Stranger;

/// Takes an `Item` and an integer with a default.
pub struct Holder {
    pub item: Value,
    pub integer: i64,
}

pub struct FileStore;

/// Wraps whatever `Store` it is given.
pub struct CachedStore {
    pub inner: Object,
}

pub fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register(
            TypeDescriptor::class::<Item>("Item")
                .default_constructor()
                .method("set_value", [ParameterDescriptor::new("value")], |item: &Item, args| {
                    *item.value.lock() = Some(args.str(0)?.to_string());
                    Ok(Value::Null)
                })
                .method("get_value", [], |item: &Item, _| {
                    Ok(item.value.lock().clone().map(Value::from).unwrap_or_default())
                })
                .build(),
        )
        .unwrap();
    types
        .register(
            TypeDescriptor::class::<SpecialItem>("SpecialItem")
                .extends("Item")
                .default_constructor()
                .build(),
        )
        .unwrap();
    types
        .register(
            TypeDescriptor::class::<LabelledItem>("LabelledItem")
                .extends("Item")
                .default_constructor()
                .method("set_value", [ParameterDescriptor::new("value")], |item: &LabelledItem, args| {
                    *item.label.lock() = Some(args.str(0)?.to_string());
                    Ok(Value::Null)
                })
                .build(),
        )
        .unwrap();
    types
        .register(TypeDescriptor::class::<Stranger>("Stranger").default_constructor().build())
        .unwrap();
    types
        .register(
            TypeDescriptor::class::<Holder>("Holder")
                .constructor(
                    [
                        ParameterDescriptor::typed("item", "Item"),
                        ParameterDescriptor::new("integer").with_default(0),
                    ],
                    |args| {
                        Ok(Holder {
                            item: args.get(0).clone(),
                            integer: args.int(1)?,
                        })
                    },
                )
                .method(
                    "inject",
                    [ParameterDescriptor::typed("item", "Item")],
                    |_: &Holder, args| Ok(args.get(0).clone()),
                )
                .method("integer", [], |holder: &Holder, _| Ok(Value::Int(holder.integer)))
                .build(),
        )
        .unwrap();
    types
        .register(TypeDescriptor::interface("Store", std::iter::empty::<&str>()))
        .unwrap();
    types
        .register(
            TypeDescriptor::class::<FileStore>("FileStore")
                .implements("Store")
                .constructor([], |_| Ok(FileStore))
                .build(),
        )
        .unwrap();
    types
        .register(
            TypeDescriptor::class::<CachedStore>("CachedStore")
                .implements("Store")
                .constructor([ParameterDescriptor::typed("inner", "Store")], |args| {
                    Ok(CachedStore {
                        inner: args.any_object(0)?,
                    })
                })
                .build(),
        )
        .unwrap();
    types
}

pub fn container() -> Container {
    Container::with_types(types())
}

pub fn container_with(config: ContainerConfig) -> Container {
    Container::builder().types(types()).config(config).build()
}

/// Runtime type name of an object value.
pub fn type_of(value: &Value) -> &str {
    value.type_name().map(|name| name.as_str()).unwrap_or("<scalar>")
}
