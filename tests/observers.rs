mod common;

use std::sync::Arc;
use std::time::Duration;

use common::types;
use parking_lot::Mutex;
use wiring::{Container, ContainerError, Factory, Identifier, ResolutionObserver, TracingObserver};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl ResolutionObserver for Recorder {
    fn resolving(&self, id: &Identifier) {
        self.events.lock().push(format!("resolving {}", id));
    }

    fn resolved(&self, id: &Identifier, _duration: Duration) {
        self.events.lock().push(format!("resolved {}", id));
    }

    fn failed(&self, id: &Identifier, _error: &ContainerError) {
        self.events.lock().push(format!("failed {}", id));
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("wiring=trace"))
        .with_test_writer()
        .try_init();
}

fn observed() -> (Container, Arc<Recorder>) {
    init_tracing();
    let recorder = Arc::new(Recorder::default());
    let container = Container::builder()
        .types(types())
        .observer(recorder.clone())
        .observer(Arc::new(TracingObserver::new()))
        .build();
    (container, recorder)
}

#[test]
fn test_nested_resolution_events() {
    let (container, recorder) = observed();
    container.make("Holder").unwrap();

    assert_eq!(
        *recorder.events.lock(),
        ["resolving Holder", "resolving Item", "resolved Item", "resolved Holder"]
    );
}

#[test]
fn test_memoized_hits_are_not_reported() {
    let (container, recorder) = observed();
    container.share("item", "Item").unwrap();
    container.make("item").unwrap();
    container.make("item").unwrap();

    assert_eq!(*recorder.events.lock(), ["resolving item", "resolved item"]);
}

#[test]
fn test_failures_are_reported_per_frame() {
    let (container, recorder) = observed();
    container
        .bind("outer", Factory::from_fn(|ctx| ctx.make("inner")))
        .unwrap();
    container
        .bind("inner", Factory::from_fn(|_| Err::<(), _>(ContainerError::construction("nope"))))
        .unwrap();

    assert!(container.make("outer").is_err());
    assert_eq!(
        *recorder.events.lock(),
        ["resolving outer", "resolving inner", "failed inner", "failed outer"]
    );
}

#[test]
fn test_tracing_observer_prefix() {
    assert_eq!(TracingObserver::new().prefix(), "wiring");
    assert_eq!(TracingObserver::with_prefix("app").prefix(), "app");
}
