use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wiring::*;

// ===== Fixtures =====

struct Leaf;

struct Node {
    _children: Vec<Value>,
}

fn types(width: usize) -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register(TypeDescriptor::class::<Leaf>("Leaf").constructor([], |_| Ok(Leaf)).build())
        .unwrap();
    let parameters: Vec<_> = (0..width)
        .map(|n| ParameterDescriptor::typed(format!("leaf{}", n), "Leaf"))
        .collect();
    types
        .register(
            TypeDescriptor::class::<Node>("Node")
                .constructor(parameters, |args| Ok(Node { _children: args.into_vec() }))
                .method("noop", [ParameterDescriptor::typed("leaf", "Leaf")], |_: &Node, _| Ok(Value::Null))
                .build(),
        )
        .unwrap();
    types
}

// ===== Micro Benchmarks =====

fn bench_shared_hit(c: &mut Criterion) {
    let container = Container::with_types(types(1));
    container.share("leaf", "Leaf").unwrap();
    let _ = container.make("leaf").unwrap();

    c.bench_function("shared_hit", |b| {
        b.iter(|| black_box(container.make("leaf").unwrap()))
    });
}

fn bench_transient_leaf(c: &mut Criterion) {
    let container = Container::with_types(types(1));
    container.bind("leaf", "Leaf").unwrap();

    c.bench_function("transient_leaf", |b| {
        b.iter(|| black_box(container.make("leaf").unwrap()))
    });
}

fn bench_factory(c: &mut Criterion) {
    let container = Container::new();
    container
        .bind("answer", Factory::from_fn(|_| Ok(Value::Int(42))))
        .unwrap();

    c.bench_function("transient_factory", |b| {
        b.iter(|| black_box(container.make("answer").unwrap()))
    });
}

// ===== Macro Benchmarks =====

fn bench_constructor_injection(c: &mut Criterion) {
    let mut group = c.benchmark_group("constructor_injection");
    for width in [1, 4, 16] {
        let container = Container::with_types(types(width));
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| black_box(container.make("Node").unwrap()))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let container = Container::with_types(types(4));
    container.bind("node", "Node").unwrap();
    container.resolving("node", |_| None);
    container.resolved("node", |_| {});
    container
        .decorate("node", Decorator::function(|_, previous, _| Ok(previous)))
        .unwrap();
    container.inflect("node", "noop", Overrides::new());

    c.bench_function("full_pipeline", |b| {
        b.iter(|| black_box(container.make("node").unwrap()))
    });
}

fn bench_method_call(c: &mut Criterion) {
    let container = Container::with_types(types(2));

    c.bench_function("call_method", |b| {
        b.iter(|| black_box(container.call("Node@noop").unwrap()))
    });
}

criterion_group!(micro_benches, bench_shared_hit, bench_transient_leaf, bench_factory);
criterion_group!(macro_benches, bench_constructor_injection, bench_pipeline, bench_method_call);
criterion_main!(micro_benches, macro_benches);
