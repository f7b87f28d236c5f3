#![allow(dead_code)]

use autowire::{ClassDef, Classes, Container, Parameter, RcThreadSafety};
use criterion::{criterion_group, criterion_main, Criterion};

struct A(RcThreadSafety<B>, RcThreadSafety<C>);
struct B(i64);
struct C(RcThreadSafety<CA>);
struct CA(RcThreadSafety<CAA>);
struct CAA(RcThreadSafety<CAAA>);
struct CAAA(RcThreadSafety<CAAAA>);
struct CAAAA(RcThreadSafety<CAAAAA>);
struct CAAAAA;

#[inline]
fn classes() -> Classes {
    Classes::new()
        .register(ClassDef::class("CAAAAA").constructor(|_| Ok(CAAAAA)))
        .register(
            ClassDef::class("CAAAA")
                .parameter(Parameter::class("inner", "CAAAAA"))
                .constructor(|args| Ok(CAAAA(args.instance("inner")?))),
        )
        .register(
            ClassDef::class("CAAA")
                .parameter(Parameter::class("inner", "CAAAA"))
                .constructor(|args| Ok(CAAA(args.instance("inner")?))),
        )
        .register(
            ClassDef::class("CAA")
                .parameter(Parameter::class("inner", "CAAA"))
                .constructor(|args| Ok(CAA(args.instance("inner")?))),
        )
        .register(
            ClassDef::class("CA")
                .parameter(Parameter::class("inner", "CAA"))
                .constructor(|args| Ok(CA(args.instance("inner")?))),
        )
        .register(
            ClassDef::class("C")
                .parameter(Parameter::class("inner", "CA"))
                .constructor(|args| Ok(C(args.instance("inner")?))),
        )
        .register(
            ClassDef::class("B")
                .parameter(Parameter::new("value").with_default(2))
                .constructor(|args| Ok(B(args.int("value")?))),
        )
        .register(
            ClassDef::class("A")
                .parameter(Parameter::class("b", "B"))
                .parameter(Parameter::class("c", "C"))
                .constructor(|args| Ok(A(args.instance("b")?, args.instance("c")?))),
        )
}

#[inline]
fn container_without_singletons() -> Container {
    let container = Container::new(classes());
    for name in ["A", "B", "C", "CA", "CAA", "CAAA", "CAAAA", "CAAAAA"] {
        container.singleton(name, false);
    }
    container
}

#[inline]
fn container_get(container: &Container) {
    let _ = container.get::<A>("A").unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let container_1 = container_without_singletons();
    let container_2 = Container::new(classes());

    c.bench_function("container_new", |b| b.iter(|| Container::new(classes())))
        .bench_function("container_get", |b| b.iter(|| container_get(&container_1)))
        .bench_function("container_get_with_cache", |b| b.iter(|| container_get(&container_2)))
        .bench_function("container_get_with_fresh_cache", |b| {
            b.iter(|| container_get(&Container::new(classes())))
        });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
