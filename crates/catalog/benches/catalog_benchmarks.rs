use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bazaar_catalog::{Catalog, CatalogBus, CatalogEvent, CatalogHandle, CatalogId, Price, PriceRule};
use bazaar_core::{AggregateId, ItemId, ParticipantId};
use bazaar_events::{EventBus, EventEnvelope, InMemoryEventBus};

fn fresh_handle(owner: ParticipantId, bus: Option<CatalogBus>) -> CatalogHandle {
    let catalog = Catalog::new(CatalogId::new(AggregateId::new()), owner, PriceRule::default());
    CatalogHandle::new(catalog, bus)
}

/// Listing N items into an empty catalog, with and without a subscribed bus.
fn bench_add_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_item");

    for count in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count));

        group.bench_with_input(BenchmarkId::new("no_bus", count), &count, |b, &count| {
            b.iter(|| {
                let owner = ParticipantId::new();
                let catalog = fresh_handle(owner, None);
                for i in 0..count {
                    catalog
                        .add_item(owner, "Laptop", Price::new(u128::from(i)))
                        .unwrap();
                }
                black_box(catalog.item_count())
            });
        });

        group.bench_with_input(BenchmarkId::new("in_memory_bus", count), &count, |b, &count| {
            b.iter(|| {
                let owner = ParticipantId::new();
                let bus: Arc<InMemoryEventBus<EventEnvelope<CatalogEvent>>> =
                    Arc::new(InMemoryEventBus::new());
                let sub = bus.subscribe();
                let catalog = fresh_handle(owner, Some(bus as CatalogBus));
                for i in 0..count {
                    catalog
                        .add_item(owner, "Laptop", Price::new(u128::from(i)))
                        .unwrap();
                }
                black_box(sub.drain().len())
            });
        });
    }

    group.finish();
}

/// Random-access reads against a pre-filled catalog.
fn bench_get_item(c: &mut Criterion) {
    let owner = ParticipantId::new();
    let catalog = fresh_handle(owner, None);
    for i in 0..10_000u128 {
        catalog.add_item(owner, format!("item-{i}"), Price::new(i)).unwrap();
    }

    c.bench_function("get_item/10k", |b| {
        let mut next = 0u64;
        b.iter(|| {
            next = (next + 7_919) % 10_000;
            black_box(catalog.get_item(ItemId::new(next)).unwrap())
        });
    });
}

criterion_group!(benches, bench_add_item, bench_get_item);
criterion_main!(benches);
