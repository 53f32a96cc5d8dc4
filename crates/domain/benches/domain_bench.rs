use common::Version;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{EntityService, Order, ProductId, VersionedEntity};
use store::InMemoryRepository;

fn bench_add_distinct_items(c: &mut Criterion) {
    let products: Vec<ProductId> = (0..100)
        .map(|n| ProductId::new(format!("SKU-{n:03}")).unwrap())
        .collect();

    c.bench_function("domain/add_100_distinct_items", |b| {
        b.iter(|| {
            let mut order = Order::new();
            for product in &products {
                order.add_item(1, product.clone()).unwrap();
            }
            order
        });
    });
}

fn bench_merge_duplicate_items(c: &mut Criterion) {
    let product = ProductId::new("SKU-BENCH").unwrap();

    c.bench_function("domain/merge_100_duplicate_items", |b| {
        b.iter(|| {
            let mut order = Order::new();
            for _ in 0..100 {
                order.add_item(2, product.clone()).unwrap();
            }
            order
        });
    });
}

fn bench_versioned_update(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = EntityService::new(InMemoryRepository::<VersionedEntity>::new());
    let saved = rt.block_on(async {
        service
            .save(VersionedEntity::new(None).unwrap())
            .await
            .unwrap()
    });
    let id = saved.id().unwrap();
    let mut version: Version = saved.version();

    c.bench_function("domain/versioned_update", |b| {
        b.iter(|| {
            rt.block_on(async {
                let updated = service
                    .update_versioned(id, version, |entity| {
                        entity.set_data(Some("Lorem ipsum".to_string()))
                    })
                    .await
                    .unwrap();
                version = updated.version();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_add_distinct_items,
    bench_merge_duplicate_items,
    bench_versioned_update
);
criterion_main!(benches);
