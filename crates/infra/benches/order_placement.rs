use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use orderdesk_core::{CustomerId, FixedClock, ItemId, Price};
use orderdesk_infra::config::OrderdeskConfig;
use orderdesk_infra::services::AppServices;
use orderdesk_inventory::NewItem;
use orderdesk_parties::{Address, Email, NewCustomer, PhoneNumber};
use orderdesk_sales::{NewOrder, RequestedLine};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn setup(item_count: usize) -> (AppServices, CustomerId, Vec<ItemId>) {
    // Per-order info logs would dominate the measurement.
    orderdesk_observability::tracing::try_init_with_default("warn");

    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let services = AppServices::in_memory_with_clock(
        OrderdeskConfig::from_env(),
        Arc::new(FixedClock::new(today)),
    );

    let customer = services
        .customers
        .create_customer(NewCustomer {
            first_name: "Bench".to_string(),
            last_name: "Mark".to_string(),
            email: Email::parse("bench@example.com").unwrap(),
            address: Address {
                street_name: "Bench Road".to_string(),
                house_number: "1".to_string(),
                postal_code: "1000".to_string(),
                country: "NL".to_string(),
            },
            phone_number: PhoneNumber {
                number: "612345678".to_string(),
                country_calling_code: "+31".to_string(),
            },
        })
        .unwrap();

    let items = (0..item_count)
        .map(|i| {
            services
                .items
                .create_item(NewItem {
                    name: format!("Item {i}"),
                    description: String::new(),
                    price: Price::new(dec!(4.25)),
                    amount_of_stock: u32::MAX,
                })
                .unwrap()
                .id_typed()
        })
        .collect();

    (services, customer.id_typed(), items)
}

fn order_for(customer_id: CustomerId, items: &[ItemId]) -> NewOrder {
    NewOrder {
        customer_id,
        lines: items
            .iter()
            .map(|&item_id| RequestedLine {
                item_id,
                quantity: 2,
            })
            .collect(),
    }
}

fn bench_create_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_order");

    for line_count in [1, 10, 50].iter() {
        group.throughput(Throughput::Elements(*line_count as u64));
        group.bench_with_input(
            BenchmarkId::new("lines", line_count),
            line_count,
            |b, &count| {
                let (services, customer, items) = setup(count);
                b.iter(|| {
                    black_box(
                        services
                            .orders
                            .create_order(order_for(customer, &items))
                            .unwrap(),
                    );
                });
            },
        );
    }

    group.finish();
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder");

    group.bench_function("reorder_ten_lines", |b| {
        let (services, customer, items) = setup(10);
        let original = services
            .orders
            .create_order(order_for(customer, &items))
            .unwrap();

        b.iter(|| {
            black_box(
                services
                    .orders
                    .reorder_order(original.id_typed(), customer)
                    .unwrap(),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_create_order, bench_reorder);
criterion_main!(benches);
