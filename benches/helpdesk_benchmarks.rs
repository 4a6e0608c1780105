use campus_helpdesk::core::{
    Status, Statistics, Ticket, TicketBuilder, Urgency, daily_trends, group_stats,
};
use campus_helpdesk::service::{SearchFilters, search};
use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const CATEGORIES: [&str; 5] = ["laptop", "printer", "networking", "software", "hardware"];
const DEPARTMENTS: [&str; 4] = ["cse", "it", "mech", "civil"];

fn tickets(count: u64) -> Vec<Ticket> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let index = usize::try_from(i).unwrap();
            let created_at = start + Duration::minutes(i64::try_from(i * 37).unwrap());
            let status = Status::ALL[index % Status::ALL.len()];
            let urgency = if i % 7 == 0 { Urgency::Urgent } else { Urgency::Medium };
            TicketBuilder::new()
                .number(1001 + i)
                .name(format!("User {i}"))
                .department(DEPARTMENTS[index % DEPARTMENTS.len()])
                .category(CATEGORIES[index % CATEGORIES.len()])
                .description(format!("Issue number {i} in lab {}", i % 12))
                .urgency(urgency)
                .status(status)
                .created_at(created_at)
                .updated_at(created_at + Duration::hours(3))
                .build()
        })
        .collect()
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for size in [100_u64, 1_000, 10_000] {
        let tickets = tickets(size);
        let filters = SearchFilters::new()
            .status(Status::Pending)
            .category("printer");

        group.bench_with_input(BenchmarkId::new("query", size), &tickets, |b, tickets| {
            b.iter(|| search(black_box(tickets), black_box("lab 7"), &SearchFilters::new()));
        });
        group.bench_with_input(BenchmarkId::new("filtered", size), &tickets, |b, tickets| {
            b.iter(|| search(black_box(tickets), "", black_box(&filters)));
        });
    }
    group.finish();
}

fn benchmark_statistics(c: &mut Criterion) {
    let tickets = tickets(10_000);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

    c.bench_function("statistics_compute_10000", |b| {
        b.iter(|| Statistics::compute(black_box(&tickets), now));
    });
    c.bench_function("department_stats_10000", |b| {
        b.iter(|| group_stats(black_box(&tickets), |t| t.department.as_str()));
    });
    c.bench_function("daily_trends_30_10000", |b| {
        b.iter(|| daily_trends(black_box(&tickets), now.date_naive(), 30));
    });
}

criterion_group!(benches, benchmark_search, benchmark_statistics);
criterion_main!(benches);
