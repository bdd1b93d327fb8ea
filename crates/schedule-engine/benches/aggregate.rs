// Benchmarks aggregation and layout over planner-sized snapshots.

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use schedule_engine::model::{Event, Frequency, Goal, Routine, Snapshot, Task};
use schedule_engine::{get_schedule_items, layout_by_day, LayoutConfig, Zoom};

fn snapshot(entities: usize) -> Snapshot {
    let mut s = Snapshot::default();
    for i in 0..entities {
        let day = 1 + (i % 28);
        s.tasks.push(Task {
            id: format!("t{}", i),
            title: format!("Task {}", i),
            date: Some(format!("2026-03-{:02}", day)),
            start_time: Some(format!("{:02}:{:02}", 7 + i % 12, (i * 15) % 60)),
            duration: Some(30 + (i % 4) as u32 * 15),
            ..Task::default()
        });
        s.events.push(Event {
            id: format!("e{}", i),
            title: format!("Event {}", i),
            date: format!("2026-03-{:02}", day),
            start_time: Some(format!("{:02}:00", 9 + i % 8)),
            end_time: Some(format!("{:02}:30", 9 + i % 8)),
            ..Event::default()
        });
        s.goals.push(Goal {
            id: format!("g{}", i),
            title: format!("Goal {}", i),
            deadline: Some(format!("2026-03-{:02}", day)),
            ..Goal::default()
        });
    }
    for i in 0..(entities / 4).max(1) {
        s.routines.push(Routine {
            id: format!("r{}", i),
            title: format!("Routine {}", i),
            frequency: if i % 2 == 0 {
                Frequency::Daily
            } else {
                Frequency::Weekly
            },
            days_of_week: Some(vec![1, 3, 5]),
            time: Some("07:00".to_string()),
            duration: Some(20),
            area_id: None,
        });
    }
    s
}

fn bench_week_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_aggregation");
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

    for entities in [10, 100, 1000] {
        let s = snapshot(entities);
        group.bench_with_input(BenchmarkId::from_parameter(entities), &s, |b, s| {
            b.iter(|| get_schedule_items(black_box(s), start, end, Zoom::Week));
        });
    }
    group.finish();
}

fn bench_week_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_layout");
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let config = LayoutConfig::default();

    for entities in [10, 100, 1000] {
        let items = get_schedule_items(&snapshot(entities), start, end, Zoom::Week);
        group.bench_with_input(BenchmarkId::from_parameter(entities), &items, |b, items| {
            b.iter(|| layout_by_day(black_box(items), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_week_aggregation, bench_week_layout);
criterion_main!(benches);
