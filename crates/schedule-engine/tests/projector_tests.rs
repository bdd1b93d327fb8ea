//! Tests for routine occurrence projection.

use chrono::NaiveDate;
use schedule_engine::model::{Frequency, ItemType, Routine, RoutineInstance, Status};
use schedule_engine::project;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily(id: &str) -> Routine {
    Routine {
        id: id.to_string(),
        title: format!("Routine {}", id),
        frequency: Frequency::Daily,
        days_of_week: None,
        time: Some("07:30".to_string()),
        duration: Some(20),
        area_id: Some("health".to_string()),
    }
}

fn weekly(id: &str, days: &[u8]) -> Routine {
    Routine {
        frequency: Frequency::Weekly,
        days_of_week: Some(days.to_vec()),
        time: None,
        duration: None,
        area_id: None,
        ..daily(id)
    }
}

fn instance(routine_id: &str, on: &str) -> RoutineInstance {
    RoutineInstance {
        id: format!("inst-{}-{}", routine_id, on),
        title: "Materialized".to_string(),
        from_routine_id: routine_id.to_string(),
        date: on.to_string(),
        ..RoutineInstance::default()
    }
}

#[test]
fn daily_routine_occurs_every_day_in_window() {
    let items = project(&[daily("r1")], &[], date(2024, 1, 8), date(2024, 1, 14));

    assert_eq!(items.len(), 7, "one occurrence per day of a 7-day window");
    let dates: Vec<NaiveDate> = items.iter().map(|i| i.date).collect();
    let expected: Vec<NaiveDate> = (8..=14).map(|d| date(2024, 1, d)).collect();
    assert_eq!(dates, expected);
}

#[test]
fn projected_item_carries_routine_fields() {
    let items = project(&[daily("r1")], &[], date(2024, 1, 10), date(2024, 1, 10));

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, "routine-proj-r1-2024-01-10");
    assert_eq!(item.entity_id, "r1");
    assert_eq!(item.item_type, ItemType::Routine);
    assert_eq!(item.status, Status::Future);
    assert_eq!(item.time.map(|t| t.to_string()), Some("07:30:00".to_string()));
    assert_eq!(item.duration, Some(20));
    assert_eq!(item.area_id.as_deref(), Some("health"));
}

#[test]
fn missing_duration_is_forwarded_as_absent() {
    let mut routine = daily("r1");
    routine.duration = None;
    routine.time = None;

    let items = project(&[routine], &[], date(2024, 1, 10), date(2024, 1, 10));

    assert_eq!(items[0].duration, None);
    assert!(items[0].is_all_day());
}

#[test]
fn weekly_routine_only_on_listed_weekdays() {
    // Monday (1) and Friday (5); window Sun 2024-01-07 .. Sat 2024-01-20.
    let items = project(
        &[weekly("w", &[1, 5])],
        &[],
        date(2024, 1, 7),
        date(2024, 1, 20),
    );

    let dates: Vec<NaiveDate> = items.iter().map(|i| i.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 1, 8),
            date(2024, 1, 12),
            date(2024, 1, 15),
            date(2024, 1, 19),
        ]
    );
}

#[test]
fn weekly_routine_with_sunday_index_zero() {
    // 2024-01-07 and 2024-01-14 are Sundays.
    let items = project(&[weekly("w", &[0])], &[], date(2024, 1, 6), date(2024, 1, 15));
    let dates: Vec<NaiveDate> = items.iter().map(|i| i.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 7), date(2024, 1, 14)]);
}

#[test]
fn weekly_routine_without_days_never_occurs() {
    let items = project(&[weekly("w", &[])], &[], date(2024, 1, 1), date(2024, 1, 31));
    assert!(items.is_empty());

    let mut no_days = weekly("w", &[]);
    no_days.days_of_week = None;
    let items = project(&[no_days], &[], date(2024, 1, 1), date(2024, 1, 31));
    assert!(items.is_empty());
}

#[test]
fn unsupported_frequency_never_occurs() {
    let mut monthly = daily("m");
    monthly.frequency = Frequency::Unsupported("monthly".to_string());
    let items = project(&[monthly], &[], date(2024, 1, 1), date(2024, 1, 31));
    assert!(items.is_empty());
}

#[test]
fn materialized_instance_suppresses_only_its_date() {
    let today = "2024-01-10";
    let items = project(
        &[daily("r1")],
        &[instance("r1", today)],
        date(2024, 1, 8),
        date(2024, 1, 12),
    );

    let dates: Vec<NaiveDate> = items.iter().map(|i| i.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 1, 8),
            date(2024, 1, 9),
            date(2024, 1, 11),
            date(2024, 1, 12),
        ],
        "every date except the materialized one"
    );
}

#[test]
fn instance_of_other_routine_does_not_suppress() {
    let items = project(
        &[daily("r1"), daily("r2")],
        &[instance("r2", "2024-01-10")],
        date(2024, 1, 10),
        date(2024, 1, 10),
    );

    let ids: Vec<&str> = items.iter().map(|i| i.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
}

#[test]
fn dangling_instance_is_ignored() {
    let items = project(
        &[daily("r1")],
        &[instance("deleted-routine", "2024-01-10")],
        date(2024, 1, 10),
        date(2024, 1, 10),
    );
    assert_eq!(items.len(), 1);
}

#[test]
fn instance_with_bad_date_does_not_suppress() {
    let items = project(
        &[daily("r1")],
        &[instance("r1", "10/01/2024")],
        date(2024, 1, 10),
        date(2024, 1, 10),
    );
    assert_eq!(items.len(), 1, "unparseable instance date fails open");
}

#[test]
fn output_is_day_major_then_routine_order() {
    let items = project(
        &[daily("b"), daily("a")],
        &[],
        date(2024, 1, 10),
        date(2024, 1, 11),
    );

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "routine-proj-b-2024-01-10",
            "routine-proj-a-2024-01-10",
            "routine-proj-b-2024-01-11",
            "routine-proj-a-2024-01-11",
        ]
    );
}

#[test]
fn routine_with_malformed_time_is_skipped() {
    let mut broken = daily("broken");
    broken.time = Some("7.30am".to_string());

    let items = project(
        &[broken, daily("ok")],
        &[],
        date(2024, 1, 10),
        date(2024, 1, 10),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].entity_id, "ok");
}

#[test]
fn inverted_window_projects_nothing() {
    let items = project(&[daily("r1")], &[], date(2024, 1, 12), date(2024, 1, 10));
    assert!(items.is_empty());
}

#[test]
fn projection_spans_month_boundary() {
    let items = project(&[daily("r1")], &[], date(2024, 2, 27), date(2024, 3, 2));
    // 27, 28, 29 (leap day), 1, 2
    assert_eq!(items.len(), 5);
    assert_eq!(items[2].date, date(2024, 2, 29));
}

#[test]
fn projection_is_idempotent() {
    let routines = vec![daily("r1"), weekly("w", &[2, 4])];
    let instances = vec![instance("r1", "2024-01-09")];

    let first = project(&routines, &instances, date(2024, 1, 1), date(2024, 1, 31));
    let second = project(&routines, &instances, date(2024, 1, 1), date(2024, 1, 31));

    assert_eq!(first, second);
}

#[test]
fn window_longer_than_one_expansion_is_fully_projected() {
    let start = date(2000, 1, 1);
    let end = start + chrono::Days::new(69_999);

    let items = project(&[daily("r1")], &[], start, end);

    assert_eq!(items.len(), 70_000);
    assert_eq!(items[0].date, start);
    assert_eq!(items[u16::MAX as usize].date, start + chrono::Days::new(u64::from(u16::MAX)));
    assert_eq!(items.last().map(|i| i.date), Some(end));
}
