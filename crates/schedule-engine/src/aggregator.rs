//! Schedule aggregation -- turns a source snapshot into one ordered item list.
//!
//! Dispatches on the zoom level's [`ViewPolicy`], projects routines for zoom
//! levels that include them, concatenates everything in category order and
//! sorts by date, with timed items before all-day items on the same date.
//!
//! Entities with a malformed date, time or deadline are skipped and logged;
//! aggregation itself never fails.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};
use log::debug;

use crate::error::Result;
use crate::model::{
    Event, Goal, ItemType, Project, RoutineInstance, ScheduleItem, Snapshot, Status, Task, Zoom,
};
use crate::parse::{parse_date, parse_deadline, parse_optional_time};
use crate::policy::{Marker, ViewPolicy};
use crate::projector;

/// Build the ordered schedule for `[window_start, window_end]` (inclusive) at `zoom`.
///
/// The result is a pure function of the arguments: calling it twice with the
/// same inputs yields equal output.
pub fn get_schedule_items(
    snapshot: &Snapshot,
    window_start: NaiveDate,
    window_end: NaiveDate,
    zoom: Zoom,
) -> Vec<ScheduleItem> {
    if window_start > window_end {
        return Vec::new();
    }

    let policy = ViewPolicy::for_zoom(zoom);
    let in_window = |d: NaiveDate| d >= window_start && d <= window_end;
    let mut items = Vec::new();

    if policy.operational {
        collect(&mut items, &snapshot.tasks, |t| task_item(t, &in_window), |t| t.id.as_str());
        collect(
            &mut items,
            &snapshot.routine_instances,
            |i| instance_item(i, &in_window),
            |i| i.id.as_str(),
        );
        collect(&mut items, &snapshot.events, |e| event_item(e, &in_window), |e| e.id.as_str());
    }

    if policy.routines {
        items.extend(projector::project(
            &snapshot.routines,
            &snapshot.routine_instances,
            window_start,
            window_end,
        ));
    }

    if policy.deadlines {
        collect(
            &mut items,
            &snapshot.goals,
            |g| goal_item(g, Marker::GoalDeadline, &in_window),
            |g| g.id.as_str(),
        );
        collect(
            &mut items,
            &snapshot.projects,
            |p| project_item(p, &in_window),
            |p| p.id.as_str(),
        );
    }

    if policy.milestones {
        collect(
            &mut items,
            snapshot.events.iter().filter(|e| e.is_milestone()),
            |e| milestone_item(e, &in_window),
            |e| e.id.as_str(),
        );
    }

    if policy.strategic_goals {
        collect(
            &mut items,
            snapshot.goals.iter().filter(|g| g.is_strategic()),
            |g| goal_item(g, Marker::StrategicGoal, &in_window),
            |g| g.id.as_str(),
        );
    }

    sort_items(&mut items);
    debug!(
        "aggregated {} items for {}..={} at {} zoom",
        items.len(),
        window_start,
        window_end,
        zoom
    );
    items
}

/// Stable sort by date, then timed items by time ahead of all-day items.
///
/// Items that compare equal keep their category/insertion order.
pub fn sort_items(items: &mut [ScheduleItem]) {
    items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| cmp_time(a.time, b.time)));
}

fn cmp_time(a: Option<NaiveTime>, b: Option<NaiveTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Convert each source record, skipping (and logging) those that fail to parse.
///
/// `convert` returns `Ok(None)` for records that are valid but out of scope.
fn collect<'a, T: 'a, I, F, K>(out: &mut Vec<ScheduleItem>, source: I, convert: F, id_of: K)
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Result<Option<ScheduleItem>>,
    K: Fn(&T) -> &str,
{
    for record in source {
        match convert(record) {
            Ok(Some(item)) => out.push(item),
            Ok(None) => {}
            Err(e) => debug!("skipping {}: {}", id_of(record), e),
        }
    }
}

fn task_item(task: &Task, in_window: &impl Fn(NaiveDate) -> bool) -> Result<Option<ScheduleItem>> {
    let Some(raw_date) = task.date.as_deref() else {
        return Ok(None);
    };
    let date = parse_date(raw_date)?;
    let time = parse_optional_time(task.start_time.as_deref())?;
    if !in_window(date) {
        return Ok(None);
    }
    Ok(Some(ScheduleItem {
        id: format!("task-{}", task.id),
        item_type: ItemType::Task,
        title: task.title.clone(),
        date,
        time,
        duration: task.duration,
        status: task.status.clone(),
        entity_id: task.id.clone(),
        area_id: task.area_id.clone(),
        details: task.description.clone(),
        is_focus: Some(task.is_focus),
        color: None,
    }))
}

fn instance_item(
    instance: &RoutineInstance,
    in_window: &impl Fn(NaiveDate) -> bool,
) -> Result<Option<ScheduleItem>> {
    let date = parse_date(&instance.date)?;
    let time = parse_optional_time(instance.time.as_deref())?;
    if !in_window(date) {
        return Ok(None);
    }
    Ok(Some(ScheduleItem {
        id: format!("instance-{}", instance.id),
        item_type: ItemType::Task,
        title: instance.title.clone(),
        date,
        time,
        duration: instance.duration,
        status: instance.status.clone(),
        entity_id: instance.id.clone(),
        area_id: instance.area_id.clone(),
        details: None,
        is_focus: None,
        color: None,
    }))
}

fn event_item(event: &Event, in_window: &impl Fn(NaiveDate) -> bool) -> Result<Option<ScheduleItem>> {
    let date = parse_date(&event.date)?;
    let start = parse_optional_time(event.start_time.as_deref())?;
    let end = parse_optional_time(event.end_time.as_deref())?;
    if !in_window(date) {
        return Ok(None);
    }
    let duration = match (start, end) {
        (Some(s), Some(e)) if e > s => u32::try_from((e - s).num_minutes()).ok(),
        _ => None,
    };
    Ok(Some(ScheduleItem {
        id: format!("event-{}", event.id),
        item_type: ItemType::Event,
        title: event.title.clone(),
        date,
        time: start,
        duration,
        status: Status::Scheduled,
        entity_id: event.id.clone(),
        area_id: event.area_id.clone(),
        details: event.description.clone(),
        is_focus: None,
        color: None,
    }))
}

fn milestone_item(
    event: &Event,
    in_window: &impl Fn(NaiveDate) -> bool,
) -> Result<Option<ScheduleItem>> {
    let Some(mut item) = event_item(event, in_window)? else {
        return Ok(None);
    };
    let marker = Marker::Milestone;
    item.id = format!("{}-{}", marker.id_prefix(), event.id);
    item.title = marker.decorate(&event.title);
    item.color = Some(marker.color().to_string());
    Ok(Some(item))
}

/// A goal placed on its deadline, as a plain deadline or as a strategic goal.
fn goal_item(
    goal: &Goal,
    marker: Marker,
    in_window: &impl Fn(NaiveDate) -> bool,
) -> Result<Option<ScheduleItem>> {
    deadline_item(
        DeadlineSource {
            id: &goal.id,
            title: &goal.title,
            deadline: goal.deadline.as_deref(),
            status: &goal.status,
            area_id: goal.area_id.as_deref(),
        },
        marker,
        in_window,
    )
}

fn project_item(
    project: &Project,
    in_window: &impl Fn(NaiveDate) -> bool,
) -> Result<Option<ScheduleItem>> {
    deadline_item(
        DeadlineSource {
            id: &project.id,
            title: &project.title,
            deadline: project.deadline.as_deref(),
            status: &project.status,
            area_id: project.area_id.as_deref(),
        },
        Marker::ProjectDeadline,
        in_window,
    )
}

/// Fields shared by goals and projects.
struct DeadlineSource<'a> {
    id: &'a str,
    title: &'a str,
    deadline: Option<&'a str>,
    status: &'a Status,
    area_id: Option<&'a str>,
}

fn deadline_item(
    source: DeadlineSource<'_>,
    marker: Marker,
    in_window: &impl Fn(NaiveDate) -> bool,
) -> Result<Option<ScheduleItem>> {
    let Some(raw) = source.deadline else {
        return Ok(None);
    };
    let date = parse_deadline(raw)?;
    if !in_window(date) {
        return Ok(None);
    }
    Ok(Some(ScheduleItem {
        id: format!("{}-{}", marker.id_prefix(), source.id),
        item_type: ItemType::Deadline,
        title: marker.decorate(source.title),
        date,
        time: None,
        duration: None,
        status: source.status.clone(),
        entity_id: source.id.to_string(),
        area_id: source.area_id.map(str::to_string),
        details: None,
        is_focus: None,
        color: Some(marker.color().to_string()),
    }))
}
