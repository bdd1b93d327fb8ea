//! Presentation tokens for schedule items.
//!
//! A total mapping from item type and status to a style token; every
//! combination, including unknown statuses, resolves to some token.

use serde::Serialize;

use crate::model::{ItemType, ScheduleItem, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleToken {
    TaskOpen,
    TaskActive,
    TaskDone,
    TaskMuted,
    Event,
    EventCanceled,
    RoutinePlanned,
    RoutineDone,
    RoutineSkipped,
    DeadlineOpen,
    DeadlineMet,
    DeadlineDropped,
}

impl StyleToken {
    pub fn name(self) -> &'static str {
        match self {
            StyleToken::TaskOpen => "task-open",
            StyleToken::TaskActive => "task-active",
            StyleToken::TaskDone => "task-done",
            StyleToken::TaskMuted => "task-muted",
            StyleToken::Event => "event",
            StyleToken::EventCanceled => "event-canceled",
            StyleToken::RoutinePlanned => "routine-planned",
            StyleToken::RoutineDone => "routine-done",
            StyleToken::RoutineSkipped => "routine-skipped",
            StyleToken::DeadlineOpen => "deadline-open",
            StyleToken::DeadlineMet => "deadline-met",
            StyleToken::DeadlineDropped => "deadline-dropped",
        }
    }

    /// Closed items render struck through.
    pub fn is_struck(self) -> bool {
        matches!(
            self,
            StyleToken::TaskDone
                | StyleToken::EventCanceled
                | StyleToken::RoutineDone
                | StyleToken::DeadlineMet
        )
    }
}

pub fn style_for(item_type: ItemType, status: &Status) -> StyleToken {
    match (item_type, status) {
        (ItemType::Task, Status::Completed) => StyleToken::TaskDone,
        (ItemType::Task, Status::Canceled | Status::Deferred) => StyleToken::TaskMuted,
        (ItemType::Task, Status::InProgress | Status::Active) => StyleToken::TaskActive,
        (ItemType::Task, _) => StyleToken::TaskOpen,

        (ItemType::Event, Status::Canceled) => StyleToken::EventCanceled,
        (ItemType::Event, _) => StyleToken::Event,

        (ItemType::Routine, Status::Completed) => StyleToken::RoutineDone,
        (ItemType::Routine, Status::Canceled | Status::Deferred) => StyleToken::RoutineSkipped,
        (ItemType::Routine, _) => StyleToken::RoutinePlanned,

        (ItemType::Deadline, Status::Completed) => StyleToken::DeadlineMet,
        (ItemType::Deadline, Status::Canceled | Status::Deferred) => StyleToken::DeadlineDropped,
        (ItemType::Deadline, _) => StyleToken::DeadlineOpen,
    }
}

impl ScheduleItem {
    pub fn style(&self) -> StyleToken {
        style_for(self.item_type, &self.status)
    }
}
