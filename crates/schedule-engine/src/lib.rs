//! # schedule-engine
//!
//! Unified schedule aggregation and time-grid layout for personal planning data.
//!
//! The engine reads a snapshot of tasks, events, routines, goals and projects
//! and produces normalized [`ScheduleItem`]s for a date window and zoom level.
//! Recurring routines are projected into dated occurrences, and day/week views
//! get a column layout that places overlapping items side by side. Everything
//! is a pure function of its inputs: no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`model`] — source entities, [`Snapshot`], [`ScheduleItem`], [`Zoom`]
//! - [`projector`] — routine → dated occurrences, minus materialized instances
//! - [`policy`] — which categories each zoom level includes, and their decoration
//! - [`aggregator`] — snapshot + window + zoom → ordered items
//! - [`layout`] — overlap-free column packing for one day
//! - [`now`] — current-time indicator offset
//! - [`window`] — date window shown by each zoom level
//! - [`style`] — item type/status → presentation token
//! - [`parse`] — date/time string parsing
//! - [`error`] — Error types

pub mod aggregator;
pub mod error;
pub mod layout;
pub mod model;
pub mod now;
pub mod parse;
pub mod policy;
pub mod projector;
pub mod style;
pub mod window;

pub use aggregator::get_schedule_items;
pub use error::ScheduleError;
pub use layout::{
    layout_by_day, layout_day, layout_day_with, split_all_day, LayoutConfig, LayoutRecord,
    MINIMUM_RENDER_MINUTES,
};
pub use model::{
    Event, Frequency, Goal, ItemType, Project, Routine, RoutineInstance, ScheduleItem, Snapshot,
    Status, Task, Zoom,
};
pub use now::now_offset;
pub use projector::project;
pub use style::{style_for, StyleToken};
pub use window::{window_for, WeekStart};
