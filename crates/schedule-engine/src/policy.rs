//! Per-zoom inclusion and decoration rules.
//!
//! Each zoom level selects a different set of entity categories: day and week
//! are execution views (tasks, events, routines), month and year are planning
//! views (deadlines, milestones, strategic goals).

use crate::model::Zoom;

/// Which source categories take part in a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPolicy {
    pub zoom: Zoom,
    /// Dated tasks, materialized routine instances and all events.
    pub operational: bool,
    /// Projected routine occurrences.
    pub routines: bool,
    /// Goal and project deadlines.
    pub deadlines: bool,
    /// Events typed `"milestone"`, decorated. Only used when `operational` is off.
    pub milestones: bool,
    /// Goals typed `"strategic"` or with a one-year horizon.
    pub strategic_goals: bool,
}

impl ViewPolicy {
    pub fn for_zoom(zoom: Zoom) -> Self {
        let none = ViewPolicy {
            zoom,
            operational: false,
            routines: false,
            deadlines: false,
            milestones: false,
            strategic_goals: false,
        };
        match zoom {
            Zoom::Day => ViewPolicy {
                operational: true,
                routines: true,
                ..none
            },
            Zoom::Week => ViewPolicy {
                operational: true,
                routines: true,
                deadlines: true,
                ..none
            },
            Zoom::Month => ViewPolicy {
                deadlines: true,
                milestones: true,
                ..none
            },
            Zoom::Year => ViewPolicy {
                strategic_goals: true,
                ..none
            },
        }
    }
}

/// Decoration applied to non-operational items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    GoalDeadline,
    ProjectDeadline,
    Milestone,
    StrategicGoal,
}

impl Marker {
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::GoalDeadline => "🎯",
            Marker::ProjectDeadline => "📁",
            Marker::Milestone => "🚩",
            Marker::StrategicGoal => "🔭",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Marker::GoalDeadline => "#8b5cf6",
            Marker::ProjectDeadline => "#0ea5e9",
            Marker::Milestone => "#f97316",
            Marker::StrategicGoal => "#14b8a6",
        }
    }

    /// Prefix the marker's glyph to a title.
    pub fn decorate(self, title: &str) -> String {
        format!("{} {}", self.glyph(), title)
    }

    /// Prefix used for the ids of items carrying this marker.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Marker::GoalDeadline => "goal-deadline",
            Marker::ProjectDeadline => "project-deadline",
            Marker::Milestone => "milestone",
            Marker::StrategicGoal => "strategic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarse_zooms_drop_operational_items() {
        for zoom in [Zoom::Month, Zoom::Year] {
            let policy = ViewPolicy::for_zoom(zoom);
            assert!(!policy.operational);
            assert!(!policy.routines);
        }
    }

    #[test]
    fn only_week_mixes_deadlines_with_operational_items() {
        assert!(!ViewPolicy::for_zoom(Zoom::Day).deadlines);
        let week = ViewPolicy::for_zoom(Zoom::Week);
        assert!(week.operational && week.deadlines);
    }

    #[test]
    fn decorate_prefixes_glyph() {
        assert_eq!(Marker::Milestone.decorate("Launch"), "🚩 Launch");
        assert_eq!(Marker::StrategicGoal.decorate("Run a marathon"), "🔭 Run a marathon");
    }
}
