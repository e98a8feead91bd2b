use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Project, Visit};

/// Percentage points of slack before a project counts as ahead or behind
pub const PACE_TOLERANCE: f64 = 10.0;

/// Schedule status of a project, derived from hours and calendar progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Start date not reached yet
    Pending,
    /// Within the window and on pace
    InProgress,
    /// Hours ahead of the calendar
    Ahead,
    /// Hours behind the calendar
    Behind,
    /// Window closed with all planned hours executed
    Completed,
    /// Window closed with hours still missing
    Overdue,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Ahead => "Ahead",
            Self::Behind => "Behind",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    /// Statuses that deserve a warning badge
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Behind | Self::Overdue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub executed_cost: f64,
    pub planned_cost: f64,
    pub over_budget: bool,
    /// Only meaningful when `over_budget` is set
    pub overage: f64,
}

impl Budget {
    /// Overage to show to the user, if any
    pub fn displayed_overage(&self) -> Option<f64> {
        self.over_budget.then_some(self.overage)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotals {
    pub total_projects: usize,
    pub total_planned_hours: f64,
    pub total_executed_hours: f64,
    pub total_revenue: f64,
    pub total_visits: usize,
    pub total_visit_hours: f64,
    pub total_opportunity_value: f64,
}

/// Everything a project card displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectMetrics {
    pub id: Uuid,
    pub name: String,
    pub status: ProgressStatus,
    pub label: String,
    pub hours_progress: f64,
    pub time_progress: f64,
    pub budget: Budget,
}

/// Executed hours as a percentage of planned hours (may exceed 100)
pub fn hours_progress(project: &Project) -> f64 {
    project.executed_hours() / project.planned_hours() * 100.0
}

/// Elapsed share of the project window, clamped to `0..=100`.
///
/// Both dates are taken at 00:00 UTC. A window of zero length counts as
/// fully elapsed once it has started.
pub fn time_progress(project: &Project, now: OffsetDateTime) -> f64 {
    let (start, end) = window(project);
    let total = (end - start).as_seconds_f64();

    if total <= 0.0 {
        return if now >= start { 100.0 } else { 0.0 };
    }

    let elapsed = (now - start).as_seconds_f64();
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

pub fn compute_project_status(project: &Project, now: OffsetDateTime) -> ProgressStatus {
    let (start, end) = window(project);
    let hours = hours_progress(project);

    if now < start {
        return ProgressStatus::Pending;
    }

    if now > end {
        return if hours >= 100.0 {
            ProgressStatus::Completed
        } else {
            ProgressStatus::Overdue
        };
    }

    let time = time_progress(project, now);
    if hours < time - PACE_TOLERANCE {
        ProgressStatus::Behind
    } else if hours > time + PACE_TOLERANCE {
        ProgressStatus::Ahead
    } else {
        ProgressStatus::InProgress
    }
}

pub fn compute_budget(project: &Project) -> Budget {
    let executed_cost = project.executed_hours() * project.hourly_rate();
    let planned_cost = project.planned_hours() * project.hourly_rate();

    Budget {
        executed_cost,
        planned_cost,
        over_budget: project.executed_hours() > project.planned_hours(),
        overage: executed_cost - planned_cost,
    }
}

/// Roll up KPIs over whatever collection the caller considers active
pub fn aggregate<'a, P, V>(projects: P, visits: V) -> DashboardTotals
where
    P: IntoIterator<Item = &'a Project>,
    V: IntoIterator<Item = &'a Visit>,
{
    let mut totals = DashboardTotals::default();

    for project in projects {
        totals.total_projects += 1;
        totals.total_planned_hours += project.planned_hours();
        totals.total_executed_hours += project.executed_hours();
        totals.total_revenue += project.executed_hours() * project.hourly_rate();
    }

    for visit in visits {
        totals.total_visits += 1;
        totals.total_visit_hours += visit.hours();
        totals.total_opportunity_value += visit.opportunity_value();
    }

    totals
}

pub fn project_metrics(project: &Project, now: OffsetDateTime) -> ProjectMetrics {
    let status = compute_project_status(project, now);

    ProjectMetrics {
        id: project.id,
        name: project.name.clone(),
        status,
        label: status.label().to_string(),
        hours_progress: hours_progress(project),
        time_progress: time_progress(project, now),
        budget: compute_budget(project),
    }
}

fn window(project: &Project) -> (OffsetDateTime, OffsetDateTime) {
    (
        project.start_date().midnight().assume_utc(),
        project.end_date().midnight().assume_utc(),
    )
}
