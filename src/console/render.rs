use std::fmt::Write;

use time::OffsetDateTime;

use hourglow::models::{Project, Visit};
use hourglow::services::{project_metrics, DashboardTotals};
use hourglow::view::DashboardState;

pub fn render_totals(totals: &DashboardTotals) -> String {
    format!(
        "Projects: {}  Planned: {:.1} h  Executed: {:.1} h  Revenue: {:.2}\n\
         Visits: {}  Visit hours: {:.1} h  Pipeline: {:.2}\n",
        totals.total_projects,
        totals.total_planned_hours,
        totals.total_executed_hours,
        totals.total_revenue,
        totals.total_visits,
        totals.total_visit_hours,
        totals.total_opportunity_value,
    )
}

pub fn render_project(project: &Project, now: OffsetDateTime) -> String {
    let metrics = project_metrics(project, now);
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {} ({})", metrics.label, project.name, project.id);
    if !project.client_name.is_empty() {
        let _ = writeln!(out, "  Client: {}", project.client_name);
    }
    let _ = writeln!(
        out,
        "  Hours: {:.1} / {:.1} ({:.0}%)  Schedule: {:.0}%  {} - {}",
        project.executed_hours(),
        project.planned_hours(),
        metrics.hours_progress,
        metrics.time_progress,
        project.start_date(),
        project.end_date(),
    );
    let _ = write!(
        out,
        "  Cost: {:.2} / {:.2}",
        metrics.budget.executed_cost, metrics.budget.planned_cost
    );
    match metrics.budget.displayed_overage() {
        Some(overage) => {
            let _ = writeln!(out, "  Over budget by {:.2}", overage);
        }
        None => out.push('\n'),
    }
    for observation in &project.observations {
        let _ = writeln!(
            out,
            "  - {} {}",
            observation.created_at.date(),
            observation.text
        );
    }

    out
}

pub fn render_visit(visit: &Visit) -> String {
    format!(
        "[{}] {} {} ({})\n  {} {:.1} h  Value: {:.2}\n",
        if visit.finished() { "x" } else { " " },
        visit.date,
        visit.product,
        visit.id,
        visit.client_name,
        visit.hours(),
        visit.opportunity_value(),
    )
}

pub fn render_dashboard(state: &DashboardState, now: OffsetDateTime) -> String {
    let mut out = render_totals(&state.totals());

    out.push_str("\nActive projects\n");
    for project in state.active_projects() {
        out.push_str(&render_project(project, now));
    }

    let completed: Vec<_> = state.completed_projects().collect();
    if !completed.is_empty() {
        out.push_str("\nCompleted projects\n");
        for project in completed {
            out.push_str(&render_project(project, now));
        }
    }

    out.push_str("\nVisits\n");
    for visit in &state.visits {
        out.push_str(&render_visit(visit));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hourglow::models::{ProjectDraft, ProjectPatch, VisitDraft};
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn project(planned: f64, executed: f64) -> Project {
        let draft = ProjectDraft {
            name: "Corporate website".to_string(),
            description: String::new(),
            client_name: "TechCorp S.A.".to_string(),
            consultant: String::new(),
            pm: String::new(),
            country: String::new(),
            opportunity_number: None,
            opportunity_value: None,
            planned_hours: planned,
            hourly_rate: 50.0,
            start_date: date!(2025 - 01 - 01),
            end_date: date!(2025 - 03 - 15),
        };
        Project::new(Uuid::new_v4(), draft, datetime!(2024-12-20 10:00 UTC))
            .unwrap()
            .patched(&ProjectPatch::executed_hours(executed))
            .unwrap()
    }

    #[test]
    fn test_render_totals() {
        let totals = DashboardTotals {
            total_projects: 2,
            total_planned_hours: 320.0,
            total_executed_hours: 235.0,
            total_revenue: 11750.0,
            ..Default::default()
        };

        let text = render_totals(&totals);
        assert!(text.contains("Projects: 2"));
        assert!(text.contains("Revenue: 11750.00"));
    }

    #[test]
    fn test_render_project_over_budget() {
        let text = render_project(&project(100.0, 101.0), datetime!(2025-04-01 00:00 UTC));

        assert!(text.starts_with("[Completed] Corporate website"));
        assert!(text.contains("Over budget by 50.00"));
    }

    #[test]
    fn test_render_project_within_budget() {
        let text = render_project(&project(100.0, 0.0), datetime!(2024-12-01 00:00 UTC));

        assert!(text.starts_with("[Pending]"));
        assert!(!text.contains("Over budget"));
    }

    #[test]
    fn test_render_visit() {
        let draft = VisitDraft {
            product: "Cloud backup".to_string(),
            client_name: "Retail Plus".to_string(),
            opportunity_number: None,
            country: String::new(),
            consultant: String::new(),
            hours: 2.5,
            date: date!(2025 - 02 - 10),
            opportunity_value: 18000.0,
        };
        let visit = Visit::new(Uuid::new_v4(), draft, datetime!(2025-02-10 15:00 UTC)).unwrap();

        let text = render_visit(&visit);
        assert!(text.starts_with("[ ] 2025-02-10 Cloud backup"));
        assert!(text.contains("Value: 18000.00"));
    }
}
