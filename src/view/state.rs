use uuid::Uuid;

use crate::models::{Observation, Project, Visit};
use crate::services::{aggregate, DashboardTotals};

/// Everything the dashboard renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Listed projects, newest first
    pub projects: Vec<Project>,
    /// Listed visits, newest first
    pub visits: Vec<Visit>,
}

/// A confirmed change to merge into the state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loaded {
        projects: Vec<Project>,
        visits: Vec<Visit>,
    },
    ProjectCreated(Project),
    ProjectUpdated(Project),
    ProjectRemoved(Uuid),
    ObservationAdded {
        project_id: Uuid,
        observation: Observation,
    },
    VisitCreated(Visit),
    VisitUpdated(Visit),
    VisitRemoved(Uuid),
}

impl DashboardState {
    /// Projects shown in the active view and counted in the totals
    pub fn active_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_active())
    }

    /// Completed projects that have not been deleted
    pub fn completed_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.visible && !p.is_active())
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn visit(&self, id: Uuid) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    pub fn totals(&self) -> DashboardTotals {
        aggregate(self.active_projects(), &self.visits)
    }
}

/// Apply an action and return the next state
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::Loaded { projects, visits } => {
            state.projects = projects;
            state.visits = visits;
        }
        Action::ProjectCreated(project) => {
            state.projects.insert(0, project);
        }
        Action::ProjectUpdated(project) => {
            if let Some(slot) = state.projects.iter_mut().find(|p| p.id == project.id) {
                *slot = project;
            }
        }
        Action::ProjectRemoved(id) => {
            state.projects.retain(|p| p.id != id);
        }
        Action::ObservationAdded {
            project_id,
            observation,
        } => {
            if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
                project.observations.push(observation);
            }
        }
        Action::VisitCreated(visit) => {
            state.visits.insert(0, visit);
        }
        Action::VisitUpdated(visit) => {
            if let Some(slot) = state.visits.iter_mut().find(|v| v.id == visit.id) {
                *slot = visit;
            }
        }
        Action::VisitRemoved(id) => {
            state.visits.retain(|v| v.id != id);
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::tests::project_with;
    use crate::models::visit::tests::visit;
    use crate::models::{ProjectPatch, VisitPatch};
    use time::macros::datetime;

    fn loaded() -> DashboardState {
        reduce(
            DashboardState::default(),
            Action::Loaded {
                projects: vec![project_with(120.0, 85.0, 50.0), project_with(200.0, 150.0, 50.0)],
                visits: vec![visit()],
            },
        )
    }

    #[test]
    fn test_loaded_totals() {
        let totals = loaded().totals();

        assert_eq!(totals.total_projects, 2);
        assert_eq!(totals.total_planned_hours, 320.0);
        assert_eq!(totals.total_executed_hours, 235.0);
        assert_eq!(totals.total_revenue, 11750.0);
        assert_eq!(totals.total_visits, 1);
    }

    #[test]
    fn test_created_project_is_listed_first() {
        let project = project_with(40.0, 0.0, 80.0);
        let state = reduce(loaded(), Action::ProjectCreated(project.clone()));

        assert_eq!(state.projects.len(), 3);
        assert_eq!(state.projects[0], project);
    }

    #[test]
    fn test_finishing_leaves_earlier_snapshot_intact() {
        let before = loaded();
        let snapshot = before.totals();
        let finished = before.projects[0]
            .patched(&ProjectPatch::finished(true))
            .unwrap();

        let after = reduce(before.clone(), Action::ProjectUpdated(finished));

        assert_eq!(after.totals().total_projects, 1);
        assert_eq!(after.totals().total_planned_hours, 200.0);
        assert_eq!(after.completed_projects().count(), 1);
        assert_eq!(snapshot.total_projects, 2);
        assert_eq!(before.totals(), snapshot);
    }

    #[test]
    fn test_removing_excludes_project_from_totals() {
        let before = loaded();
        let snapshot = before.totals();
        let id = before.projects[1].id;

        let after = reduce(before, Action::ProjectRemoved(id));

        assert!(after.project(id).is_none());
        assert_eq!(after.totals().total_projects, 1);
        assert_eq!(after.totals().total_revenue, 4250.0);
        assert_eq!(snapshot.total_revenue, 11750.0);
    }

    #[test]
    fn test_observation_appended_to_matching_project() {
        let state = loaded();
        let id = state.projects[0].id;
        let observation = Observation {
            id: Uuid::new_v4(),
            text: "Kickoff done".to_string(),
            created_at: datetime!(2025-01-02 09:00 UTC),
        };

        let state = reduce(
            state,
            Action::ObservationAdded {
                project_id: id,
                observation: observation.clone(),
            },
        );

        assert_eq!(state.project(id).unwrap().observations, vec![observation]);
        assert!(state.projects[1].observations.is_empty());
    }

    #[test]
    fn test_update_of_unknown_id_is_ignored() {
        let state = loaded();
        let stranger = project_with(10.0, 1.0, 10.0);

        let next = reduce(state.clone(), Action::ProjectUpdated(stranger));
        assert_eq!(next, state);
    }

    #[test]
    fn test_visit_toggle_and_removal() {
        let state = loaded();
        let toggled = state.visits[0]
            .patched(&VisitPatch::finished(true))
            .unwrap();

        let state = reduce(state, Action::VisitUpdated(toggled.clone()));
        assert!(state.visit(toggled.id).unwrap().finished());

        let state = reduce(state, Action::VisitRemoved(toggled.id));
        assert!(state.visits.is_empty());
        assert_eq!(state.totals().total_visits, 0);
    }
}
