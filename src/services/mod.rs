pub mod metrics;

pub use metrics::{
    aggregate, compute_budget, compute_project_status, project_metrics, Budget, DashboardTotals,
    ProgressStatus, ProjectMetrics,
};
