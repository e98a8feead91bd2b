pub mod project;
pub mod validation;
pub mod visit;
pub mod wire;

pub use project::{Observation, ObservationDraft, Project, ProjectDraft, ProjectPatch, ProjectStatus};
pub use validation::ValidationError;
pub use visit::{Visit, VisitDraft, VisitPatch};
pub use wire::{
    Ack, ObservationRecord, ProjectRecord, ProjectRequest, RequestMethod, VisitRecord,
    VisitRequest,
};
