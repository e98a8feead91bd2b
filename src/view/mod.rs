//! UI-independent view layer: forms, a pure state reducer and the session
//! that drives them against a store.

pub mod form;
pub mod session;
pub mod state;

pub use form::{parse_hours, ProjectForm, VisitForm};
pub use session::{Session, SessionError, SessionResult};
pub use state::{reduce, Action, DashboardState};
