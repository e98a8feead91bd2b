pub mod observation;
pub mod project;
pub mod visit;
