pub mod app;
pub mod factory;

#[allow(unused_imports)]
pub use app::{serve, TestApp};
#[allow(unused_imports)]
pub use factory::Factory;
