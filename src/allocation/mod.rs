//! Rightsizing allocation model
//!
//! Users, instances, and the view model that aggregates waste for a selected
//! user or for the leadership roster.

pub mod instance;
pub mod user;
pub mod view;

pub use instance::Instance;
pub use user::{User, UserDirectory};
pub use view::{ViewModel, ViewModelBuilder};
