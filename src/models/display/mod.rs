//! Display model implementations for table and JSON output
//!
//! Display models transform allocation records into CLI-friendly rows with
//! column names and formatted money.

mod common;
mod instance;
mod report;
mod user;

pub use instance::InstanceDisplay;
pub use report::ReportView;
pub use user::PeerDisplay;
