pub mod customer;
pub mod job;
pub mod service;

pub use customer::Customer;
pub use job::{Job, JobInfo, JobStatus};
pub use service::ServiceItem;
