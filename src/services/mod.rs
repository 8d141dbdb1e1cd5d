pub mod enrollment;
pub mod grading;
pub mod provisioning;
pub mod reports;
