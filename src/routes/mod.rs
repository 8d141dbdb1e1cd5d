pub mod auth;
pub mod directorate;
pub mod disciplines;
pub mod flash;
pub mod grading;
pub mod groups;
pub mod health;
pub mod home;
pub mod reports;
pub mod specialties;
pub mod students;
pub mod teachers;
