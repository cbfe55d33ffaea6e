pub mod auth;
pub mod course;
pub mod topic;
