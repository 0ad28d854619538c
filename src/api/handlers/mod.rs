//! HTTP handler modules, one per resource family

pub mod admin;
pub mod auth;
pub mod colleges;
pub mod files;
pub mod forum;
pub mod groups;
pub mod jobs;
pub mod messages;
pub mod practice;
pub mod resumes;
pub mod users;
