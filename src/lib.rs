//! Derived academic metrics for a single student: attendance and marks
//! percentages, grade points and CGPA, risk flags, a short study plan,
//! career roadmaps, and a keyword router that picks which view to show.

pub mod config;
pub mod error;
pub mod intent;
pub mod metrics;
pub mod models;
pub mod planner;
pub mod profile;
pub mod report;
pub mod risk;
pub mod roadmap;
pub mod seed;
pub mod store;
pub mod summary;
pub mod views;

pub use error::{DashboardError, Result};
