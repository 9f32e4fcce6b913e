//! Small helpers shared by pages and components.

pub mod files;
pub mod labels;
