//! One page component per view. `App` renders exactly one of them.

pub mod album;
pub mod albums;
pub mod photo;
pub mod upload;
