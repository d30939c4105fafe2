//! Output rendering for the two artifact formats.

pub mod csv;
pub mod json;
