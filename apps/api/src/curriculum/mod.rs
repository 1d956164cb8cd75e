//! The curriculum aggregate: CRUD over the composition root, the eager-load
//! snapshot query, and the transactional association manager for the four
//! many-to-many item sets.

pub mod aggregate;
pub mod associations;
pub mod handlers;
