//! Access-control group entities.

pub mod model;

pub use model::Group;
