pub mod model;
pub mod search;
