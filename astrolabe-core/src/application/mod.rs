pub mod agent;
pub mod preprocess;
pub mod tooling;
