pub mod agent;
pub mod automation;
pub mod errors;
pub mod models;
pub mod providers;
pub mod tools;
