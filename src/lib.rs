pub mod agent;
pub mod environment;
pub mod errors;
pub mod models;
pub mod providers;
