pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod entities;
pub mod logging;
pub mod movement;
pub mod progress;
pub mod registry;
pub mod scheduler;
pub mod spawn;
pub mod store;
