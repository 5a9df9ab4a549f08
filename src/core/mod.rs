pub mod backup;
pub mod checkin;
pub mod config;
pub mod events;
pub mod log;
pub mod query;
pub mod report;
pub mod roster;
pub mod status;
pub mod students;
