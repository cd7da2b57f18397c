pub mod clients;
pub mod exercises;
pub mod programs;
pub mod sessions;
pub mod weight_logs;
