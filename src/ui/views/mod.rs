pub mod config;
pub mod follow;
pub mod serve;
