pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod menu;
pub mod session;
pub mod tuning;
