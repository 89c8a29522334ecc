pub mod control;
pub mod services;
