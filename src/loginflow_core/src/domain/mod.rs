pub mod app_metadata;
pub mod contract;
pub mod event;
pub mod identity_providers;
pub mod payloads;
