pub mod in_memory_control;

pub use in_memory_control::{InMemoryControl, RecordedRedirect};
