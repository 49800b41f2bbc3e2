pub mod handles;
pub mod orchestrator;
pub mod slots;
