pub mod autosave;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod draft;
pub mod messages;
pub mod plan;
pub mod quest;
pub mod session;
pub mod sound;
pub mod view;
