pub mod capture;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod store;
pub mod view;

pub use capture::CaptureInput;
pub use commands::{add_task, delete_tasks, list_tasks, open_store, toggle_tasks};
pub use config::AppConfig;
pub use database::Database;
pub use error::StorageError;
pub use model::*;
pub use persistence::{MemorySlot, Slot};
pub use store::TaskStore;
pub use view::ViewSnapshot;
