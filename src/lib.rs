pub mod app;
pub mod cli;
pub mod editor;
pub mod file;
pub mod util;

pub use app::{config::Settings, context::EditorContext, controller::FileController};
