#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod catalog;
pub mod command;
pub mod document;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod fonts;
pub mod panels;
pub mod render;
pub mod settings;
pub mod state;
pub mod validation;

pub use app::CoverApp;
pub use catalog::{BlendMode, Illustration, IllustrationCatalog, IllustrationTheme, ImageSource};
pub use command::Command;
pub use document::{CoverDocument, CoverFields, FieldRole, FontFamily, LayoutOrder, PaperSize, TextRole};
pub use error::{CoverError, CoverResult};
pub use render::{CoverProjection, project};
pub use settings::CoverSettings;
pub use state::CoverEditor;
