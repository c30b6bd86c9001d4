mod dialogs;
mod editor;
mod persistence;
mod store;

pub use dialogs::{AnsweredDialogs, Dialogs, messages};
pub use editor::CoverEditor;
pub use persistence::{
    DEFAULT_STORAGE_KEY,
    FORMAT_VERSION,
    LoadWarning,
    LoadedDesign,
    PersistenceError,
    PersistenceResult,
    deserialize,
    serialize,
};
pub use store::{BlobStore, EframeStore, MemoryStore, StoreError};
