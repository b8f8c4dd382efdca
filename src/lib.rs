pub mod backup;
pub mod db;
pub mod diary;
pub mod emotions;
pub mod error;
pub mod flow;
pub mod ipc;
pub mod notes;
pub mod roster;
pub mod sheet;
pub mod tabular;

pub use diary::DiaryFacade;
pub use error::{DiaryError, Warning};
pub use notes::TeacherNote;
pub use roster::StudentAccount;
pub use sheet::{DiaryEntry, EntryDraft, SheetStore, UpsertOutcome};
pub use tabular::{MemoryStore, SheetId, TabularStore};

pub type Result<T> = std::result::Result<T, DiaryError>;
