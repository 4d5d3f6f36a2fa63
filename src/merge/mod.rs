//! Board portability: the export document format and the import/merge engine
//! that reconciles an external export into the live store.

pub mod document;
pub mod import;

pub use document::{export_board, BoardExport, ImportError};
pub use import::{import_board, ImportMode};
