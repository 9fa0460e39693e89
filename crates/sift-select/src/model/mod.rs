//! Model layer: records, the observable collection, selection, filtering,
//! and paging.
//!
//! The multi-select widget is a thin controller over these pieces:
//!
//! - [`RecordListModel`] holds the caller's ordered [`Record`]s and emits
//!   change signals.
//! - [`SelectionModel`] applies single/multi selection semantics by writing
//!   a configurable boolean field on the records.
//! - [`FilteredView`] is the lazy label-substring view the panel renders.
//! - [`PageStrategy`] optionally slices the filtered view into pages.

pub mod filter;
pub mod list_model;
pub mod pager;
pub mod record;
pub mod selection;
pub mod traits;

pub use filter::FilteredView;
pub use list_model::RecordListModel;
pub use pager::{PageStrategy, Paged, ShowAll, DEFAULT_PAGE_SIZE};
pub use record::{FieldValue, Record};
pub use selection::{
    CleanupStrategy, SelectionConfig, SelectionKind, SelectionMode, SelectionModel,
};
pub use traits::ModelSignals;
