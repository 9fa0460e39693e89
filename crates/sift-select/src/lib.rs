//! # sift-select
//!
//! A multi-select dropdown widget built as a small Qt-style model/view
//! stack: a toggle button carrying caller-supplied content opens a panel
//! with a text filter box, All/None convenience buttons, and one togglable
//! row per item, optionally sliced into fixed-size pages. Clicks anywhere
//! in the host document outside the widget collapse the panel unless they
//! carry an explicit ignore marker.
//!
//! The crate is organized the way the widget actually decomposes:
//!
//! - [`model`] - the caller-owned record collection, the embedded
//!   selection model, the filtered view, and page strategies
//! - [`label`] - label attributes and interpolated label expressions
//! - [`widget`] - event types, the widget base, document click dispatch,
//!   and [`MultiSelect`](widget::MultiSelect) itself
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sift_select::prelude::*;
//!
//! let model = Arc::new(RecordListModel::new(vec![
//!     Record::new().with_field("label", "foo"),
//!     Record::new().with_field("label", "bar"),
//! ]));
//!
//! let document = DocumentClicks::new();
//! let mut select = MultiSelect::new(model.clone())
//!     .with_toggle_content("Choose items")
//!     .attached_to(&document);
//!
//! // Open the panel and narrow the list
//! select.open();
//! select.set_filter_text("fo");
//! assert_eq!(select.visible_rows().len(), 1);
//!
//! // A click elsewhere in the document collapses the panel
//! document.dispatch(MousePressEvent::left_click(Point::new(900.0, 900.0)));
//! assert!(!select.is_open());
//! ```

pub mod label;
pub mod model;
pub mod prelude;
pub mod widget;

pub use widget::MultiSelect;
