//! Convenience re-exports for typical usage.

pub use crate::label::{LabelSource, LabelTemplate};
pub use crate::model::{
    CleanupStrategy, FieldValue, PageStrategy, Paged, Record, RecordListModel, SelectionConfig,
    SelectionKind, SelectionMode, ShowAll,
};
pub use crate::widget::{
    DocumentClicks, KeyboardModifiers, MouseButton, MousePressEvent, MultiSelect,
    MultiSelectView, Point, Rect, RowView, Widget, WidgetEvent, ITEM_ROW_CLASS,
};
