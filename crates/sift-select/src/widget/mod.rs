//! Widget layer: geometry, events, the widget base, document click
//! dispatch, and the multi-select dropdown itself.

pub mod base;
pub mod document;
pub mod events;
pub mod geometry;
pub mod multi_select;

pub use base::{WidgetBase, WidgetId};
pub use document::{ClickSubscription, DocumentClicks};
pub use events::{
    KeyboardModifiers, MouseButton, MousePressEvent, MouseReleaseEvent, WidgetEvent,
};
pub use geometry::{Point, Rect, Size};
pub use multi_select::{
    ActionButtonsView, FilterInputView, MultiSelect, MultiSelectView, PageView, PanelView,
    RowView, ToggleButtonView, ALL_BUTTON_LABEL, ITEM_ROW_CLASS, NONE_BUTTON_LABEL,
};

/// The base trait for widgets.
///
/// Widgets delegate common state to their [`WidgetBase`] and receive host
/// events through [`event`](Widget::event).
pub trait Widget {
    /// The widget's base state.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutable access to the widget's base state.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Handle an event routed to this widget.
    ///
    /// Returns `true` when the event was consumed.
    fn event(&mut self, event: &WidgetEvent) -> bool;
}
