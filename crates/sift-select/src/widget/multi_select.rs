//! Multi-select dropdown widget.
//!
//! The widget renders a toggle button carrying caller-supplied content.
//! Clicking it opens a panel with a text filter box, All/None action
//! buttons (multi-select modes only), and one togglable row per item
//! surviving the filter, optionally sliced into pages.
//!
//! The widget is a thin controller: items live in a caller-owned
//! [`RecordListModel`], selection semantics come from the embedded
//! [`SelectionModel`], and the visible list is recomputed lazily from the
//! model on every query - so both wholesale replacement and in-place
//! mutation of the collection are reflected without per-item
//! subscriptions.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sift_select::model::{Record, RecordListModel};
//! use sift_select::widget::{DocumentClicks, MultiSelect};
//!
//! let model = Arc::new(RecordListModel::new(vec![
//!     Record::new().with_field("label", "foo"),
//!     Record::new().with_field("label", "bar"),
//! ]));
//!
//! let document = DocumentClicks::new();
//! let mut select = MultiSelect::new(model)
//!     .with_toggle_content("Pick some")
//!     .attached_to(&document);
//!
//! select.toggle();
//! assert_eq!(select.visible_rows().len(), 2);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use sift_select_core::{Property, Signal};

use crate::label::{LabelSource, LabelTemplate};
use crate::model::{
    CleanupStrategy, FilteredView, PageStrategy, RecordListModel, SelectionConfig, SelectionKind,
    SelectionMode, SelectionModel, ShowAll,
};

use super::base::WidgetBase;
use super::document::{ClickSubscription, DocumentClicks};
use super::events::{MouseButton, MousePressEvent, WidgetEvent};
use super::geometry::{Point, Rect, Size};
use super::Widget;

/// Marker class carried by every item row, for external inspection and
/// integration tests.
pub const ITEM_ROW_CLASS: &str = "ms-item";

/// Label on the select-all action button.
pub const ALL_BUTTON_LABEL: &str = "All";

/// Label on the select-none action button.
pub const NONE_BUTTON_LABEL: &str = "None";

/// Height of one panel row (filter box, action row, item rows).
const ROW_HEIGHT: f32 = 24.0;

/// Default widget size before the host assigns geometry.
const DEFAULT_SIZE: Size = Size::new(160.0, 28.0);

// ============================================================================
// Parts
// ============================================================================

/// Parts of the widget for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MultiSelectPart {
    #[default]
    None,
    /// The toggle button (the collapsed widget itself).
    ToggleButton,
    /// The filter text box at the top of the panel.
    FilterInput,
    /// The "All" action button.
    SelectAllButton,
    /// The "None" action button.
    SelectNoneButton,
    /// An item row in the panel, by visual (paged) index.
    ItemRow(usize),
}

// ============================================================================
// Structural views
// ============================================================================

/// One rendered item row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position of the backing record in the source collection.
    pub source_row: usize,
    /// The computed display label.
    pub label: String,
    /// Whether the record carries the selected mark.
    pub selected: bool,
    /// Row classes: always [`ITEM_ROW_CLASS`], plus the configured selected
    /// class when selected.
    pub classes: Vec<String>,
}

/// The toggle button.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleButtonView {
    /// Caller-supplied content, rendered verbatim.
    pub content: String,
    /// Whether the panel is open.
    pub open: bool,
}

/// The filter text box.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterInputView {
    /// Current filter text.
    pub text: String,
}

/// The All/None action buttons (multi-select modes only).
#[derive(Debug, Clone, PartialEq)]
pub struct ActionButtonsView {
    /// Label on the select-all button.
    pub all_label: String,
    /// Label on the select-none button.
    pub none_label: String,
}

impl Default for ActionButtonsView {
    fn default() -> Self {
        Self {
            all_label: ALL_BUTTON_LABEL.to_string(),
            none_label: NONE_BUTTON_LABEL.to_string(),
        }
    }
}

/// The page indicator (paged strategy only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    /// The effective (clamped) page cursor.
    pub page: usize,
    /// Total pages for the current filtered row set.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
}

/// The open panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// The filter text box.
    pub filter: FilterInputView,
    /// All/None buttons; `None` in single-select mode.
    pub actions: Option<ActionButtonsView>,
    /// The visible item rows (filtered, then paged).
    pub rows: Vec<RowView>,
    /// Page indicator; `None` when the show-all strategy is active.
    pub pager: Option<PageView>,
}

/// Structural snapshot of the widget, consumed by the host's renderer and
/// by integration tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectView {
    /// The toggle button.
    pub toggle: ToggleButtonView,
    /// The panel; `None` while collapsed.
    pub panel: Option<PanelView>,
}

// ============================================================================
// Shared open/collapse state
// ============================================================================

/// State shared with the document click subscription.
///
/// The subscription closure owns an `Arc` of this, so outside clicks can
/// collapse the panel without borrowing the widget.
struct OpenState {
    /// Whether the panel is open.
    open: AtomicBool,
    /// Widget-plus-panel bounds in document coordinates. Clicks inside
    /// these bounds never collapse the panel.
    bounds: RwLock<Rect>,
    /// Emitted when the panel opens.
    opened: Signal<()>,
    /// Emitted when the panel closes (toggle, outside click, or `close`).
    closed: Signal<()>,
}

// ============================================================================
// MultiSelect
// ============================================================================

/// A multi-select dropdown widget.
///
/// # Features
///
/// - Toggle button with caller-supplied (transcluded) content
/// - Text filter over the configured label attribute or a label expression
/// - Single/multi selection forwarded to the embedded [`SelectionModel`]
/// - All/None convenience actions in multi-select modes
/// - Optional fixed-size paging, injected at construction
/// - Collapse on document clicks outside the widget, unless the event
///   carries the ignore marker
///
/// # Signals
///
/// - [`opened`](Self::opened)`()`: the panel was opened
/// - [`closed`](Self::closed)`()`: the panel was closed
/// - `filter_changed(String)`: the filter text changed
/// - `selection().selection_changed(Vec<usize>)`: the selected row set
///   changed
pub struct MultiSelect {
    /// Widget base.
    base: WidgetBase,

    /// The caller-owned item collection.
    model: Arc<RecordListModel>,

    /// The embedded selection model with the merged configuration.
    selection: SelectionModel,

    /// The record field used as display text when no expression is set.
    label_attribute: String,

    /// Optional label expression; supersedes the attribute when present.
    label_expression: Option<LabelTemplate>,

    /// Caller content rendered as the toggle button's label.
    toggle_content: String,

    /// The filter string. Persists across open/close.
    filter_text: Property<String>,

    /// Page cursor; meaningful with a paged strategy.
    ix_page: usize,

    /// Page strategy, chosen once at construction.
    pager: Box<dyn PageStrategy>,

    /// Open/collapse state shared with the click subscription.
    state: Arc<OpenState>,

    /// Live document click subscription, released on drop.
    click_subscription: Option<ClickSubscription>,

    /// Signal emitted when the filter text changes.
    pub filter_changed: Signal<String>,
}

impl MultiSelect {
    /// Create a widget over the given collection with default settings:
    /// checkbox rows, additive multi-selection, label attribute
    /// `"label"`, show-all paging.
    pub fn new(model: Arc<RecordListModel>) -> Self {
        let selection = SelectionModel::new(model.clone(), SelectionConfig::widget_defaults());

        let mut base = WidgetBase::new();
        base.set_geometry(Rect {
            origin: Point::ZERO,
            size: DEFAULT_SIZE,
        });

        let widget = Self {
            base,
            model,
            selection,
            label_attribute: "label".to_string(),
            label_expression: None,
            toggle_content: String::new(),
            filter_text: Property::new(String::new()),
            ix_page: 0,
            pager: Box::new(ShowAll),
            state: Arc::new(OpenState {
                open: AtomicBool::new(false),
                bounds: RwLock::new(Rect::ZERO),
                opened: Signal::new(),
                closed: Signal::new(),
            }),
            click_subscription: None,
            filter_changed: Signal::new(),
        };
        widget.refresh_interaction_bounds();
        widget
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the toggle button content using builder pattern.
    pub fn with_toggle_content(mut self, content: impl Into<String>) -> Self {
        self.toggle_content = content.into();
        self
    }

    /// Set the label attribute using builder pattern.
    pub fn with_label_attribute(mut self, name: impl Into<String>) -> Self {
        self.set_label_attribute(&name.into());
        self
    }

    /// Set a label expression using builder pattern.
    pub fn with_label_expression(mut self, template: &str) -> Self {
        self.set_label_expression(template);
        self
    }

    /// Seed the selection kind using builder pattern.
    pub fn with_selection_kind(mut self, kind: SelectionKind) -> Self {
        self.selection.config_mut().merge_kind(Some(kind));
        self
    }

    /// Seed the selection mode using builder pattern.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection.config_mut().merge_mode(Some(mode));
        self
    }

    /// Seed the selected-attribute using builder pattern (empty ignored).
    pub fn with_selected_attribute(mut self, attribute: &str) -> Self {
        self.selection.config_mut().merge_selected_attribute(attribute);
        self
    }

    /// Seed the selected class using builder pattern (empty ignored).
    pub fn with_selected_class(mut self, class: &str) -> Self {
        self.selection.config_mut().merge_selected_class(class);
        self
    }

    /// Seed the cleanup strategy using builder pattern.
    pub fn with_cleanup_strategy(mut self, strategy: CleanupStrategy) -> Self {
        self.selection.config_mut().merge_cleanup_strategy(Some(strategy));
        self
    }

    /// Inject a page strategy using builder pattern.
    pub fn with_page_strategy(mut self, strategy: impl PageStrategy + 'static) -> Self {
        self.pager = Box::new(strategy);
        self
    }

    /// Attach to a document click dispatcher using builder pattern.
    pub fn attached_to(mut self, document: &DocumentClicks) -> Self {
        self.attach_to_document(document);
        self
    }

    // =========================================================================
    // Bindings (source -> widget updates)
    // =========================================================================

    /// The caller-owned collection this widget renders.
    pub fn model(&self) -> &Arc<RecordListModel> {
        &self.model
    }

    /// The embedded selection model.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Set the label attribute; an empty name falls back to `"label"`.
    pub fn set_label_attribute(&mut self, name: &str) {
        self.label_attribute = if name.is_empty() {
            "label".to_string()
        } else {
            name.to_string()
        };
        self.base.update();
    }

    /// Set or clear the label expression.
    ///
    /// A non-empty template supersedes the label attribute for display and
    /// filtering and is re-evaluated on the next render; an empty template
    /// clears the expression so the attribute applies again.
    pub fn set_label_expression(&mut self, template: &str) {
        self.label_expression = if template.is_empty() {
            None
        } else {
            Some(LabelTemplate::parse(template))
        };
        self.base.update();
    }

    /// Update the selection kind from its bound source; `None` is ignored.
    pub fn set_selection_kind(&mut self, kind: Option<SelectionKind>) {
        self.selection.config_mut().merge_kind(kind);
    }

    /// Update the selection mode from its bound source; `None` is ignored.
    pub fn set_selection_mode(&mut self, mode: Option<SelectionMode>) {
        if self.selection.config_mut().merge_mode(mode) {
            self.base.update();
        }
    }

    /// Update the selected-attribute from its bound source; an empty
    /// string is ignored.
    pub fn set_selected_attribute(&mut self, attribute: &str) {
        self.selection.config_mut().merge_selected_attribute(attribute);
    }

    /// Update the selected class from its bound source; an empty string is
    /// ignored.
    pub fn set_selected_class(&mut self, class: &str) {
        self.selection.config_mut().merge_selected_class(class);
    }

    /// Update the cleanup strategy from its bound source; `None` is
    /// ignored.
    pub fn set_cleanup_strategy(&mut self, strategy: Option<CleanupStrategy>) {
        self.selection.config_mut().merge_cleanup_strategy(strategy);
    }

    /// The toggle button content.
    pub fn toggle_content(&self) -> &str {
        &self.toggle_content
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.state.open.load(Ordering::SeqCst)
    }

    /// Open the panel.
    pub fn open(&mut self) {
        if !self.is_open() {
            self.state.open.store(true, Ordering::SeqCst);
            self.refresh_interaction_bounds();
            self.base.update();
            tracing::debug!(target: "sift_select::widget", "panel opened");
            self.state.opened.emit(());
        }
    }

    /// Close the panel.
    pub fn close(&mut self) {
        if self.is_open() {
            self.state.open.store(false, Ordering::SeqCst);
            self.refresh_interaction_bounds();
            self.base.update();
            tracing::debug!(target: "sift_select::widget", "panel closed");
            self.state.closed.emit(());
        }
    }

    /// Flip the open/closed flag.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Signal emitted when the panel opens.
    pub fn opened(&self) -> &Signal<()> {
        &self.state.opened
    }

    /// Signal emitted when the panel closes.
    ///
    /// Also fires when an outside click collapses the panel; hosts
    /// re-render on it.
    pub fn closed(&self) -> &Signal<()> {
        &self.state.closed
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// The current filter text.
    pub fn filter_text(&self) -> String {
        self.filter_text.get()
    }

    /// Set the filter text.
    ///
    /// The text persists while the panel is opened and closed; it is never
    /// reset implicitly.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.filter_text.set(text.clone()) {
            self.refresh_interaction_bounds();
            self.base.update();
            self.filter_changed.emit(text);
        }
    }

    /// The active label source: the expression when set, else the
    /// attribute.
    fn label_source(&self) -> LabelSource {
        match &self.label_expression {
            Some(template) => LabelSource::Expression(template.clone()),
            None => LabelSource::Attribute(self.label_attribute.clone()),
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Whether a paged strategy is active.
    pub fn is_paged(&self) -> bool {
        self.pager.is_paged()
    }

    /// The raw page cursor.
    pub fn page(&self) -> usize {
        self.ix_page
    }

    /// Number of pages for the current filtered row set.
    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.filtered_len())
    }

    /// Set the page cursor. Out-of-range cursors clamp at query time; the
    /// widget never resets the cursor on filter or collection changes.
    pub fn set_page(&mut self, page: usize) {
        if self.ix_page != page {
            self.ix_page = page;
            self.refresh_interaction_bounds();
            self.base.update();
        }
    }

    /// Advance to the next page.
    pub fn next_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.set_page((self.effective_page() + 1).min(last));
    }

    /// Step back to the previous page.
    pub fn prev_page(&mut self) {
        self.set_page(self.effective_page().saturating_sub(1));
    }

    /// The cursor clamped to the current page range.
    fn effective_page(&self) -> usize {
        let count = self.page_count();
        if count == 0 {
            0
        } else {
            self.ix_page.min(count - 1)
        }
    }

    fn filtered_len(&self) -> usize {
        FilteredView::build(&self.model, &self.label_source(), &self.filter_text.get()).len()
    }

    // =========================================================================
    // Selection actions
    // =========================================================================

    /// Set the selected-attribute on every item in the collection.
    ///
    /// Applies to all items, including rows hidden by the active filter
    /// and rows on other pages.
    pub fn select_all_visible(&self, is_selected: bool) {
        self.selection.set_all(is_selected);
    }

    // =========================================================================
    // Visible rows / structural view
    // =========================================================================

    /// The rows the panel currently shows: the filtered view, sliced by
    /// the page strategy.
    ///
    /// Recomputed from the model on every call, so collection reassignment
    /// and in-place mutation are both reflected.
    pub fn visible_rows(&self) -> Vec<RowView> {
        let label = self.label_source();
        let filter = self.filter_text.get();
        let filtered = FilteredView::build(&self.model, &label, &filter);
        let page_rows: Vec<usize> = self
            .pager
            .slice(filtered.rows(), self.ix_page)
            .to_vec();

        let config = self.selection.config();
        let records = self.model.records();
        page_rows
            .into_iter()
            .filter_map(|row| {
                let record = records.get(row)?;
                let selected = record.flag(&config.selected_attribute);
                let mut classes = vec![ITEM_ROW_CLASS.to_string()];
                if selected {
                    classes.push(config.selected_class.clone());
                }
                Some(RowView {
                    source_row: row,
                    label: label.resolve(record),
                    selected,
                    classes,
                })
            })
            .collect()
    }

    /// Structural snapshot for the host renderer and integration tests.
    pub fn view(&self) -> MultiSelectView {
        let toggle = ToggleButtonView {
            content: self.toggle_content.clone(),
            open: self.is_open(),
        };

        let panel = if self.is_open() {
            let rows = self.visible_rows();
            let actions = self
                .selection
                .config()
                .mode
                .is_multi()
                .then(ActionButtonsView::default);
            let pager = self.pager.is_paged().then(|| PageView {
                page: self.effective_page(),
                page_count: self.page_count(),
                page_size: self.pager.page_size().unwrap_or(0),
            });
            Some(PanelView {
                filter: FilterInputView {
                    text: self.filter_text.get(),
                },
                actions,
                rows,
                pager,
            })
        } else {
            None
        };

        MultiSelectView { toggle, panel }
    }

    /// Number of live subscriptions this widget holds.
    ///
    /// Constant in the size of the item collection: one document click
    /// subscription when attached, and nothing per item.
    pub fn subscription_count(&self) -> usize {
        usize::from(self.click_subscription.is_some())
    }

    // =========================================================================
    // Document attachment
    // =========================================================================

    /// Install the outside-click subscription.
    ///
    /// Installed once per widget instance; re-attaching replaces the
    /// previous subscription. The subscription is released exactly once,
    /// when the widget is dropped or detached.
    pub fn attach_to_document(&mut self, document: &DocumentClicks) {
        let state = self.state.clone();
        self.click_subscription = Some(document.subscribe(move |event| {
            // The ignore marker is checked before any state changes.
            if event.ignore_collapse {
                tracing::trace!(
                    target: "sift_select::widget",
                    "click carries ignore marker, panel stays open"
                );
                return;
            }
            if !state.open.load(Ordering::SeqCst) {
                return;
            }
            if state.bounds.read().contains(event.global_pos) {
                return;
            }
            state.open.store(false, Ordering::SeqCst);
            tracing::debug!(
                target: "sift_select::widget",
                "panel collapsed by outside click"
            );
            state.closed.emit(());
        }));
    }

    /// Release the outside-click subscription early.
    pub fn detach_from_document(&mut self) {
        self.click_subscription = None;
    }

    /// Whether the widget currently holds a document subscription.
    pub fn is_attached(&self) -> bool {
        self.click_subscription.is_some()
    }

    /// Set the widget's geometry (document coordinates).
    pub fn set_geometry(&mut self, rect: Rect) {
        self.base.set_geometry(rect);
        self.refresh_interaction_bounds();
    }

    /// Recompute the document-coordinate bounds that outside clicks are
    /// tested against: the toggle button, plus the open panel.
    fn refresh_interaction_bounds(&self) {
        let geometry = self.base.geometry();
        let bounds = if self.is_open() {
            let panel = self.panel_rect();
            Rect::new(
                geometry.origin.x,
                geometry.origin.y,
                geometry.size.width.max(panel.width()),
                geometry.size.height + panel.height(),
            )
        } else {
            geometry
        };
        *self.state.bounds.write() = bounds;
    }

    // =========================================================================
    // Geometry helpers / hit testing
    // =========================================================================

    /// The open panel's rectangle in widget-local coordinates: directly
    /// below the toggle button, one row for the filter box, one for the
    /// action buttons in multi modes, then the visible item rows.
    fn panel_rect(&self) -> Rect {
        let mut rows = 1; // filter input
        if self.selection.config().mode.is_multi() {
            rows += 1; // All/None actions
        }
        rows += self.paged_row_count();
        Rect::new(
            0.0,
            self.base.height(),
            self.base.width(),
            rows as f32 * ROW_HEIGHT,
        )
    }

    fn paged_row_count(&self) -> usize {
        let filtered =
            FilteredView::build(&self.model, &self.label_source(), &self.filter_text.get());
        self.pager.slice(filtered.rows(), self.ix_page).len()
    }

    fn visual_to_source(&self, visual: usize) -> Option<usize> {
        let filtered =
            FilteredView::build(&self.model, &self.label_source(), &self.filter_text.get());
        self.pager
            .slice(filtered.rows(), self.ix_page)
            .get(visual)
            .copied()
    }

    fn hit_test(&self, pos: Point) -> MultiSelectPart {
        if self.base.contains_point(pos) {
            return MultiSelectPart::ToggleButton;
        }

        if self.is_open() {
            let panel = self.panel_rect();
            if panel.contains(pos) {
                let mut row = ((pos.y - panel.origin.y) / ROW_HEIGHT) as usize;
                if row == 0 {
                    return MultiSelectPart::FilterInput;
                }
                row -= 1;
                if self.selection.config().mode.is_multi() {
                    if row == 0 {
                        let midpoint = panel.origin.x + panel.width() / 2.0;
                        return if pos.x < midpoint {
                            MultiSelectPart::SelectAllButton
                        } else {
                            MultiSelectPart::SelectNoneButton
                        };
                    }
                    row -= 1;
                }
                if row < self.paged_row_count() {
                    return MultiSelectPart::ItemRow(row);
                }
            }
        }

        MultiSelectPart::None
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        match self.hit_test(event.local_pos) {
            MultiSelectPart::ToggleButton => {
                self.toggle();
                true
            }
            MultiSelectPart::FilterInput => {
                // Focus and caret handling belong to the host.
                self.base.update();
                true
            }
            MultiSelectPart::SelectAllButton => {
                self.select_all_visible(true);
                self.base.update();
                true
            }
            MultiSelectPart::SelectNoneButton => {
                self.select_all_visible(false);
                self.base.update();
                true
            }
            MultiSelectPart::ItemRow(visual) => {
                if let Some(source_row) = self.visual_to_source(visual) {
                    self.selection.toggle_row(source_row, event.modifiers);
                    self.base.update();
                }
                true
            }
            MultiSelectPart::None => {
                if self.is_open() {
                    self.close();
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl Widget for MultiSelect {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseRelease(_) => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paged, Record};
    use crate::widget::events::KeyboardModifiers;
    use parking_lot::Mutex;

    fn setup() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn labeled(label: &str) -> Record {
        Record::new().with_field("label", label)
    }

    fn model_of(labels: &[&str]) -> Arc<RecordListModel> {
        Arc::new(RecordListModel::new(
            labels.iter().map(|l| labeled(l)).collect(),
        ))
    }

    /// A widget with a fixed geometry so hit-test coordinates are stable:
    /// toggle at (0,0)-(200,30), panel rows of 24px below it.
    fn sized(mut widget: MultiSelect) -> MultiSelect {
        widget.set_geometry(Rect::new(0.0, 0.0, 200.0, 30.0));
        widget
    }

    fn press(widget: &mut MultiSelect, x: f32, y: f32) -> bool {
        widget.event(&WidgetEvent::MousePress(MousePressEvent::left_click(
            Point::new(x, y),
        )))
    }

    #[test]
    fn test_toggle_content_renders_verbatim() {
        let widget = MultiSelect::new(model_of(&[])).with_toggle_content("Blargus");

        let view = widget.view();
        assert_eq!(view.toggle.content, "Blargus");
        assert!(view.panel.is_none());
    }

    #[test]
    fn test_subscription_count_invariant_in_item_count() {
        let document = DocumentClicks::new();

        let one = MultiSelect::new(model_of(&["foo"])).attached_to(&document);
        let three = MultiSelect::new(model_of(&["foo", "bar", "wowza"])).attached_to(&document);

        assert_eq!(one.subscription_count(), three.subscription_count());
        // No per-item connections on the collections either.
        assert_eq!(one.model().signals().connection_count(), 0);
        assert_eq!(three.model().signals().connection_count(), 0);
    }

    #[test]
    fn test_open_renders_one_row_per_item() {
        setup();
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])));

        assert!(press(&mut widget, 10.0, 10.0)); // toggle button
        assert!(widget.is_open());

        let rows = widget.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "foo");
        assert!(rows[0].classes.contains(&ITEM_ROW_CLASS.to_string()));
    }

    #[test]
    fn test_items_added_later_appear() {
        let model = model_of(&["foo"]);
        let mut widget = sized(MultiSelect::new(model.clone()));
        widget.toggle();

        model.push(labeled("bar"));

        assert_eq!(widget.visible_rows().len(), 2);
    }

    #[test]
    fn test_collection_reassignment_replaces_rows() {
        let model = model_of(&["foo"]);
        let mut widget = sized(MultiSelect::new(model.clone()));
        widget.toggle();

        model.set_records(vec![labeled("a"), labeled("b"), labeled("c")]);

        assert_eq!(widget.visible_rows().len(), 3);
    }

    #[test]
    fn test_in_place_mutation_reflected_in_labels() {
        let model = model_of(&["foo"]);
        let widget = MultiSelect::new(model.clone());

        model.modify(0, |r| r.set("label", "changed"));

        assert_eq!(widget.visible_rows()[0].label, "changed");
    }

    #[test]
    fn test_label_expression() {
        let model = Arc::new(RecordListModel::new(vec![
            Record::new().with_field("name", "Foo").with_field("num", 5),
            Record::new().with_field("name", "Bar").with_field("num", 9),
        ]));
        let mut widget =
            sized(MultiSelect::new(model).with_label_expression("{{item.num}}: {{item.name}}"));
        widget.toggle();

        assert_eq!(widget.visible_rows()[0].label, "5: Foo");
        assert_eq!(widget.visible_rows()[1].label, "9: Bar");
    }

    #[test]
    fn test_label_expression_rebound_before_open() {
        let model = Arc::new(RecordListModel::new(vec![
            Record::new().with_field("name", "Foo").with_field("num", 5),
        ]));
        let mut widget = sized(MultiSelect::new(model).with_label_expression("{{item.name}}"));

        // Rebound before the panel ever opens
        widget.set_label_expression("{{item.num}}: {{item.name}}");
        widget.toggle();

        assert_eq!(widget.visible_rows()[0].label, "5: Foo");
    }

    #[test]
    fn test_empty_label_expression_falls_back_to_attribute() {
        let model = Arc::new(RecordListModel::new(vec![Record::new()
            .with_field("label", "attr")
            .with_field("name", "expr")]));
        let mut widget = MultiSelect::new(model).with_label_expression("{{item.name}}");
        assert_eq!(widget.visible_rows()[0].label, "expr");

        widget.set_label_expression("");
        assert_eq!(widget.visible_rows()[0].label, "attr");
    }

    #[test]
    fn test_row_click_updates_selected_items_output() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])));
        widget.toggle();

        // Panel below toggle (30): filter [30,54), actions [54,78), rows from 78
        assert!(press(&mut widget, 10.0, 80.0));

        assert_eq!(widget.selection().selected_records().len(), 1);
        assert_eq!(widget.selection().selected_records()[0].text("label"), "foo");
        assert!(widget.visible_rows()[0].selected);
    }

    #[test]
    fn test_selected_row_carries_selected_class() {
        let mut widget = sized(
            MultiSelect::new(model_of(&["foo"])).with_selected_class("is-picked"),
        );
        widget.toggle();
        press(&mut widget, 10.0, 80.0);

        let rows = widget.visible_rows();
        assert!(rows[0].classes.contains(&"is-picked".to_string()));
    }

    #[test]
    fn test_all_none_buttons_only_in_multi_modes() {
        let mut multi = sized(MultiSelect::new(model_of(&["foo"])));
        multi.toggle();
        let actions = multi.view().panel.unwrap().actions;
        let actions = actions.expect("multi mode shows action buttons");
        assert_eq!(actions.all_label, "All");
        assert_eq!(actions.none_label, "None");

        let mut single = sized(
            MultiSelect::new(model_of(&["foo"])).with_selection_mode(SelectionMode::Single),
        );
        single.toggle();
        assert!(single.view().panel.unwrap().actions.is_none());
    }

    #[test]
    fn test_all_none_buttons_click() {
        let mut widget = sized(MultiSelect::new(model_of(&["a", "b", "c"])));
        widget.toggle();

        // Action row spans [54, 78); left half = All, right half = None
        assert!(press(&mut widget, 40.0, 60.0));
        assert_eq!(widget.selection().selected_count(), 3);

        assert!(press(&mut widget, 160.0, 60.0));
        assert_eq!(widget.selection().selected_count(), 0);
    }

    #[test]
    fn test_filter_by_label_attribute() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo", "bar"])));
        widget.toggle();

        widget.set_filter_text("foo");

        let rows = widget.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "foo");
    }

    #[test]
    fn test_filter_ignores_other_fields() {
        let model = Arc::new(RecordListModel::new(vec![
            Record::new().with_field("label", "foo").with_field("secret", "wow"),
            Record::new().with_field("label", "bar"),
        ]));
        let mut widget = sized(MultiSelect::new(model));
        widget.toggle();

        widget.set_filter_text("wow");

        assert!(widget.visible_rows().is_empty());
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])));
        widget.set_filter_text("Foo");
        assert!(widget.visible_rows().is_empty());
    }

    #[test]
    fn test_filter_persists_across_close_open() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo", "bar"])));
        widget.toggle();
        widget.set_filter_text("foo");

        widget.toggle(); // close
        widget.toggle(); // reopen

        assert_eq!(widget.filter_text(), "foo");
        assert_eq!(widget.visible_rows().len(), 1);
    }

    #[test]
    fn test_filter_changed_signal() {
        let mut widget = MultiSelect::new(model_of(&["foo"]));
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        widget.filter_changed.connect(move |text| {
            recv.lock().push(text.clone());
        });

        widget.set_filter_text("f");
        widget.set_filter_text("f"); // unchanged - no emission

        assert_eq!(received.lock().as_slice(), &["f".to_string()]);
    }

    #[test]
    fn test_select_all_includes_filtered_out_items() {
        let model = model_of(&["foo", "bar"]);
        let mut widget = sized(MultiSelect::new(model.clone()));
        widget.toggle();
        widget.set_filter_text("foo");

        widget.select_all_visible(true);

        // "bar" is hidden by the filter but still marked
        assert!(model.records()[1].flag("selected"));
        assert_eq!(widget.selection().selected_count(), 2);
    }

    #[test]
    fn test_paging_slices_rows() {
        let labels: Vec<String> = (0..25).map(|i| format!("item {i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut widget = sized(MultiSelect::new(model_of(&refs)).with_page_strategy(Paged::new()));
        widget.toggle();

        assert!(widget.is_paged());
        assert_eq!(widget.page_count(), 3);
        assert_eq!(widget.visible_rows().len(), 10);
        assert_eq!(widget.visible_rows()[0].label, "item 00");

        widget.set_page(2);
        assert_eq!(widget.visible_rows().len(), 5);
        assert_eq!(widget.visible_rows()[0].label, "item 20");

        let pager = widget.view().panel.unwrap().pager.unwrap();
        assert_eq!(pager.page, 2);
        assert_eq!(pager.page_count, 3);
        assert_eq!(pager.page_size, 10);
    }

    #[test]
    fn test_page_cursor_clamps_when_filter_shrinks_rows() {
        let labels: Vec<String> = (0..25).map(|i| format!("item {i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut widget = MultiSelect::new(model_of(&refs)).with_page_strategy(Paged::new());

        widget.set_page(2);
        widget.set_filter_text("item 0"); // 10 rows remain -> one page

        // Cursor is not reset, it clamps at query time
        assert_eq!(widget.page(), 2);
        assert_eq!(widget.visible_rows().len(), 10);
    }

    #[test]
    fn test_next_prev_page() {
        let labels: Vec<String> = (0..25).map(|i| format!("item {i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut widget = MultiSelect::new(model_of(&refs)).with_page_strategy(Paged::new());

        widget.next_page();
        assert_eq!(widget.page(), 1);
        widget.next_page();
        widget.next_page(); // clamped at the last page
        assert_eq!(widget.page(), 2);

        widget.prev_page();
        assert_eq!(widget.page(), 1);
        widget.prev_page();
        widget.prev_page(); // clamped at the first page
        assert_eq!(widget.page(), 0);
    }

    #[test]
    fn test_show_all_renders_everything() {
        let labels: Vec<String> = (0..25).map(|i| format!("item {i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut widget = sized(MultiSelect::new(model_of(&refs)));
        widget.toggle();

        assert!(!widget.is_paged());
        assert_eq!(widget.visible_rows().len(), 25);
        assert!(widget.view().panel.unwrap().pager.is_none());
    }

    #[test]
    fn test_outside_click_closes_panel() {
        setup();
        let document = DocumentClicks::new();
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])).attached_to(&document));
        widget.toggle();
        assert!(widget.is_open());

        document.dispatch(MousePressEvent::left_click(Point::new(500.0, 500.0)));

        assert!(!widget.is_open());
    }

    #[test]
    fn test_marked_click_keeps_panel_open() {
        let document = DocumentClicks::new();
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])).attached_to(&document));
        widget.toggle();

        document.dispatch(
            MousePressEvent::left_click(Point::new(500.0, 500.0)).with_ignore_collapse(),
        );

        assert!(widget.is_open());
    }

    #[test]
    fn test_click_inside_widget_does_not_collapse() {
        let document = DocumentClicks::new();
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])).attached_to(&document));
        widget.toggle();

        // Inside the open panel (document coordinates)
        document.dispatch(MousePressEvent::left_click(Point::new(10.0, 80.0)));

        assert!(widget.is_open());
    }

    #[test]
    fn test_closed_signal_fires_on_outside_click() {
        let document = DocumentClicks::new();
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])).attached_to(&document));

        let closed = Arc::new(Mutex::new(0));
        let recv = closed.clone();
        widget.closed().connect(move |_| {
            *recv.lock() += 1;
        });

        widget.toggle();
        document.dispatch(MousePressEvent::left_click(Point::new(500.0, 500.0)));
        // Already closed - a second outside click must not re-fire
        document.dispatch(MousePressEvent::left_click(Point::new(500.0, 500.0)));

        assert_eq!(*closed.lock(), 1);
    }

    #[test]
    fn test_drop_releases_document_subscription() {
        let document = DocumentClicks::new();

        for _ in 0..3 {
            let widget = MultiSelect::new(model_of(&["foo"])).attached_to(&document);
            assert!(widget.is_attached());
            assert_eq!(document.subscriber_count(), 1);
        }

        assert_eq!(document.subscriber_count(), 0);
    }

    #[test]
    fn test_detach_from_document() {
        let document = DocumentClicks::new();
        let mut widget = MultiSelect::new(model_of(&["foo"])).attached_to(&document);

        widget.detach_from_document();

        assert!(!widget.is_attached());
        assert_eq!(document.subscriber_count(), 0);
    }

    #[test]
    fn test_passthrough_truthy_updates_propagate() {
        let mut widget = MultiSelect::new(model_of(&["foo"]));
        assert_eq!(widget.selection().config().mode, SelectionMode::MultiAdditive);

        widget.set_selection_mode(Some(SelectionMode::Single));
        assert_eq!(widget.selection().config().mode, SelectionMode::Single);

        widget.set_selected_attribute("checked");
        assert_eq!(widget.selection().config().selected_attribute, "checked");

        widget.set_selection_kind(Some(SelectionKind::Radio));
        assert_eq!(widget.selection().config().kind, SelectionKind::Radio);

        widget.set_cleanup_strategy(Some(CleanupStrategy::DeselectRemoved));
        assert_eq!(
            widget.selection().config().cleanup_strategy,
            CleanupStrategy::DeselectRemoved
        );
    }

    #[test]
    fn test_passthrough_falsy_updates_ignored() {
        let mut widget = MultiSelect::new(model_of(&["foo"]))
            .with_selected_attribute("checked")
            .with_selection_mode(SelectionMode::Single);

        widget.set_selection_mode(None);
        widget.set_selected_attribute("");
        widget.set_selected_class("");
        widget.set_selection_kind(None);
        widget.set_cleanup_strategy(None);

        let config = widget.selection().config();
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.selected_attribute, "checked");
        assert_eq!(config.selected_class, "selected");
        assert_eq!(config.kind, SelectionKind::Checkbox);
        assert_eq!(config.cleanup_strategy, CleanupStrategy::None);
    }

    #[test]
    fn test_single_mode_row_clicks_replace_selection() {
        let mut widget = sized(
            MultiSelect::new(model_of(&["a", "b"]))
                .with_selection_mode(SelectionMode::Single),
        );
        widget.toggle();

        // No action row in single mode: rows start right after the filter
        // box at y = 54
        press(&mut widget, 10.0, 56.0); // row 0
        assert_eq!(widget.selection().selected_rows(), vec![0]);

        press(&mut widget, 10.0, 80.0); // row 1
        assert_eq!(widget.selection().selected_rows(), vec![1]);
        assert!(!widget.model().records()[0].flag("selected"));
    }

    #[test]
    fn test_ctrl_click_in_multi_mode_is_additive() {
        let mut widget = sized(
            MultiSelect::new(model_of(&["a", "b"])).with_selection_mode(SelectionMode::Multi),
        );
        widget.toggle();

        press(&mut widget, 10.0, 80.0); // row 0
        let ctrl_click = MousePressEvent::left_click(Point::new(10.0, 104.0))
            .with_modifiers(KeyboardModifiers::CTRL);
        widget.event(&WidgetEvent::MousePress(ctrl_click)); // row 1

        assert_eq!(widget.selection().selected_rows(), vec![0, 1]);
    }

    #[test]
    fn test_row_clicks_map_through_filter_and_page() {
        let model = model_of(&["foo", "bar", "foobar"]);
        let mut widget = sized(MultiSelect::new(model.clone()));
        widget.toggle();
        widget.set_filter_text("bar");

        // Visible rows are "bar" (source 1) and "foobar" (source 2);
        // clicking visual row 1 must select source row 2.
        press(&mut widget, 10.0, 104.0);

        assert_eq!(widget.selection().selected_rows(), vec![2]);
        assert_eq!(model.records()[2].text("label"), "foobar");
    }

    #[test]
    fn test_toggle_button_click_closes_open_panel() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])));

        press(&mut widget, 10.0, 10.0);
        assert!(widget.is_open());

        press(&mut widget, 10.0, 10.0);
        assert!(!widget.is_open());
    }

    #[test]
    fn test_opened_and_closed_signals() {
        let mut widget = MultiSelect::new(model_of(&["foo"]));
        let log = Arc::new(Mutex::new(Vec::new()));

        let opened = log.clone();
        widget.opened().connect(move |_| opened.lock().push("opened"));
        let closed = log.clone();
        widget.closed().connect(move |_| closed.lock().push("closed"));

        widget.toggle();
        widget.toggle();
        widget.toggle();

        assert_eq!(*log.lock(), vec!["opened", "closed", "opened"]);
    }

    #[test]
    fn test_empty_label_attribute_falls_back_to_default() {
        let mut widget = MultiSelect::new(model_of(&["foo"]));
        widget.set_label_attribute("");
        assert_eq!(widget.visible_rows()[0].label, "foo");
    }

    #[test]
    fn test_custom_label_attribute() {
        let model = Arc::new(RecordListModel::new(vec![Record::new()
            .with_field("title", "Custom")
            .with_field("label", "ignored")]));
        let widget = MultiSelect::new(model).with_label_attribute("title");
        assert_eq!(widget.visible_rows()[0].label, "Custom");
    }

    #[test]
    fn test_missing_label_renders_empty() {
        let model = Arc::new(RecordListModel::new(vec![Record::new()
            .with_field("name", "no label here")]));
        let widget = MultiSelect::new(model);
        assert_eq!(widget.visible_rows()[0].label, "");
    }

    #[test]
    fn test_view_structure_when_open() {
        let mut widget = sized(
            MultiSelect::new(model_of(&["foo", "bar"])).with_toggle_content("Pick"),
        );
        widget.toggle();
        widget.set_filter_text("foo");

        let view = widget.view();
        assert!(view.toggle.open);
        assert_eq!(view.toggle.content, "Pick");

        let panel = view.panel.expect("panel renders while open");
        assert_eq!(panel.filter.text, "foo");
        assert!(panel.actions.is_some());
        assert_eq!(panel.rows.len(), 1);
        assert!(panel.pager.is_none());
    }

    #[test]
    fn test_right_click_is_not_handled() {
        let mut widget = sized(MultiSelect::new(model_of(&["foo"])));
        let event = MousePressEvent {
            button: MouseButton::Right,
            ..MousePressEvent::left_click(Point::new(10.0, 10.0))
        };

        assert!(!widget.event(&WidgetEvent::MousePress(event)));
        assert!(!widget.is_open());
    }
}
