//! Embedded selection model.
//!
//! This module provides the selection semantics the widget forwards its
//! `selection-model-*` configuration to. Selection state lives **on the
//! records themselves** as a configurable boolean field, so caller-side
//! mutation of that field is honored and wholesale collection replacement
//! naturally discards stale selection.

use std::sync::Arc;

use sift_select_core::Signal;

use super::list_model::RecordListModel;
use crate::widget::events::KeyboardModifiers;

/// What kind of selection control each row presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// Plain rows, no embedded control (library default).
    #[default]
    Basic,
    /// Rows carry a checkbox.
    Checkbox,
    /// Rows carry a radio button.
    Radio,
}

/// How clicks change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Only one row can be selected at a time (library default).
    #[default]
    Single,
    /// Plain click replaces the selection; a Ctrl-click toggles additively.
    Multi,
    /// Every click toggles additively, no modifier needed.
    MultiAdditive,
}

impl SelectionMode {
    /// Returns `true` for the modes that allow more than one selected row.
    pub fn is_multi(&self) -> bool {
        matches!(self, SelectionMode::Multi | SelectionMode::MultiAdditive)
    }
}

/// Bookkeeping applied when records leave the visible collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupStrategy {
    /// Leave selection marks untouched (default).
    #[default]
    None,
    /// Clear the selected-attribute on records removed from the model.
    DeselectRemoved,
}

/// The merged selection-model configuration.
///
/// Built in three layers, each overriding the previous one:
///
/// 1. library defaults (`Basic` / `Single`),
/// 2. the widget's own defaults (`Checkbox` / `MultiAdditive`),
/// 3. caller-supplied fields.
///
/// After construction, a change to a bound source field overwrites the
/// corresponding entry **only when the new value is truthy** (`Some` enum,
/// non-empty string); falsy updates are ignored. The `merge_*` methods
/// implement exactly that rule and return whether they applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Row control kind.
    pub kind: SelectionKind,
    /// Click semantics.
    pub mode: SelectionMode,
    /// Record field that carries the selection mark.
    pub selected_attribute: String,
    /// Class rendered on selected rows.
    pub selected_class: String,
    /// Cleanup bookkeeping for removed records.
    pub cleanup_strategy: CleanupStrategy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::widget_defaults()
    }
}

impl SelectionConfig {
    /// The selection-model library's own defaults.
    pub fn library_defaults() -> Self {
        Self {
            kind: SelectionKind::Basic,
            mode: SelectionMode::Single,
            selected_attribute: "selected".to_string(),
            selected_class: "selected".to_string(),
            cleanup_strategy: CleanupStrategy::None,
        }
    }

    /// Library defaults overlaid with the widget's defaults: checkbox rows,
    /// additive multi-selection.
    pub fn widget_defaults() -> Self {
        Self {
            kind: SelectionKind::Checkbox,
            mode: SelectionMode::MultiAdditive,
            ..Self::library_defaults()
        }
    }

    /// Applies a kind update; `None` is ignored.
    pub fn merge_kind(&mut self, value: Option<SelectionKind>) -> bool {
        match value {
            Some(kind) => {
                self.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Applies a mode update; `None` is ignored.
    pub fn merge_mode(&mut self, value: Option<SelectionMode>) -> bool {
        match value {
            Some(mode) => {
                self.mode = mode;
                true
            }
            None => false,
        }
    }

    /// Applies a selected-attribute update; an empty string is ignored.
    pub fn merge_selected_attribute(&mut self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        self.selected_attribute = value.to_string();
        true
    }

    /// Applies a selected-class update; an empty string is ignored.
    pub fn merge_selected_class(&mut self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        self.selected_class = value.to_string();
        true
    }

    /// Applies a cleanup-strategy update; `None` is ignored.
    pub fn merge_cleanup_strategy(&mut self, value: Option<CleanupStrategy>) -> bool {
        match value {
            Some(strategy) => {
                self.cleanup_strategy = strategy;
                true
            }
            None => false,
        }
    }
}

/// Manages selection for a record collection.
///
/// Rows are addressed by their position in the **source** collection. All
/// reads and writes go through the configured selected-attribute on the
/// records, so the collection owner sees selection as plain data.
///
/// # Signals
///
/// - `selection_changed`: emitted with the full selected row set after any
///   operation that changed at least one record's mark.
pub struct SelectionModel {
    model: Arc<RecordListModel>,
    config: SelectionConfig,

    /// Emitted when selection changes. Args: selected source rows, ascending.
    pub selection_changed: Signal<Vec<usize>>,
}

impl SelectionModel {
    /// Creates a selection model over the given collection.
    pub fn new(model: Arc<RecordListModel>, config: SelectionConfig) -> Self {
        Self {
            model,
            config,
            selection_changed: Signal::new(),
        }
    }

    /// The merged configuration.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Mutable access to the merged configuration (passthrough updates).
    pub fn config_mut(&mut self) -> &mut SelectionConfig {
        &mut self.config
    }

    /// Checks whether the record at `row` is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.model
            .records()
            .get(row)
            .map(|r| r.flag(&self.config.selected_attribute))
            .unwrap_or(false)
    }

    /// Returns the selected source rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        let attr = self.config.selected_attribute.as_str();
        self.model
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.flag(attr))
            .map(|(row, _)| row)
            .collect()
    }

    /// The bound selected-items output: clones of the selected records.
    pub fn selected_records(&self) -> Vec<super::record::Record> {
        let attr = self.config.selected_attribute.as_str();
        self.model
            .records()
            .iter()
            .filter(|r| r.flag(attr))
            .cloned()
            .collect()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        let attr = self.config.selected_attribute.as_str();
        self.model.records().iter().filter(|r| r.flag(attr)).count()
    }

    /// Applies a click on `row` according to the configured mode.
    ///
    /// - `Single`: a selected row deselects; otherwise the row becomes the
    ///   only selected one.
    /// - `Multi`: a plain click replaces the selection with `row`; a
    ///   Ctrl-click toggles `row` additively.
    /// - `MultiAdditive`: every click toggles `row` additively.
    ///
    /// Out-of-range rows are ignored.
    pub fn toggle_row(&self, row: usize, modifiers: KeyboardModifiers) {
        if row >= self.model.len() {
            return;
        }

        let attr = self.config.selected_attribute.clone();
        let was_selected = self.is_row_selected(row);

        match self.config.mode {
            SelectionMode::Single => {
                self.model.for_each_record({
                    let mut index = 0;
                    move |record| {
                        let select = index == row && !was_selected;
                        record.set_flag(&attr, select);
                        index += 1;
                    }
                });
            }
            SelectionMode::Multi if !modifiers.control => {
                self.model.for_each_record({
                    let mut index = 0;
                    move |record| {
                        let select = index == row && !was_selected;
                        record.set_flag(&attr, select);
                        index += 1;
                    }
                });
            }
            SelectionMode::Multi | SelectionMode::MultiAdditive => {
                self.model.modify(row, |record| {
                    record.set_flag(&attr, !was_selected);
                });
            }
        }

        tracing::trace!(
            target: "sift_select::model",
            row,
            was_selected,
            mode = ?self.config.mode,
            "selection toggled"
        );
        self.selection_changed.emit(self.selected_rows());
    }

    /// Writes the selected-attribute on **every** record in the collection.
    pub fn set_all(&self, is_selected: bool) {
        let attr = self.config.selected_attribute.clone();
        self.model
            .for_each_record(move |record| record.set_flag(&attr, is_selected));
        self.selection_changed.emit(self.selected_rows());
    }

    /// Clears the selection mark on every record.
    pub fn clear(&self) {
        self.set_all(false);
    }
}
