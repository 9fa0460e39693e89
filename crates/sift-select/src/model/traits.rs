//! Model change notification.
//!
//! The item collection is flat, so change signals address plain row ranges.
//! Views stay synchronized by connecting to these signals, or - as the
//! multi-select widget does - by recomputing their visible view lazily on
//! each query.

use sift_select_core::Signal;

/// Collection of signals emitted by the record list model.
///
/// # Signal Usage
///
/// - **Before modifications**: `rows_about_to_be_*` / `model_about_to_reset`
/// - **After modifications**: `rows_*` / `model_reset`
/// - **Data changes**: `data_changed` for in-place value modifications
pub struct ModelSignals {
    /// Emitted just before rows are inserted. Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted. Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed. Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed. Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted when data in existing rows changes. Args: (first row, last row)
    pub data_changed: Signal<(usize, usize)>,

    /// Emitted before the model is reset (wholesale replacement).
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            data_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about-to and done signals.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits signals for row removal.
    ///
    /// Calls the provided function between the about-to and done signals.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits the `data_changed` signal for a single row.
    pub fn emit_data_changed_single(&self, row: usize) {
        self.data_changed.emit((row, row));
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about-to and reset signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }

    /// Total number of connected slots across all model signals.
    ///
    /// Useful for asserting that a view's subscription footprint does not
    /// grow with the size of the collection.
    pub fn connection_count(&self) -> usize {
        self.rows_about_to_be_inserted.connection_count()
            + self.rows_inserted.connection_count()
            + self.rows_about_to_be_removed.connection_count()
            + self.rows_removed.connection_count()
            + self.data_changed.connection_count()
            + self.model_about_to_reset.connection_count()
            + self.model_reset.connection_count()
    }
}
