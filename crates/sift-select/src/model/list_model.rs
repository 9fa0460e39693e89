//! The bound item collection.
//!
//! `RecordListModel` holds the caller's ordered sequence of [`Record`]s and
//! emits change signals for insertions, removals, in-place mutation, and
//! wholesale replacement. The multi-select widget reflects all of these
//! because its visible view is recomputed from the model on each query.

use parking_lot::RwLock;

use super::record::{FieldValue, Record};
use super::traits::ModelSignals;

/// An ordered, observable collection of records.
///
/// The model supports both kinds of change the widget must reflect:
///
/// - **Reassignment**: [`set_records`](Self::set_records) replaces the whole
///   sequence (emits reset signals).
/// - **In-place change**: [`push`](Self::push), [`insert`](Self::insert),
///   [`remove`](Self::remove), and [`modify`](Self::modify) mutate the
///   existing sequence (emit row/data signals).
///
/// # Example
///
/// ```
/// use sift_select::model::{Record, RecordListModel};
///
/// let model = RecordListModel::new(vec![
///     Record::new().with_field("label", "foo"),
/// ]);
///
/// model.push(Record::new().with_field("label", "bar"));
/// assert_eq!(model.len(), 2);
/// ```
pub struct RecordListModel {
    records: RwLock<Vec<Record>>,
    signals: ModelSignals,
}

impl Default for RecordListModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl RecordListModel {
    /// Creates a model over the given records.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
            signals: ModelSignals::new(),
        }
    }

    /// Creates an empty model.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of records in the model.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the signals for this model.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    /// Appends a record to the end of the collection.
    pub fn push(&self, record: Record) {
        let row = self.records.read().len();
        self.signals.emit_rows_inserted(row, row, || {
            self.records.write().push(record);
        });
    }

    /// Inserts a record at the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row > len()`.
    pub fn insert(&self, row: usize, record: Record) {
        self.signals.emit_rows_inserted(row, row, || {
            self.records.write().insert(row, record);
        });
    }

    /// Removes and returns the record at the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= len()`.
    pub fn remove(&self, row: usize) -> Record {
        let mut removed = None;
        self.signals.emit_rows_removed(row, row, || {
            removed = Some(self.records.write().remove(row));
        });
        removed.expect("row removed inside emit_rows_removed")
    }

    /// Removes all records from the model.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            self.records.write().clear();
        });
    }

    /// Replaces the whole collection (reference reassignment).
    pub fn set_records(&self, records: Vec<Record>) {
        self.signals.emit_reset(|| {
            *self.records.write() = records;
        });
    }

    /// Returns a read guard over the records.
    pub fn records(&self) -> impl std::ops::Deref<Target = Vec<Record>> + '_ {
        self.records.read()
    }

    /// Returns a clone of the record at `row`, if in range.
    pub fn record(&self, row: usize) -> Option<Record> {
        self.records.read().get(row).cloned()
    }

    /// Reads one field of one record; `FieldValue::None` when out of range
    /// or missing.
    pub fn field(&self, row: usize, name: &str) -> FieldValue {
        self.records
            .read()
            .get(row)
            .and_then(|r| r.get(name).cloned())
            .unwrap_or(FieldValue::None)
    }

    /// Sets one field of one record, emitting `data_changed`.
    ///
    /// Returns `false` when `row` is out of range.
    pub fn set_field(&self, row: usize, name: &str, value: impl Into<FieldValue>) -> bool {
        {
            let mut records = self.records.write();
            match records.get_mut(row) {
                Some(record) => record.set(name, value),
                None => return false,
            }
        }
        self.signals.emit_data_changed_single(row);
        true
    }

    /// Provides mutable access to a record via a closure.
    ///
    /// Emits `data_changed` after modification. Returns `None` when `row`
    /// is out of range.
    pub fn modify<F, R>(&self, row: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut Record) -> R,
    {
        let result = {
            let mut records = self.records.write();
            let record = records.get_mut(row)?;
            f(record)
        };
        self.signals.emit_data_changed_single(row);
        Some(result)
    }

    /// Applies a closure to every record, then emits a single
    /// `data_changed` spanning the whole collection.
    ///
    /// Does nothing when the model is empty. This is how select-all style
    /// operations touch every record without a signal storm.
    pub fn for_each_record<F>(&self, mut f: F)
    where
        F: FnMut(&mut Record),
    {
        let len = {
            let mut records = self.records.write();
            for record in records.iter_mut() {
                f(record);
            }
            records.len()
        };
        if len > 0 {
            self.signals.data_changed.emit((0, len - 1));
        }
    }
}
