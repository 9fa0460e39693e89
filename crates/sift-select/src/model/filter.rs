//! Filtered view over the record collection.
//!
//! `FilteredView` is the lazy, restartable view the widget renders from: it
//! is rebuilt from the model, the label source, and the filter string on
//! every query, so reference reassignment and in-place mutation are both
//! reflected without any per-item subscriptions.

use crate::label::LabelSource;

use super::list_model::RecordListModel;

/// A snapshot of the rows whose computed label matches the filter.
///
/// Matching is a **case-sensitive substring** test against the label text
/// produced by the active [`LabelSource`] - other record fields are never
/// consulted. An empty filter admits every row.
///
/// View rows are positions in the filtered sequence; use
/// [`map_to_source`](Self::map_to_source) to translate back to source rows.
pub struct FilteredView {
    view_to_source: Vec<usize>,
}

impl FilteredView {
    /// Builds the view for the current model contents and filter string.
    pub fn build(model: &RecordListModel, label: &LabelSource, filter: &str) -> Self {
        let records = model.records();
        let view_to_source = records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                if filter.is_empty() {
                    return true;
                }
                label.resolve(record).contains(filter)
            })
            .map(|(row, _)| row)
            .collect();
        Self { view_to_source }
    }

    /// Number of rows surviving the filter.
    pub fn len(&self) -> usize {
        self.view_to_source.len()
    }

    /// Returns `true` if no rows survive the filter.
    pub fn is_empty(&self) -> bool {
        self.view_to_source.is_empty()
    }

    /// The surviving source rows, in source order.
    pub fn rows(&self) -> &[usize] {
        &self.view_to_source
    }

    /// Maps a view row back to its source row.
    pub fn map_to_source(&self, view_row: usize) -> Option<usize> {
        self.view_to_source.get(view_row).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Record;

    fn model_of(labels: &[&str]) -> RecordListModel {
        RecordListModel::new(
            labels
                .iter()
                .map(|l| Record::new().with_field("label", *l))
                .collect(),
        )
    }

    #[test]
    fn test_empty_filter_admits_all() {
        let model = model_of(&["foo", "bar"]);
        let view = FilteredView::build(&model, &LabelSource::default(), "");
        assert_eq!(view.len(), 2);
        assert_eq!(view.rows(), &[0, 1]);
    }

    #[test]
    fn test_substring_match_on_label_attribute() {
        let model = model_of(&["foo", "bar", "foobar"]);
        let view = FilteredView::build(&model, &LabelSource::default(), "foo");
        assert_eq!(view.rows(), &[0, 2]);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let model = model_of(&["foo", "Foo"]);
        let view = FilteredView::build(&model, &LabelSource::default(), "Foo");
        assert_eq!(view.rows(), &[1]);
    }

    #[test]
    fn test_other_fields_are_not_consulted() {
        let model = RecordListModel::new(vec![
            Record::new().with_field("label", "foo").with_field("secret", "wow"),
            Record::new().with_field("label", "bar"),
        ]);
        let view = FilteredView::build(&model, &LabelSource::default(), "wow");
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_by_label_expression() {
        let model = RecordListModel::new(vec![
            Record::new().with_field("name", "foo"),
            Record::new().with_field("name", "bar"),
        ]);
        let source = LabelSource::expression("{{item.name}}ey");
        let view = FilteredView::build(&model, &source, "fooey");
        assert_eq!(view.rows(), &[0]);
    }

    #[test]
    fn test_map_to_source() {
        let model = model_of(&["a", "ab", "b"]);
        let view = FilteredView::build(&model, &LabelSource::default(), "b");
        assert_eq!(view.map_to_source(0), Some(1));
        assert_eq!(view.map_to_source(1), Some(2));
        assert_eq!(view.map_to_source(2), None);
    }

    #[test]
    fn test_view_is_restartable() {
        let model = model_of(&["foo"]);
        let view = FilteredView::build(&model, &LabelSource::default(), "foo");
        assert_eq!(view.len(), 1);

        model.push(Record::new().with_field("label", "food"));
        let view = FilteredView::build(&model, &LabelSource::default(), "foo");
        assert_eq!(view.len(), 2);
    }
}
