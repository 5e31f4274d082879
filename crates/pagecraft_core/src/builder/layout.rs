//! Row layout reconciliation.
//!
//! # Invariants
//! - Shrinking never drops a widget: widgets of every removed column are
//!   appended, in original left-to-right order, to the last retained column.
//! - Growing leaves existing columns untouched and appends empty defaults.
//! - The resulting column count always equals `new_layout.column_count()`.

use crate::builder::factory::create_default_column;
use crate::model::layout::{ColumnLayout, Row};

/// Reconciles `row.columns` with `new_layout`.
pub fn change_layout(row: Row, new_layout: ColumnLayout) -> Row {
    let old_count = row.columns.len();
    let new_count = new_layout.column_count();

    if old_count == new_count {
        if row.layout == new_layout {
            return row;
        }
        return Row {
            layout: new_layout,
            ..row
        };
    }

    let mut columns = row.columns;
    if new_count > old_count {
        columns.extend((old_count..new_count).map(|_| create_default_column()));
    } else {
        let removed = columns.split_off(new_count - 1);
        let mut removed = removed.into_iter();
        if let Some(mut merged) = removed.next() {
            for column in removed {
                merged.widgets.extend(column.widgets);
            }
            columns.push(merged);
        }
    }

    Row {
        layout: new_layout,
        columns,
        ..row
    }
}

#[cfg(test)]
mod tests {
    use super::change_layout;
    use crate::builder::factory::{create_default_row, create_widget};
    use crate::model::layout::ColumnLayout;
    use crate::model::widget::WidgetType;

    #[test]
    fn same_layout_is_identity() {
        let row = create_default_row(ColumnLayout::Halves);
        assert_eq!(change_layout(row.clone(), ColumnLayout::Halves), row);
    }

    #[test]
    fn equal_count_swaps_split_without_touching_columns() {
        let mut row = create_default_row(ColumnLayout::WideLeft);
        row.columns[0].widgets.push(create_widget(WidgetType::Text));
        let changed = change_layout(row.clone(), ColumnLayout::WideRight);
        assert_eq!(changed.layout, ColumnLayout::WideRight);
        assert_eq!(changed.columns, row.columns);
    }

    #[test]
    fn shrink_to_single_column_gathers_everything() {
        let mut row = create_default_row(ColumnLayout::Quarters);
        for (index, column) in row.columns.iter_mut().enumerate() {
            for _ in 0..=index {
                column.widgets.push(create_widget(WidgetType::Spacer));
            }
        }
        let expected: Vec<_> = row
            .columns
            .iter()
            .flat_map(|column| column.widgets.iter().map(|widget| widget.id))
            .collect();
        let first_column_id = row.columns[0].id;

        let shrunk = change_layout(row, ColumnLayout::Full);
        assert_eq!(shrunk.columns.len(), 1);
        assert_eq!(shrunk.columns[0].id, first_column_id);
        let actual: Vec<_> = shrunk.columns[0].widgets.iter().map(|w| w.id).collect();
        assert_eq!(actual, expected);
    }
}
