use pagecraft_core::builder::{
    change_layout, create_default_row, create_section_at, create_widget, delete_item,
    duplicate_item, item_ids, move_item, ItemPath, MoveDirection,
};
use pagecraft_core::codec::{decode_sections, encode_sections};
use pagecraft_core::{ColumnLayout, Row, Section, SectionType, WidgetType};
use proptest::prelude::*;
use std::collections::HashSet;

fn layout_strategy() -> impl Strategy<Value = ColumnLayout> {
    prop::sample::select(ColumnLayout::ALL.to_vec())
}

fn widget_type_strategy() -> impl Strategy<Value = WidgetType> {
    prop::sample::select(WidgetType::ALL.to_vec())
}

fn section_type_strategy() -> impl Strategy<Value = SectionType> {
    prop::sample::select(SectionType::ALL.to_vec())
}

/// A row with `layout` whose columns hold the given widget kinds.
fn row_strategy() -> impl Strategy<Value = Row> {
    layout_strategy().prop_flat_map(|layout| {
        prop::collection::vec(
            prop::collection::vec(widget_type_strategy(), 0..4),
            layout.column_count(),
        )
        .prop_map(move |columns| {
            let mut row = create_default_row(layout);
            for (column, kinds) in row.columns.iter_mut().zip(columns) {
                column
                    .widgets
                    .extend(kinds.into_iter().map(create_widget));
            }
            row
        })
    })
}

fn document_strategy() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec(
        (section_type_strategy(), prop::collection::vec(row_strategy(), 0..3)),
        0..5,
    )
    .prop_map(|sections| {
        sections
            .into_iter()
            .enumerate()
            .map(|(index, (kind, rows))| {
                let mut section = create_section_at(kind, index as i64);
                section.rows = rows;
                section
            })
            .collect()
    })
}

fn widget_ids(row: &Row) -> Vec<uuid::Uuid> {
    row.columns
        .iter()
        .flat_map(|column| column.widgets.iter().map(|widget| widget.id))
        .collect()
}

/// Every row and widget address with the number of ids in its subtree.
fn nested_paths(doc: &[Section]) -> Vec<(ItemPath, usize)> {
    let mut paths = Vec::new();
    for row in doc.iter().flat_map(|section| &section.rows) {
        let size = 1 + row.columns.len() + row.widget_count();
        paths.push((ItemPath::Row(row.id), size));
        for column in &row.columns {
            paths.extend(column.widgets.iter().map(|w| (ItemPath::Widget(w.id), 1)));
        }
    }
    paths
}

proptest! {
    #[test]
    fn prop_change_layout_keeps_every_widget_in_row_major_order(
        row in row_strategy(),
        target in layout_strategy(),
    ) {
        let before = widget_ids(&row);
        let changed = change_layout(row, target);

        prop_assert_eq!(changed.layout, target);
        prop_assert_eq!(changed.columns.len(), target.column_count());
        prop_assert_eq!(widget_ids(&changed), before);
    }

    #[test]
    fn prop_change_layout_grow_keeps_prefix_and_adds_empty_columns(
        row in row_strategy(),
        target in layout_strategy(),
    ) {
        prop_assume!(target.column_count() > row.columns.len());
        let original = row.columns.clone();
        let changed = change_layout(row, target);

        prop_assert_eq!(&changed.columns[..original.len()], &original[..]);
        for column in &changed.columns[original.len()..] {
            prop_assert!(column.widgets.is_empty());
            prop_assert!(original.iter().all(|old| old.id != column.id));
        }
    }

    #[test]
    fn prop_change_layout_shrink_keeps_leading_column_ids(
        row in row_strategy(),
        target in layout_strategy(),
    ) {
        let keep = target.column_count();
        prop_assume!(keep < row.columns.len());
        let original_ids: Vec<_> = row.columns.iter().map(|column| column.id).collect();
        let changed = change_layout(row, target);

        let kept_ids: Vec<_> = changed.columns.iter().map(|column| column.id).collect();
        prop_assert_eq!(&kept_ids[..], &original_ids[..keep]);
    }

    #[test]
    fn prop_duplicate_section_gets_disjoint_ids_and_equal_content(
        doc in document_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!doc.is_empty());
        let index = pick.index(doc.len());
        let original = doc[index].clone();
        let ids_before: HashSet<_> = item_ids(&doc).into_iter().collect();

        let after = duplicate_item(doc, ItemPath::Section(original.id));
        let copy = &after[index + 1];

        prop_assert_eq!(copy.kind, original.kind);
        prop_assert_eq!(&copy.settings, &original.settings);
        prop_assert_eq!(copy.rows.len(), original.rows.len());
        for (copied, source) in copy.rows.iter().zip(&original.rows) {
            prop_assert_eq!(copied.layout, source.layout);
            prop_assert_eq!(copied.widget_count(), source.widget_count());
        }
        let copy_ids = item_ids(std::slice::from_ref(copy));
        prop_assert!(copy_ids.iter().all(|id| !ids_before.contains(id)));
        let unique: HashSet<_> = item_ids(&after).into_iter().collect();
        prop_assert_eq!(unique.len(), item_ids(&after).len());
    }

    #[test]
    fn prop_move_at_boundary_is_no_op(doc in document_strategy()) {
        prop_assume!(!doc.is_empty());
        let first = ItemPath::Section(doc[0].id);
        let last = ItemPath::Section(doc[doc.len() - 1].id);

        let moved = move_item(doc.clone(), first, MoveDirection::Up);
        prop_assert_eq!(&moved, &doc);
        let moved = move_item(doc.clone(), last, MoveDirection::Down);
        prop_assert_eq!(&moved, &doc);
    }

    #[test]
    fn prop_duplicate_row_or_widget_adds_only_fresh_ids(
        doc in document_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let paths = nested_paths(&doc);
        prop_assume!(!paths.is_empty());
        let (path, size) = paths[pick.index(paths.len())];
        let before = item_ids(&doc);

        let after = item_ids(&duplicate_item(doc, path));

        prop_assert_eq!(after.len(), before.len() + size);
        let unique: HashSet<_> = after.iter().collect();
        prop_assert_eq!(unique.len(), after.len());
        let before: HashSet<_> = before.into_iter().collect();
        prop_assert_eq!(after.iter().filter(|id| !before.contains(*id)).count(), size);
    }

    #[test]
    fn prop_delete_row_or_widget_removes_exactly_its_subtree(
        doc in document_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let paths = nested_paths(&doc);
        prop_assume!(!paths.is_empty());
        let (path, size) = paths[pick.index(paths.len())];
        let before = item_ids(&doc);

        let after = item_ids(&delete_item(doc, path));

        prop_assert_eq!(after.len(), before.len() - size);
        prop_assert!(!after.contains(&path.id()));
        prop_assert!(after.iter().all(|id| before.contains(id)));
    }

    #[test]
    fn prop_row_and_widget_moves_at_boundary_are_no_ops(doc in document_strategy()) {
        for section in &doc {
            if let (Some(first), Some(last)) = (section.rows.first(), section.rows.last()) {
                let moved = move_item(doc.clone(), ItemPath::Row(first.id), MoveDirection::Up);
                prop_assert_eq!(&moved, &doc);
                let moved = move_item(doc.clone(), ItemPath::Row(last.id), MoveDirection::Down);
                prop_assert_eq!(&moved, &doc);
            }
            for column in section.rows.iter().flat_map(|row| &row.columns) {
                if let (Some(first), Some(last)) = (column.widgets.first(), column.widgets.last()) {
                    let moved =
                        move_item(doc.clone(), ItemPath::Widget(first.id), MoveDirection::Up);
                    prop_assert_eq!(&moved, &doc);
                    let moved =
                        move_item(doc.clone(), ItemPath::Widget(last.id), MoveDirection::Down);
                    prop_assert_eq!(&moved, &doc);
                }
            }
        }
    }

    #[test]
    fn prop_move_down_then_up_restores_order(doc in document_strategy()) {
        prop_assume!(doc.len() >= 2);
        let first = ItemPath::Section(doc[0].id);
        let moved = move_item(doc.clone(), first, MoveDirection::Down);
        prop_assert_eq!(moved[1].id, doc[0].id);
        let restored = move_item(moved, first, MoveDirection::Up);
        prop_assert_eq!(restored, doc);
    }

    #[test]
    fn prop_stored_document_decodes_to_itself(doc in document_strategy()) {
        let raw = encode_sections(&doc).unwrap();
        let decoded = decode_sections(&raw);
        prop_assert_eq!(decoded.skipped, 0);
        prop_assert_eq!(decoded.value, doc);
    }
}
