//! Console walkthrough of the multi-select widget.
//!
//! Run with `cargo run --example dropdown_demo`.

use std::sync::Arc;

use sift_select::prelude::*;

fn print_view(select: &MultiSelect) {
    let view = select.view();
    println!("[{}]{}", view.toggle.content, if view.toggle.open { " (open)" } else { "" });
    if let Some(panel) = view.panel {
        println!("  filter: {:?}", panel.filter.text);
        if let Some(actions) = panel.actions {
            println!("  actions: {} / {}", actions.all_label, actions.none_label);
        }
        for row in panel.rows {
            let mark = if row.selected { "x" } else { " " };
            println!("  [{mark}] {}", row.label);
        }
        if let Some(pager) = panel.pager {
            println!("  page {}/{}", pager.page + 1, pager.page_count);
        }
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt::init();

    let model = Arc::new(RecordListModel::new(
        ["Alfalfa", "Barley", "Clover", "Fescue", "Millet", "Rye", "Sorghum"]
            .into_iter()
            .map(|name| Record::new().with_field("label", name))
            .collect(),
    ));

    let document = DocumentClicks::new();
    let mut select = MultiSelect::new(model.clone())
        .with_toggle_content("Choose crops")
        .with_page_strategy(Paged::with_page_size(4))
        .attached_to(&document);

    select.selection().selection_changed.connect(|rows| {
        println!("-- selection is now {rows:?}");
    });

    println!("collapsed:");
    print_view(&select);

    select.open();
    println!("opened:");
    print_view(&select);

    select.selection().toggle_row(0, KeyboardModifiers::NONE);
    select.selection().toggle_row(2, KeyboardModifiers::NONE);
    println!("after selecting two rows:");
    print_view(&select);

    select.set_filter_text("le");
    println!("filtered by \"le\":");
    print_view(&select);

    select.set_filter_text("");
    select.next_page();
    println!("second page:");
    print_view(&select);

    // A click somewhere else on the page collapses the panel.
    document.dispatch(MousePressEvent::left_click(Point::new(900.0, 900.0)));
    println!("after an outside click:");
    print_view(&select);
}
