//! Plain-text rendering of the catalog state.

use std::fmt::Write;

use catalog_lib::api::query::Direction;
use catalog_lib::model::Field;
use catalog_lib::view::CatalogState;
use catalog_lib::view::CharacterDetail;
use catalog_lib::view::PageItem;

const ID_WIDTH: usize = 5;
const COLUMN_WIDTH: usize = 22;

/// Renders the table, the expanded row (if any) and the footer.
pub fn state(state: &CatalogState) -> String {
    let mut out = String::new();

    if state.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }
    if let Some(message) = state.error() {
        let _ = writeln!(out, "{message}");
        out.push_str("Try `clear` to drop the filters.\n");
        return out;
    }
    if state.records().is_empty() {
        out.push_str("No results found.\n");
        footer(state, &mut out);
        return out;
    }

    header(state, &mut out);
    for record in state.records() {
        let marker = if state.selection().is_selected(record.id) { '>' } else { ' ' };
        let _ = write!(out, "{marker}{:<ID_WIDTH$}", record.id);
        for field in Field::SORTABLE {
            let _ = write!(out, "{}", cell(record.field(field)));
        }
        let _ = writeln!(out, "{}", cell(&record.location.name));

        if state.selection().is_selected(record.id) {
            detail(&CharacterDetail::from(record), &mut out);
        }
    }
    footer(state, &mut out);
    out
}

fn header(state: &CatalogState, out: &mut String) {
    let _ = write!(out, " {:<ID_WIDTH$}", "ID");
    for field in Field::SORTABLE {
        let arrow = match state.sort().direction_for(field) {
            Some(Direction::Asc) => " ^",
            Some(Direction::Desc) => " v",
            None => "",
        };
        let _ = write!(out, "{}", cell(&format!("{}{arrow}", field.as_str().to_uppercase())));
    }
    let _ = writeln!(out, "{}", cell("LOCATION"));
}

fn cell(value: &str) -> String {
    let mut text: String = value.chars().take(COLUMN_WIDTH - 2).collect();
    if value.chars().count() > COLUMN_WIDTH - 2 {
        text.pop();
        text.push('~');
    }
    format!("{text:<COLUMN_WIDTH$}")
}

fn detail(detail: &CharacterDetail, out: &mut String) {
    let episodes = detail
        .episodes
        .iter()
        .map(|n| format!("#{n}"))
        .collect::<Vec<_>>()
        .join(" ");

    let _ = writeln!(out, "    +-- {} (#{})", detail.name, detail.id);
    let _ = writeln!(out, "    | status:   {}", detail.status);
    let _ = writeln!(out, "    | species:  {}", detail.species);
    let _ = writeln!(out, "    | type:     {}", detail.kind);
    let _ = writeln!(out, "    | gender:   {}", detail.gender);
    let _ = writeln!(out, "    | origin:   {}", detail.origin);
    let _ = writeln!(out, "    | location: {}", detail.location);
    if let Some(created) = &detail.created {
        let _ = writeln!(out, "    | created:  {created}");
    }
    let _ = writeln!(out, "    | episodes: {episodes}");
    let _ = writeln!(out, "    | image:    {}", detail.image);
    out.push_str("    +--\n");
}

fn footer(state: &CatalogState, out: &mut String) {
    let range = state.result_range();
    let pages = state
        .page_window()
        .items()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == state.page() => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let _ = writeln!(
        out,
        "\nShowing {} to {} of {} results | rows per page: {} | {}",
        range.start,
        range.end,
        range.total,
        state.page_size(),
        pages
    );
}

/// Renders the filter option lists.
pub fn options(fields: &[(Field, Vec<&str>)]) -> String {
    let mut out = String::new();
    for (field, values) in fields {
        let values = if values.is_empty() {
            "(none available)".to_string()
        } else {
            values.join(", ")
        };
        let _ = writeln!(out, "{field}: {values}");
    }
    out
}
