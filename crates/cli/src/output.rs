//! Plain-text rendering of dashboard view models.

use std::fmt::Write;

use catalog_model::Book;
use catalog_dashboard::view::{BookTable, DashboardView, StatCard};

const HEADERS: [&str; 6] = ["ID", "Title", "Author", "Category", "Status", "Copies"];

pub fn stat_cards(cards: &[StatCard]) -> String {
    let width = cards.iter().map(|card| card.label.len()).max().unwrap_or(0);
    cards
        .iter()
        .map(|card| format!("{:<width$}  {}\n", card.label, card.value))
        .collect()
}

pub fn book_table(table: &BookTable) -> String {
    if let Some(message) = table.empty_message {
        return format!("{message}\n");
    }

    let cells: Vec<[String; 6]> = table
        .rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.title.clone(),
                row.author.clone(),
                row.category.clone(),
                row.status_label.clone(),
                row.copies.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn dashboard(view: &DashboardView) -> String {
    format!(
        "{}\nRecent books\n{}",
        stat_cards(&view.stats),
        book_table(&view.recent)
    )
}

/// Every stored field of one book, including ones the catalog does not model.
pub fn book_details(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:              {}", book.id);
    let _ = writeln!(out, "title:           {}", book.title());
    let _ = writeln!(out, "author:          {}", book.author());
    let _ = writeln!(out, "category:        {}", book.category());
    let _ = writeln!(out, "status:          {}", book.status);
    let _ = writeln!(out, "copies:          {}", book.copies);
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(out, "isbn:            {isbn}");
    }
    if let Some(pages) = &book.pages {
        let _ = writeln!(out, "pages:           {pages}");
    }
    let _ = writeln!(out, "publicationDate: {}", book.publication_date);
    for (key, value) in &book.extra {
        let _ = writeln!(out, "{:<17}{}", format!("{key}:"), value);
    }
    out
}
