use std::fmt;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{Book, Quote};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddBook(Book),
    ListBooks,
    SearchBooks(String),
    UpdateBook { title: String, replacement: Book },
    DeleteBook(String),
    AddQuote { book_title: String, text: String },
    ListQuotes,
    SearchQuotes(String),
    DeleteQuote(usize),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddBook(book) => write!(f, "Add '{}' by {}", book.title, book.author),
            Command::ListBooks => write!(f, "List books"),
            Command::SearchBooks(query) => write!(f, "Search books for '{}'", query),
            Command::UpdateBook { title, .. } => write!(f, "Update '{}'", title),
            Command::DeleteBook(title) => write!(f, "Delete '{}'", title),
            Command::AddQuote { book_title, .. } => {
                write!(f, "Add a quote from '{}'", book_title)
            }
            Command::ListQuotes => write!(f, "List quotes"),
            Command::SearchQuotes(query) => write!(f, "Search quotes for '{}'", query),
            Command::DeleteQuote(index) => write!(f, "Delete quote at position {}", index),
        }
    }
}

/// What a dispatched command hands back to the caller. Rendering is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Message(String),
    Books(Vec<Book>),
    Quotes(Vec<Quote>),
}

pub fn dispatch(catalog: &Catalog, command: Command) -> Result<Outcome, CatalogError> {
    match command {
        Command::AddBook(book) => {
            let msg = format!("Added '{}' by {}", book.title, book.author);
            catalog.add_book(book)?;
            Ok(Outcome::Message(msg))
        }
        Command::ListBooks => Ok(Outcome::Books(catalog.list_books()?)),
        Command::SearchBooks(query) => Ok(Outcome::Books(catalog.search_books(&query)?)),
        Command::UpdateBook { title, replacement } => {
            catalog.update_book(&title, replacement)?;
            Ok(Outcome::Message(format!("Updated '{}'", title)))
        }
        Command::DeleteBook(title) => {
            let removed = catalog.delete_book(&title)?;
            Ok(Outcome::Message(format!(
                "Removed {} book(s) titled '{}'",
                removed, title
            )))
        }
        Command::AddQuote { book_title, text } => {
            catalog.add_quote(&book_title, &text)?;
            Ok(Outcome::Message(format!("Saved a quote from '{}'", book_title)))
        }
        Command::ListQuotes => Ok(Outcome::Quotes(catalog.list_quotes()?)),
        Command::SearchQuotes(query) => Ok(Outcome::Quotes(catalog.search_quotes(&query)?)),
        Command::DeleteQuote(index) => {
            let removed = catalog.delete_quote(index)?;
            Ok(Outcome::Message(format!(
                "Deleted the quote from '{}'",
                removed.book_title
            )))
        }
    }
}
