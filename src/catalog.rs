use chrono::{Local, NaiveDateTime};

use crate::config::Config;
use crate::models::{Book, Quote};
use crate::store::{Store, StoreError};

#[derive(Debug)]
pub enum CatalogError {
    Store(StoreError),
    NoSuchBook(String),
    NoSuchQuote(usize),
    NoBooks,
    InvalidRating(u8),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Store(e) => write!(f, "{}", e),
            CatalogError::NoSuchBook(title) => write!(f, "No book titled '{}'", title),
            CatalogError::NoSuchQuote(index) => write!(f, "No quote at position {}", index),
            CatalogError::NoBooks => write!(f, "Add a book first"),
            CatalogError::InvalidRating(rating) => {
                write!(f, "Rating must be between 1 and 10, got {}", rating)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        CatalogError::Store(e)
    }
}

/// The CRUD surface over both collections. Every mutation loads the full
/// array, transforms it in memory, and writes the full array back.
pub struct Catalog {
    store: Store,
}

impl Catalog {
    pub fn open(config: &Config) -> Self {
        Catalog {
            store: Store::new(config),
        }
    }

    pub fn add_book(&self, book: Book) -> Result<(), CatalogError> {
        check_rating(book.rating)?;

        let mut books = self.store.load_books()?;
        books.push(book);
        self.store.save_books(&books)?;

        Ok(())
    }

    pub fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.store.load_books()?)
    }

    pub fn search_books(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let books = self.store.load_books()?;

        Ok(books
            .into_iter()
            .filter(|b| book_matches(b, query))
            .collect())
    }

    /// Overwrites all five fields of the first book whose title matches.
    /// Duplicate titles leave later copies untouched.
    pub fn update_book(&self, title: &str, replacement: Book) -> Result<(), CatalogError> {
        check_rating(replacement.rating)?;

        let mut books = self.store.load_books()?;
        let slot = books
            .iter_mut()
            .find(|b| b.title == title)
            .ok_or_else(|| CatalogError::NoSuchBook(title.to_string()))?;
        *slot = replacement;
        self.store.save_books(&books)?;

        Ok(())
    }

    /// Removes every book whose title matches, not just the first, so
    /// duplicate titles behave differently here than under `update_book`.
    /// Returns how many records were removed.
    pub fn delete_book(&self, title: &str) -> Result<usize, CatalogError> {
        let mut books = self.store.load_books()?;
        let before = books.len();
        books.retain(|b| b.title != title);

        if books.len() == before {
            return Err(CatalogError::NoSuchBook(title.to_string()));
        }

        self.store.save_books(&books)?;

        Ok(before - books.len())
    }

    /// Records a quote stamped with the current local time. `book_title` is
    /// not checked against the book collection.
    pub fn add_quote(&self, book_title: &str, text: &str) -> Result<(), CatalogError> {
        self.add_quote_at(book_title, text, Local::now().naive_local())
    }

    pub fn add_quote_at(
        &self,
        book_title: &str,
        text: &str,
        timestamp: NaiveDateTime,
    ) -> Result<(), CatalogError> {
        let books = self.store.load_books()?;
        if books.is_empty() {
            return Err(CatalogError::NoBooks);
        }

        let mut quotes = self.store.load_quotes()?;
        quotes.push(Quote {
            book_title: book_title.to_string(),
            quote: text.to_string(),
            timestamp,
        });
        self.store.save_quotes(&quotes)?;

        Ok(())
    }

    pub fn list_quotes(&self) -> Result<Vec<Quote>, CatalogError> {
        Ok(self.store.load_quotes()?)
    }

    pub fn search_quotes(&self, query: &str) -> Result<Vec<Quote>, CatalogError> {
        let quotes = self.store.load_quotes()?;

        Ok(quotes
            .into_iter()
            .filter(|q| quote_matches(q, query))
            .collect())
    }

    /// Quotes have no stable id; deletion is by position in storage order.
    pub fn delete_quote(&self, index: usize) -> Result<Quote, CatalogError> {
        let mut quotes = self.store.load_quotes()?;
        if index >= quotes.len() {
            return Err(CatalogError::NoSuchQuote(index));
        }

        let removed = quotes.remove(index);
        self.store.save_quotes(&quotes)?;

        Ok(removed)
    }
}

pub fn book_matches(book: &Book, query: &str) -> bool {
    let q = query.to_lowercase();
    book.title.to_lowercase().contains(&q)
        || book.author.to_lowercase().contains(&q)
        || book.genre.to_lowercase().contains(&q)
}

pub fn quote_matches(quote: &Quote, query: &str) -> bool {
    let q = query.to_lowercase();
    quote.quote.to_lowercase().contains(&q) || quote.book_title.to_lowercase().contains(&q)
}

fn check_rating(rating: u8) -> Result<(), CatalogError> {
    if !(1..=10).contains(&rating) {
        return Err(CatalogError::InvalidRating(rating));
    }
    Ok(())
}
