use crate::config::Config;
use crate::models::{Book, Quote};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, source: serde_json::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            StoreError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            StoreError::Corrupt { path, source } => {
                write!(f, "Corrupt data in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Whole-file JSON persistence for the two collections. Every save rewrites
/// the full array; there are no partial merges.
pub struct Store {
    books_path: PathBuf,
    quotes_path: PathBuf,
}

impl Store {
    pub fn new(config: &Config) -> Self {
        Store {
            books_path: PathBuf::from(&config.books_path),
            quotes_path: PathBuf::from(&config.quotes_path),
        }
    }

    pub fn load_books(&self) -> Result<Vec<Book>, StoreError> {
        load_array(&self.books_path)
    }

    pub fn save_books(&self, books: &[Book]) -> Result<(), StoreError> {
        save_array(books, &self.books_path)
    }

    pub fn load_quotes(&self) -> Result<Vec<Quote>, StoreError> {
        load_array(&self.quotes_path)
    }

    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<(), StoreError> {
        save_array(quotes, &self.quotes_path)
    }
}

fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

fn save_array<T: Serialize>(records: &[T], path: &Path) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| StoreError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Write a sibling temp file and swap it in, so an interrupted save
    // leaves the previous contents intact.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| StoreError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    use crate::models::TIMESTAMP_FORMAT;

    fn make_store(dir: &Path) -> Store {
        let config = Config {
            books_path: dir.join("books.json").to_string_lossy().into_owned(),
            quotes_path: dir.join("quotes.json").to_string_lossy().into_owned(),
        };
        Store::new(&config)
    }

    fn make_book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            author: "Frank Herbert".to_string(),
            genre: "SciFi".to_string(),
            date_read: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rating: 9,
        }
    }

    #[test]
    fn test_missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        assert_eq!(store.load_books().unwrap(), vec![]);
        assert_eq!(store.load_quotes().unwrap(), vec![]);
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());
        let books = vec![make_book("Dune"), make_book("Dune Messiah")];

        store.save_books(&books).unwrap();

        assert_eq!(store.load_books().unwrap(), books);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());
        fs::write(dir.path().join("books.json"), "not json").unwrap();

        let result = store.load_books();

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_wrong_shape_is_an_error_not_empty() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());
        fs::write(dir.path().join("books.json"), r#"[{"pages": 412}]"#).unwrap();

        let result = store.load_books();

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_save_creates_data_directory() {
        let dir = tempdir().unwrap();
        let config = Config {
            books_path: dir
                .path()
                .join("data/books.json")
                .to_string_lossy()
                .into_owned(),
            quotes_path: dir
                .path()
                .join("data/quotes.json")
                .to_string_lossy()
                .into_owned(),
        };
        let store = Store::new(&config);

        store.save_books(&[make_book("Dune")]).unwrap();

        assert!(dir.path().join("data/books.json").exists());
        assert_eq!(store.load_books().unwrap().len(), 1);
    }

    #[test]
    fn test_save_writes_indented_json() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        store.save_books(&[make_book("Dune")]).unwrap();

        let contents = fs::read_to_string(dir.path().join("books.json")).unwrap();
        assert!(contents.contains("\n  "));
        assert!(contents.starts_with('['));
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        store.save_books(&[make_book("Dune")]).unwrap();

        assert!(!dir.path().join("books.json.tmp").exists());
    }

    #[test]
    fn test_quote_file_uses_plain_timestamp_format() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());
        let quotes = vec![Quote {
            book_title: "Dune".to_string(),
            quote: "Fear is the mind-killer".to_string(),
            timestamp: NaiveDateTime::parse_from_str("2026-01-25 10:30:00", TIMESTAMP_FORMAT)
                .unwrap(),
        }];

        store.save_quotes(&quotes).unwrap();

        let contents = fs::read_to_string(dir.path().join("quotes.json")).unwrap();
        assert!(contents.contains("\"timestamp\": \"2026-01-25 10:30:00\""));
        assert_eq!(store.load_quotes().unwrap(), quotes);
    }
}
