use chrono::NaiveDate;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use dialoguer::{Confirm, Input, Select};

use crate::catalog::Catalog;
use crate::commands::{dispatch, Command, Outcome};
use crate::models::{Book, Quote, TIMESTAMP_FORMAT};

// Quote selector labels truncate the text to this many characters.
const QUOTE_LABEL_LEN: usize = 30;

const MENU: &[&str] = &[
    "Add book",
    "View books",
    "Search books",
    "Update book",
    "Delete book",
    "Add quote",
    "View quotes",
    "Search quotes",
    "Delete quote",
    "Quit",
];

/// Menu loop: prompt for a command, dispatch it, render the outcome. A
/// failed operation reports which command failed and returns to the menu.
pub fn run(catalog: &Catalog) -> Result<(), dialoguer::Error> {
    loop {
        let choice = Select::new()
            .with_prompt("Navigate")
            .items(MENU)
            .default(0)
            .interact()?;

        let command = match choice {
            0 => Some(prompt_add_book()?),
            1 => Some(Command::ListBooks),
            2 => prompt_query("Search by title, author, or genre")?.map(Command::SearchBooks),
            3 => prompt_update_book(catalog)?,
            4 => prompt_delete_book(catalog)?,
            5 => prompt_add_quote(catalog)?,
            6 => Some(Command::ListQuotes),
            7 => prompt_query("Search quotes or book titles")?.map(Command::SearchQuotes),
            8 => prompt_delete_quote(catalog)?,
            _ => break,
        };

        let Some(command) = command else { continue };

        let label = command.to_string();
        match dispatch(catalog, command) {
            Ok(outcome) => render(&outcome),
            Err(e) => println!("{} failed: {}", label, e),
        }
    }

    Ok(())
}

fn prompt_add_book() -> Result<Command, dialoguer::Error> {
    let title: String = Input::new().with_prompt("Book title").interact_text()?;
    let author: String = Input::new().with_prompt("Author").interact_text()?;
    let genre: String = Input::new().with_prompt("Genre").interact_text()?;
    let date_read: NaiveDate = Input::new()
        .with_prompt("Date read (YYYY-MM-DD)")
        .interact_text()?;
    let rating: u8 = Input::new().with_prompt("Rating (1-10)").interact_text()?;

    Ok(Command::AddBook(Book {
        title,
        author,
        genre,
        date_read,
        rating,
    }))
}

fn prompt_update_book(catalog: &Catalog) -> Result<Option<Command>, dialoguer::Error> {
    let Some(books) = current_books(catalog, "No books to update.") else {
        return Ok(None);
    };

    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    let pick = Select::new()
        .with_prompt("Select a book")
        .items(&titles)
        .default(0)
        .interact()?;
    let current = &books[pick];

    let title: String = Input::new()
        .with_prompt("Title")
        .with_initial_text(current.title.as_str())
        .interact_text()?;
    let author: String = Input::new()
        .with_prompt("Author")
        .with_initial_text(current.author.as_str())
        .interact_text()?;
    let genre: String = Input::new()
        .with_prompt("Genre")
        .with_initial_text(current.genre.as_str())
        .interact_text()?;
    let date_read: NaiveDate = Input::new()
        .with_prompt("Date read (YYYY-MM-DD)")
        .with_initial_text(current.date_read.to_string())
        .interact_text()?;
    let rating: u8 = Input::new()
        .with_prompt("Rating (1-10)")
        .with_initial_text(current.rating.to_string())
        .interact_text()?;

    Ok(Some(Command::UpdateBook {
        title: current.title.clone(),
        replacement: Book {
            title,
            author,
            genre,
            date_read,
            rating,
        },
    }))
}

fn prompt_delete_book(catalog: &Catalog) -> Result<Option<Command>, dialoguer::Error> {
    let Some(books) = current_books(catalog, "No books to delete.") else {
        return Ok(None);
    };

    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    let pick = Select::new()
        .with_prompt("Select a book to delete")
        .items(&titles)
        .default(0)
        .interact()?;
    let title = titles[pick].to_string();

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete '{}'?", title))
        .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(None);
    }

    Ok(Some(Command::DeleteBook(title)))
}

fn prompt_add_quote(catalog: &Catalog) -> Result<Option<Command>, dialoguer::Error> {
    let Some(books) = current_books(catalog, "Add a book first.") else {
        return Ok(None);
    };

    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    let pick = Select::new()
        .with_prompt("Select a book")
        .items(&titles)
        .default(0)
        .interact()?;

    let text: String = Input::new().with_prompt("Quote").interact_text()?;

    Ok(Some(Command::AddQuote {
        book_title: titles[pick].to_string(),
        text,
    }))
}

fn prompt_delete_quote(catalog: &Catalog) -> Result<Option<Command>, dialoguer::Error> {
    let quotes = match catalog.list_quotes() {
        Ok(quotes) => quotes,
        Err(e) => {
            println!("Could not load quotes: {}", e);
            return Ok(None);
        }
    };
    if quotes.is_empty() {
        println!("No quotes to delete.");
        return Ok(None);
    }

    let labels: Vec<String> = quotes.iter().map(quote_label).collect();
    let pick = Select::new()
        .with_prompt("Select a quote")
        .items(&labels)
        .default(0)
        .interact()?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete \"{}\"?", labels[pick]))
        .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(None);
    }

    Ok(Some(Command::DeleteQuote(pick)))
}

fn prompt_query(prompt: &str) -> Result<Option<String>, dialoguer::Error> {
    let query: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let query = query.trim().to_string();
    if query.is_empty() {
        return Ok(None);
    }

    Ok(Some(query))
}

fn current_books(catalog: &Catalog, empty_hint: &str) -> Option<Vec<Book>> {
    match catalog.list_books() {
        Ok(books) if books.is_empty() => {
            println!("{}", empty_hint);
            None
        }
        Ok(books) => Some(books),
        Err(e) => {
            println!("Could not load books: {}", e);
            None
        }
    }
}

/// Two quotes sharing a book title and the same first 30 characters get
/// identical labels; the selector cannot tell them apart.
fn quote_label(quote: &Quote) -> String {
    let prefix: String = quote.quote.chars().take(QUOTE_LABEL_LEN).collect();
    format!("{}: {}...", quote.book_title, prefix)
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Message(msg) => println!("{}", msg),
        Outcome::Books(books) => {
            if books.is_empty() {
                println!("No books found.");
                return;
            }

            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Title", "Author", "Genre", "Date read", "Rating"]);
            for book in books {
                table.add_row(vec![
                    book.title.clone(),
                    book.author.clone(),
                    book.genre.clone(),
                    book.date_read.to_string(),
                    book.rating.to_string(),
                ]);
            }
            println!("{table}");
        }
        Outcome::Quotes(quotes) => {
            if quotes.is_empty() {
                println!("No quotes found.");
                return;
            }

            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Book", "Quote", "Added"]);
            for quote in quotes {
                table.add_row(vec![
                    quote.book_title.clone(),
                    quote.quote.clone(),
                    quote.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                ]);
            }
            println!("{table}");
        }
    }
}
