use clap::Parser;

const DEFAULT_BOOKS_PATH: &str = "data/books.json";
const DEFAULT_QUOTES_PATH: &str = "data/quotes.json";

#[derive(Parser, Debug)]
#[command(name = "reading-journal")]
#[command(about = "Track books you have read and collect quotes from them")]
pub struct CliArgs {
    /// Path to the books JSON file
    #[arg(short, long)]
    pub books_path: Option<String>,

    /// Path to the quotes JSON file
    #[arg(short, long)]
    pub quotes_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub books_path: String,
    pub quotes_path: String,
}

impl Config {
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        let cli = CliArgs::parse();
        Self::from_args(
            cli,
            std::env::var("BOOKS_PATH").ok(),
            std::env::var("QUOTES_PATH").ok(),
        )
    }

    fn from_args(cli: CliArgs, env_books: Option<String>, env_quotes: Option<String>) -> Self {
        let books_path = cli
            .books_path
            .or(env_books)
            .unwrap_or_else(|| DEFAULT_BOOKS_PATH.to_string());

        let quotes_path = cli
            .quotes_path
            .or(env_quotes)
            .unwrap_or_else(|| DEFAULT_QUOTES_PATH.to_string());

        Config {
            books_path,
            quotes_path,
        }
    }
}
