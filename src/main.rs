use reading_journal::catalog::Catalog;
use reading_journal::config::Config;
use reading_journal::ui;

fn main() {
    let config = Config::load();
    let catalog = Catalog::open(&config);

    if let Err(e) = ui::run(&catalog) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
