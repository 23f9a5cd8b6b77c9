use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use routine_core::{
    visible_products, CatalogLoader, CategoryChoice, Config, FileStore, FilterCriteria,
    SelectionSet, Visibility,
};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "routine")]
#[command(about = "Browse a beauty catalog and build a routine with an AI advisor")]
struct Cli {
    /// Catalog file path or http(s) URL
    #[arg(long, global = true)]
    catalog: Option<String>,
    /// Chat endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the products visible for a category and keyword
    List {
        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive name or brand search
        #[arg(short, long, default_value = "")]
        keyword: String,
    },
    /// Print the saved selection
    Selection,
    /// Print the effective configuration
    Config {
        /// Write the configuration file with these values
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to read configuration")?;
    config.apply_env();
    config.apply_overrides(cli.catalog, cli.endpoint);

    match cli.command {
        Some(Commands::List { category, keyword }) => {
            logging::init_stderr_logging();
            list_products(&config, category.as_deref(), keyword).await
        }
        Some(Commands::Selection) => {
            logging::init_stderr_logging();
            show_selection(&config).await
        }
        Some(Commands::Config { init }) => {
            logging::init_stderr_logging();
            show_config(&config, init)
        }
        None => run_tui(config).await,
    }
}

async fn list_products(config: &Config, category: Option<&str>, keyword: String) -> Result<()> {
    let category = match category {
        Some(name) => name.parse::<CategoryChoice>()?,
        None => CategoryChoice::Unset,
    };

    let products = catalog_loader(config)?.load().await?;
    match visible_products(&products, &FilterCriteria::new(category, keyword)) {
        Visibility::Placeholder => {
            println!("{}", routine_core::filter::PLACEHOLDER_MESSAGE);
        }
        Visibility::Products(visible) if visible.is_empty() => {
            println!("No products match your filters");
        }
        Visibility::Products(visible) => {
            for product in &visible {
                println!(
                    "{:>4}  {:<40} {:<20} {}",
                    product.id,
                    product.name,
                    product.brand,
                    product.category.display_name()
                );
            }
        }
    }
    Ok(())
}

fn catalog_loader(config: &Config) -> Result<CatalogLoader> {
    Ok(CatalogLoader::with_timeout(config.catalog_source(), config.request_timeout())?)
}

async fn show_selection(config: &Config) -> Result<()> {
    let store = FileStore::open(config.storage_path())?;
    let selection = SelectionSet::restore(&store);
    if selection.is_empty() {
        println!("No products selected");
        return Ok(());
    }

    let products = catalog_loader(config)?.load().await?;
    for product in selection.resolve(&products) {
        println!("{:>4}  {} ({})", product.id, product.name, product.brand);
    }
    let orphans = selection.orphans(&products);
    if !orphans.is_empty() {
        println!("Not in catalog: {:?}", orphans);
    }
    Ok(())
}

fn show_config(config: &Config, init: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    println!("storage: {}", config.storage_path().display());
    println!("logs:    {}", config.log_dir().display());
    if init {
        config.save()?;
        println!("configuration saved");
    }
    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let _log_guard = logging::init_file_logging(&config.log_dir())?;

    let store = FileStore::open(config.storage_path())?;
    let mut app = App::new(&config, Box::new(store))?;

    let mut events = EventHandler::new();
    app.set_event_sender(events.sender());
    app.refresh_all().await;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event).await?;
    }

    if let Some(task) = app.chat_task.take() {
        task.abort();
    }
    Ok(())
}
