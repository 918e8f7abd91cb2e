use clap::Parser;
use log::info;
use quotebook::application::{init, open_book, ConfigService, RemoteSync, SyncScheduler};
use quotebook::cli::{format_category_list, format_quote_list, format_sync_report, Cli, Commands};
use quotebook::domain::CategoryFilter;
use quotebook::error::{QuoteError, Result};
use quotebook::infrastructure::{BookRepository, FileSystemRepository, HttpEndpoint};
use std::fs;
use std::sync::Arc;
use tokio::sync::Mutex;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized quotebook at {}", path.display());
            Ok(())
        }
        Commands::Random => {
            let book = open_book(FileSystemRepository::discover()?)?;
            let quote = book.random_quote(&mut rand::rng())?;
            println!("{}", quote);
            Ok(())
        }
        Commands::Add { text, category } => {
            let mut book = open_book(FileSystemRepository::discover()?)?;
            book.add(&text, &category)?;
            println!("New quote added!");
            Ok(())
        }
        Commands::List => {
            let book = open_book(FileSystemRepository::discover()?)?;
            println!("{}", format_quote_list(&book.displayed()?).trim_end());
            Ok(())
        }
        Commands::Categories => {
            let book = open_book(FileSystemRepository::discover()?)?;
            let selection = book.restore_selection()?;
            print!("{}", format_category_list(&book.categories(), &selection));
            Ok(())
        }
        Commands::Filter { category } => {
            let mut book = open_book(FileSystemRepository::discover()?)?;
            let selection: CategoryFilter = category.parse().map_err(QuoteError::Validation)?;
            book.select_filter(selection.clone())?;
            println!("{}", format_quote_list(&book.view(&selection)).trim_end());
            Ok(())
        }
        Commands::Export { output } => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let book = open_book(repo)?;

            let path = output.unwrap_or_else(|| config.export_filename.clone().into());
            fs::write(&path, book.export()?)?;
            println!(
                "Exported {} quotes to {}",
                book.snapshot().len(),
                path.display()
            );
            Ok(())
        }
        Commands::Import { file } => {
            let mut book = open_book(FileSystemRepository::discover()?)?;
            let bytes = fs::read(&file)?;
            let imported = book.import(&bytes)?;
            println!("Quotes imported successfully! ({} added)", imported);
            Ok(())
        }
        Commands::Sync => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let book = Arc::new(Mutex::new(open_book(repo)?));
            let sync = RemoteSync::new(Arc::new(HttpEndpoint::new(config.endpoint)), book);

            let runtime = tokio::runtime::Runtime::new()?;
            let report = runtime.block_on(sync.sync_cycle());
            println!("{}", format_sync_report(&report));
            Ok(())
        }
        Commands::Watch => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let book = Arc::new(Mutex::new(open_book(repo)?));
            let sync = Arc::new(RemoteSync::new(
                Arc::new(HttpEndpoint::new(config.endpoint.clone())),
                book,
            ));

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let handle = SyncScheduler::start(sync, config.sync_interval());
                println!(
                    "Syncing with {} every {}s, press Ctrl-C to stop",
                    config.endpoint, config.sync_interval_secs
                );

                let interrupted = tokio::signal::ctrl_c().await;
                info!("Stopping sync scheduler");
                handle.stop().await;
                interrupted.map_err(QuoteError::Io)
            })
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("endpoint = {}", config.endpoint);
                println!("sync_interval_secs = {}", config.sync_interval_secs);
                println!("export_filename = {}", config.export_filename);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: quotebook config [--list | <key> [<value>]]");
                println!("Valid keys: endpoint, sync_interval_secs, export_filename");
                Ok(())
            }
        }
    }
}
