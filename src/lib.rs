pub mod carousel;
pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod facets;
pub mod io_utils;
pub mod list;
pub mod loader;
pub mod record;
pub mod session;
pub mod show;
pub mod summary;
pub mod table;
pub mod tags;
pub mod tokenizer;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    loader::load_catalog,
    session::Session,
};

pub use crate::{
    catalog::{Catalog, Query},
    error::LoadError,
    loader::{CatalogCache, LoadOptions, load_or_empty},
    record::RestaurantRecord,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("piter_catalog", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => list::execute(&args),
        Commands::Show(args) => show::execute(&args),
        Commands::Tags(args) => tags::execute(&args),
        Commands::Routes(args) => handle_routes(&args),
        Commands::Suggest(args) => handle_suggest(&args),
        Commands::Check(args) => check::execute(&args),
    }
}

fn handle_routes(args: &cli::RoutesArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, None)?;
    let outcome = load_catalog(&session.source, &session.options)?;
    let ids = outcome.catalog.ids();
    for id in &ids {
        println!("{id}");
    }
    info!("Listed {} route(s)", ids.len());
    Ok(())
}

fn handle_suggest(args: &cli::SuggestArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, None)?;
    let catalog = load_or_empty(&session.source, &session.options);
    let max = args.max.unwrap_or(session.config.suggestion_limit);
    for record in catalog.suggestions(&args.term, max) {
        println!("{}\t{}", record.id, record.title);
    }
    Ok(())
}
