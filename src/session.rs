//! Resolves CLI flags and the config file into a dataset source and load
//! options.

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::{
    cli::DatasetArgs,
    config::CatalogConfig,
    loader::{FileSource, LoadOptions},
    tokenizer::TokenizerMode,
};

#[derive(Debug)]
pub struct Session {
    pub config: CatalogConfig,
    pub source: FileSource,
    pub options: LoadOptions,
}

impl Session {
    pub fn resolve(args: &DatasetArgs, limit: Option<usize>) -> Result<Self> {
        let config = match &args.config {
            Some(path) => CatalogConfig::load(path)
                .with_context(|| format!("Loading config from {path:?}"))?,
            None => CatalogConfig::default(),
        };
        let input = args
            .input
            .clone()
            .or_else(|| config.dataset.clone())
            .ok_or_else(|| {
                anyhow!("No dataset given; pass --input or set `dataset` in the config")
            })?;
        let mode = if args.quote_aware {
            TokenizerMode::QuoteAware
        } else {
            config.tokenizer
        };
        let options = LoadOptions {
            mode,
            encoding: args
                .input_encoding
                .clone()
                .or_else(|| config.input_encoding.clone()),
            limit,
        };
        debug!("Dataset {:?} with {:?}", input, options);
        Ok(Self {
            config,
            source: FileSource::new(input),
            options,
        })
    }
}
