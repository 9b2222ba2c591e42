//! Dataset loading: read → decode → tokenize → normalize → sort.
//!
//! [`load_catalog`] returns a typed result so callers can tell a missing
//! dataset from an empty one. [`load_or_empty`] is the UI-facing variant that
//! logs the failure and hands back an empty catalog. [`CatalogCache`]
//! serializes loads and reuses the previous catalog when the dataset bytes
//! have not changed.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::{debug, error, info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{
    catalog::Catalog,
    error::{Coercion, LoadError},
    io_utils,
    record::normalize,
    tokenizer::{TokenizerMode, tokenize_with},
};

pub trait DatasetSource {
    fn read(&self) -> Result<Vec<u8>, LoadError>;
    fn describe(&self) -> String;
}

/// A dataset on disk, or stdin for `-`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn read(&self) -> Result<Vec<u8>, LoadError> {
        io_utils::read_path_bytes(&self.path).map_err(|source| LoadError::Read {
            source_name: self.describe(),
            source,
        })
    }

    fn describe(&self) -> String {
        if io_utils::is_dash(&self.path) {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

/// An in-memory dataset, e.g. one embedded with `include_bytes!`.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl DatasetSource for MemorySource {
    fn read(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub mode: TokenizerMode,
    pub encoding: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub fingerprint: String,
    pub records: usize,
    pub dropped: BTreeMap<&'static str, usize>,
    pub coercions: Vec<Coercion>,
}

impl LoadReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalog: Arc<Catalog>,
    pub report: LoadReport,
}

pub fn load_catalog(
    source: &dyn DatasetSource,
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let bytes = source.read()?;
    build_catalog(source.describe(), &bytes, options)
}

/// Logs any load failure and falls back to an empty catalog.
pub fn load_or_empty(source: &dyn DatasetSource, options: &LoadOptions) -> Arc<Catalog> {
    match load_catalog(source, options) {
        Ok(outcome) => outcome.catalog,
        Err(err) => {
            error!("Error loading restaurants: {err}");
            Arc::new(Catalog::empty())
        }
    }
}

pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn build_catalog(
    source_name: String,
    bytes: &[u8],
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let encoding = io_utils::resolve_encoding(options.encoding.as_deref())?;
    let text = io_utils::decode_dataset(bytes, encoding)?;
    let tokenized = tokenize_with(&text, options.mode);
    if tokenized.rows.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    let mut normalized = normalize(&tokenized.rows);
    if let Some(limit) = options.limit {
        normalized.records.truncate(limit);
    }

    let mut dropped = BTreeMap::new();
    for issue in tokenized.dropped.iter().chain(normalized.issues.iter()) {
        *dropped.entry(issue.label()).or_insert(0) += 1;
    }
    for coercion in &normalized.coercions {
        debug!("Coerced to absent: {coercion}");
    }

    let report = LoadReport {
        source: source_name,
        fingerprint: fingerprint(bytes),
        records: normalized.records.len(),
        dropped,
        coercions: normalized.coercions,
    };
    if report.dropped_total() > 0 {
        warn!(
            "Dropped {} row(s) from {}",
            report.dropped_total(),
            report.source
        );
    }
    info!(
        "Loaded {} restaurant(s) from {}",
        report.records, report.source
    );
    Ok(LoadOutcome {
        catalog: Arc::new(Catalog::new(normalized.records)),
        report,
    })
}

/// Serializes loads and memoizes the last catalog by dataset fingerprint.
#[derive(Debug, Default)]
pub struct CatalogCache {
    options: LoadOptions,
    slot: Mutex<Option<LoadOutcome>>,
}

impl CatalogCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            slot: Mutex::new(None),
        }
    }

    pub fn get(&self, source: &dyn DatasetSource) -> Result<LoadOutcome, LoadError> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let bytes = source.read()?;
        let digest = fingerprint(&bytes);
        if let Some(cached) = slot.as_ref()
            && cached.report.fingerprint == digest
        {
            debug!("Reusing cached catalog for {}", source.describe());
            return Ok(cached.clone());
        }
        let outcome = build_catalog(source.describe(), &bytes, &self.options)?;
        *slot = Some(outcome.clone());
        Ok(outcome)
    }

    pub fn get_or_empty(&self, source: &dyn DatasetSource) -> Arc<Catalog> {
        match self.get(source) {
            Ok(outcome) => outcome.catalog,
            Err(err) => {
                error!("Error loading restaurants: {err}");
                Arc::new(Catalog::empty())
            }
        }
    }

    pub fn invalidate(&self) {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}
