use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::part::{Part, PartError, PartId, PartRecord};

const EMBEDDED_SEED: &str = include_str!("../data/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid part at index {index}: {source}")]
    InvalidPart {
        index: usize,
        #[source]
        source: PartError,
    },
    #[error("Duplicate part id: {0}")]
    DuplicateId(PartId),
}

/// Immutable, ordered part list. Loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    pub fn new(parts: Vec<Part>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(parts.len());
        for part in &parts {
            if !seen.insert(part.id) {
                return Err(CatalogError::DuplicateId(part.id));
            }
        }
        Ok(Self { parts })
    }

    pub fn from_records(records: Vec<PartRecord>) -> Result<Self, CatalogError> {
        let parts = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Part::from_record(record).map_err(|source| CatalogError::InvalidPart { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parts)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<PartRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn find(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|part| part.id == id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Source of seed data for the catalog.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load(&self) -> Result<Catalog, CatalogError>;
    fn describe(&self) -> String;
}

/// The seed list compiled into the binary.
#[derive(Debug, Default)]
pub struct EmbeddedCatalog;

#[async_trait]
impl CatalogLoader for EmbeddedCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog::from_json(EMBEDDED_SEED)?;
        debug!("Loaded {} parts from embedded seed", catalog.len());
        Ok(catalog)
    }

    fn describe(&self) -> String {
        "embedded seed".to_string()
    }
}

/// A JSON array of part records on disk.
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogLoader for JsonFileCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        info!("Loading catalog from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        let catalog = Catalog::from_json(&raw)?;
        info!("Loaded {} parts from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks the file loader when a path is configured, the embedded seed otherwise.
pub fn loader_for(path: Option<&Path>) -> Box<dyn CatalogLoader> {
    match path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(EmbeddedCatalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_seed_loads() {
        let catalog = EmbeddedCatalog.load().await.unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.parts()[0].article, "OF-2845");
        assert!(!catalog.find(PartId(4)).unwrap().in_stock);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "article": "A-1", "price": 1, "brand": "X", "category": "Y", "inStock": true},
            {"id": 1, "name": "B", "article": "B-1", "price": 2, "brand": "X", "category": "Y", "inStock": true}
        ]"#;
        let result = Catalog::from_json(json);
        assert!(matches!(result, Err(CatalogError::DuplicateId(PartId(1)))));
    }

    #[test]
    fn test_invalid_record_reports_index() {
        let json = r#"[
            {"id": 1, "name": "A", "article": "A-1", "price": 1, "brand": "X", "category": "Y", "inStock": true},
            {"id": 2, "name": "B", "article": "B-1", "price": -3, "brand": "X", "category": "Y", "inStock": true}
        ]"#;
        let result = Catalog::from_json(json);
        assert!(matches!(result, Err(CatalogError::InvalidPart { index: 1, .. })));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let result = Catalog::from_json(r#"[{"id": 1, "name": "A"}]"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
