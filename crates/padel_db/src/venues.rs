//! JSON-backed registry of saved venues.
//!
//! The document is `{"venues": [...]}`, written sorted by lowercase alias.
//! A venue without a time zone is given the configured default on both
//! read and write, using the same fallback as venue zone resolution.

use crate::error::DbError;
use padel_common::models::Venue;
use padel_config::{default_timezone_name, StorageConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct VenuesFile {
    #[serde(default)]
    venues: Vec<Venue>,
}

/// Saved venues, keyed by case-insensitive alias.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    path: PathBuf,
    default_timezone: String,
}

impl VenueRegistry {
    pub fn new(path: impl Into<PathBuf>, default_timezone: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_timezone: default_timezone_name(&default_timezone.into()),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(storage.venues_path(), storage.default_timezone.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every saved venue. A missing file is an empty registry.
    pub fn load(&self) -> Result<Vec<Venue>, DbError> {
        if !self.path.exists() {
            debug!("No venue registry at {}", self.path.display());
            return Ok(Vec::new());
        }
        if self.path.is_dir() {
            return Err(DbError::ConfigError(format!(
                "venues path is a directory: {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let mut payload: VenuesFile = serde_json::from_str(&content)?;
        for venue in &mut payload.venues {
            self.fill_timezone(venue);
        }
        Ok(payload.venues)
    }

    /// Writes the registry, sorted by lowercase alias.
    pub fn save(&self, venues: &[Venue]) -> Result<(), DbError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut sorted = venues.to_vec();
        sorted.sort_by_key(|venue| venue.alias.to_lowercase());
        for venue in &mut sorted {
            self.fill_timezone(venue);
        }

        let mut content = serde_json::to_string_pretty(&VenuesFile { venues: sorted })?;
        content.push('\n');
        std::fs::write(&self.path, content)?;
        debug!("Saved venue registry to {}", self.path.display());
        Ok(())
    }

    /// Looks up one venue by alias.
    pub fn find(&self, alias: &str) -> Result<Venue, DbError> {
        let venues = self.load()?;
        find_venue_by_alias(&venues, alias)
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("venue alias {:?}", alias)))
    }

    /// Looks up several venues, failing on the first unknown alias.
    pub fn find_all(&self, aliases: &[String]) -> Result<Vec<Venue>, DbError> {
        let venues = self.load()?;
        aliases
            .iter()
            .map(|alias| {
                find_venue_by_alias(&venues, alias)
                    .cloned()
                    .ok_or_else(|| DbError::NotFound(format!("venue alias {:?}", alias)))
            })
            .collect()
    }

    /// Adds a venue; the alias must not already be saved.
    pub fn add(&self, mut venue: Venue) -> Result<Venue, DbError> {
        venue.alias = venue.alias.trim().to_string();
        if venue.id.trim().is_empty() || venue.alias.is_empty() || venue.name.trim().is_empty() {
            return Err(DbError::ConfigError(
                "venue id, alias, and name are required".to_string(),
            ));
        }
        self.fill_timezone(&mut venue);

        let mut venues = self.load()?;
        if find_venue_by_alias(&venues, &venue.alias).is_some() {
            return Err(DbError::AlreadyExists(format!("venue alias {:?}", venue.alias)));
        }
        venues.push(venue.clone());
        self.save(&venues)?;

        info!("Saved venue {} ({})", venue.alias, venue.name);
        Ok(venue)
    }

    /// Removes a venue by alias and returns it.
    pub fn remove(&self, alias: &str) -> Result<Venue, DbError> {
        let mut venues = self.load()?;
        let index = venues
            .iter()
            .position(|venue| venue.matches_alias(alias))
            .ok_or_else(|| DbError::NotFound(format!("venue alias {:?}", alias.trim())))?;

        let removed = venues.remove(index);
        self.save(&venues)?;

        info!("Removed venue {}", removed.alias);
        Ok(removed)
    }

    fn fill_timezone(&self, venue: &mut Venue) {
        if venue.timezone.trim().is_empty() {
            venue.timezone = self.default_timezone.clone();
        }
    }
}

/// Case-insensitive alias lookup over an already loaded list.
pub fn find_venue_by_alias<'a>(venues: &'a [Venue], alias: &str) -> Option<&'a Venue> {
    venues.iter().find(|venue| venue.matches_alias(alias))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn venue(alias: &str, timezone: &str) -> Venue {
        Venue {
            id: format!("tenant-{}", alias),
            alias: alias.to_string(),
            name: format!("{} Club", alias),
            indoor: true,
            timezone: timezone.to_string(),
        }
    }

    fn registry(dir: &TempDir) -> VenueRegistry {
        VenueRegistry::new(dir.path().join("venues.json"), "Europe/Madrid")
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(registry(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn save_sorts_by_lowercase_alias_and_fills_timezone() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry
            .save(&[venue("zeta", ""), venue("Alpha", "Europe/Lisbon"), venue("beta", "")])
            .unwrap();

        let raw = std::fs::read_to_string(registry.path()).unwrap();
        assert!(raw.starts_with("{\n  \"venues\": ["));

        let loaded = registry.load().unwrap();
        let aliases: Vec<&str> = loaded.iter().map(|v| v.alias.as_str()).collect();
        assert_eq!(aliases, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(loaded[1].timezone, "Europe/Madrid");
        assert_eq!(loaded[0].timezone, "Europe/Lisbon");
    }

    #[test]
    fn empty_timezone_in_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        std::fs::write(
            registry.path(),
            r#"{"venues":[{"id":"t1","alias":"central","name":"Central","indoor":true,"timezone":""}]}"#,
        )
        .unwrap();
        assert_eq!(registry.find("CENTRAL").unwrap().timezone, "Europe/Madrid");
    }

    #[test]
    fn add_rejects_duplicate_alias_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(venue("central", "")).unwrap();

        let err = registry.add(venue("Central", "")).unwrap_err();
        assert!(matches!(err, DbError::AlreadyExists(_)));
    }

    #[test]
    fn remove_returns_venue_and_unknown_alias_is_not_found() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(venue("central", "")).unwrap();
        registry.add(venue("north", "")).unwrap();

        let removed = registry.remove("NORTH").unwrap();
        assert_eq!(removed.alias, "north");
        assert_eq!(registry.load().unwrap().len(), 1);
        assert!(matches!(registry.remove("north"), Err(DbError::NotFound(_))));
    }

    #[test]
    fn find_all_fails_on_unknown_alias() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(venue("central", "")).unwrap();

        let err = registry
            .find_all(&["central".to_string(), "missing".to_string()])
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(ref what) if what.contains("missing")));
    }

    #[test]
    fn invalid_default_zone_backfills_built_in_zone() {
        let dir = TempDir::new().unwrap();
        let registry = VenueRegistry::new(dir.path().join("venues.json"), "Not/A_Zone");

        let added = registry.add(venue("central", "")).unwrap();
        assert_eq!(added.timezone, "Europe/Madrid");

        let raw = std::fs::read_to_string(registry.path()).unwrap();
        assert!(raw.contains("\"timezone\": \"Europe/Madrid\""));
        assert!(!raw.contains("Not/A_Zone"));
    }
}
