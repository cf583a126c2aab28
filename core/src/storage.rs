// core/src/storage.rs
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::types::RecentSearch;

/// Maks antall nylige søk som beholdes ("siste 5"-policyen).
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Standard filnavn – tilsvarer nettleserens weatherRecentSearches-nøkkel.
pub const RECENT_SEARCHES_FILE: &str = "weather_recent_searches.json";

/// Lager for "nylige søk". Injiseres slik at tester kan bruke
/// minne-varianten i stedet for disk.
pub trait RecentSearchStore {
    /// Leser listen. Manglende eller korrupt lager gir tom liste –
    /// aldri feil ut mot kalleren.
    fn load(&self) -> Vec<RecentSearch>;
    /// Skriver hele listen (siste-skriver-vinner, ingen merge).
    fn save(&self, list: &[RecentSearch]) -> Result<()>;
}

/// Dedup på id, nyeste først, kutt til maksgrensen.
pub fn push_recent(list: &mut Vec<RecentSearch>, entry: RecentSearch) {
    list.retain(|s| s.id != entry.id);
    list.insert(0, entry);
    list.truncate(MAX_RECENT_SEARCHES);
}

// ── Fil-lager (JSON på disk) ─────────────────────────────────────────────

pub struct FileRecentSearchStore {
    path: PathBuf,
}

impl FileRecentSearchStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileRecentSearchStore {
    fn default() -> Self {
        Self::new(RECENT_SEARCHES_FILE)
    }
}

impl RecentSearchStore for FileRecentSearchStore {
    fn load(&self) -> Vec<RecentSearch> {
        if !self.path.exists() {
            return Vec::new();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(list) => list,
                Err(e) => {
                    println!(
                        "⚠️ Klarte ikke å parse {} ({e}), starter med tom liste",
                        self.path.display()
                    );
                    Vec::new()
                }
            },
            Err(e) => {
                println!(
                    "⚠️ Klarte ikke å lese {} ({e}), starter med tom liste",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn save(&self, list: &[RecentSearch]) -> Result<()> {
        let json = serde_json::to_string_pretty(list).context("serialisering av nylige søk")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("skriving til {}", self.path.display()))?;
        println!(
            "✅ Nylige søk lagret til {} ({} innslag)",
            self.path.display(),
            list.len()
        );
        Ok(())
    }
}

// ── Minne-lager (tester og engangsbruk) ──────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryRecentSearchStore {
    inner: Mutex<Vec<RecentSearch>>,
}

impl RecentSearchStore for MemoryRecentSearchStore {
    fn load(&self) -> Vec<RecentSearch> {
        self.inner.lock().unwrap().clone()
    }

    fn save(&self, list: &[RecentSearch]) -> Result<()> {
        *self.inner.lock().unwrap() = list.to_vec();
        Ok(())
    }
}
