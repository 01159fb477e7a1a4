// Copyright 2025 The flashdeck contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::deck::Deck;
use crate::types::deck::DeckContent;
use crate::types::deck::DeckDescriptor;

/// Name of the descriptor config inside the deck directory.
pub const CONFIG_FILE: &str = "decks.toml";

#[derive(Deserialize)]
struct CatalogConfig {
    #[serde(default, rename = "deck")]
    decks: Vec<DeckDescriptor>,
}

/// The loaded deck catalog. Decks appear in descriptor order, regardless
/// of load completion order. Decks whose content file is missing or
/// malformed are skipped, and their ids recorded in `failed`.
pub struct Catalog {
    pub decks: Vec<Deck>,
    pub failed: Vec<String>,
}

impl Catalog {
    /// Load every configured deck. Content files are read concurrently;
    /// a failed deck is logged and omitted, never fatal. Only a missing
    /// directory or an unreadable `decks.toml` fails the whole load.
    pub async fn load(directory: &Path) -> Fallible<Self> {
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let config = tokio::fs::read_to_string(directory.join(CONFIG_FILE)).await?;
        let config: CatalogConfig = toml::from_str(&config)?;

        log::debug!("Loading {} decks...", config.decks.len());
        let start = Instant::now();
        let mut handles = Vec::new();
        for descriptor in config.decks {
            let path = directory.join(&descriptor.file);
            handles.push(tokio::spawn(load_deck(descriptor, path)));
        }
        let mut decks = Vec::new();
        let mut failed = Vec::new();
        for handle in handles {
            match handle.await? {
                Ok(deck) => decks.push(deck),
                Err(id) => failed.push(id),
            }
        }
        let duration = start.elapsed().as_millis();
        log::debug!("Catalog loaded in {duration}ms.");

        Ok(Self { decks, failed })
    }

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == id)
    }

    /// Distinct deck categories, in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for deck in &self.decks {
            if !categories.contains(&deck.category.as_str()) {
                categories.push(&deck.category);
            }
        }
        categories
    }
}

/// Load one deck's content file. On failure, returns the descriptor id.
async fn load_deck(descriptor: DeckDescriptor, path: PathBuf) -> Result<Deck, String> {
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            log::warn!("could not load {}: {e}", descriptor.file);
            return Err(descriptor.id);
        }
    };
    let content: DeckContent = match serde_json::from_str(&content) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("could not parse {}: {e}", descriptor.file);
            return Err(descriptor.id);
        }
    };
    Ok(Deck::new(descriptor, content))
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    const CONFIG: &str = r#"
        [[deck]]
        id = "alpha"
        file = "alpha.json"
        icon = "A"
        category = "first"

        [[deck]]
        id = "broken"
        file = "broken.json"
        icon = "B"
        category = "first"

        [[deck]]
        id = "missing"
        file = "missing.json"
        icon = "M"
        category = "second"

        [[deck]]
        id = "omega"
        file = "omega.json"
        icon = "O"
        category = "second"
    "#;

    fn deck_json(title: &str) -> String {
        format!(
            r#"{{"title":"{title}","description":"d","cards":[{{"question":"q","answer":"a"}}]}}"#
        )
    }

    #[tokio::test]
    async fn test_load_skips_failures_and_keeps_order() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), CONFIG)?;
        write(dir.path().join("alpha.json"), deck_json("Alpha"))?;
        write(dir.path().join("broken.json"), "{ not json")?;
        write(dir.path().join("omega.json"), deck_json("Omega"))?;

        let catalog = Catalog::load(dir.path()).await?;
        let ids: Vec<&str> = catalog.decks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "omega"]);
        assert_eq!(catalog.failed, vec!["broken", "missing"]);
        assert_eq!(catalog.deck("omega").unwrap().title, "Omega");
        assert!(catalog.deck("broken").is_none());
        Ok(())
    }

    #[test]
    fn test_categories_dedup_in_first_appearance_order() {
        let deck = |id: &str, category: &str| Deck {
            id: id.to_string(),
            category: category.to_string(),
            icon: "X".to_string(),
            title: id.to_string(),
            description: "d".to_string(),
            cards: Vec::new(),
        };
        let catalog = Catalog {
            decks: vec![
                deck("a", "process"),
                deck("b", "testing"),
                deck("c", "process"),
            ],
            failed: Vec::new(),
        };
        assert_eq!(catalog.categories(), vec!["process", "testing"]);
    }

    #[tokio::test]
    async fn test_load_non_existent_directory() {
        let result = Catalog::load(Path::new("./derpherp")).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[tokio::test]
    async fn test_load_without_config_fails() {
        let dir = tempdir().unwrap();
        let result = Catalog::load(dir.path()).await;
        assert!(result.is_err());
    }
}
