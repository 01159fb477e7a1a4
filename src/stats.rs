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

use serde::Serialize;

use crate::catalog::Catalog;
use crate::store::Store;
use crate::types::status::Status;

/// Per-deck progress breakdown. `percentage` is the share of mastered
/// cards, rounded to the nearest integer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProgress {
    pub mastered: usize,
    pub learning: usize,
    pub new: usize,
    pub percentage: u32,
}

/// Progress aggregated over the whole catalog.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_cards: usize,
    pub cards_studied: usize,
    pub cards_mastered: usize,
    pub sessions: u64,
    pub percentage: u32,
}

/// Scan the store for indices `0..total_cards` of one deck. Cards with no
/// record count as new.
pub fn deck_progress(store: &Store, deck_id: &str, total_cards: usize) -> DeckProgress {
    let mut mastered = 0;
    let mut learning = 0;
    for index in 0..total_cards {
        match store.progress(deck_id, index).status {
            Status::Mastered => mastered += 1,
            Status::Learning => learning += 1,
            Status::New => {}
        }
    }
    DeckProgress {
        mastered,
        learning,
        new: total_cards - mastered - learning,
        percentage: percentage(mastered, total_cards),
    }
}

/// Aggregate `deck_progress` across every deck in the catalog. Studied
/// cards are those mastered or learning.
pub fn global_stats(catalog: &Catalog, store: &Store) -> GlobalStats {
    let mut total_cards = 0;
    let mut cards_studied = 0;
    let mut cards_mastered = 0;
    for deck in &catalog.decks {
        let progress = deck_progress(store, &deck.id, deck.cards.len());
        total_cards += deck.cards.len();
        cards_studied += progress.mastered + progress.learning;
        cards_mastered += progress.mastered;
    }
    GlobalStats {
        total_cards,
        cards_studied,
        cards_mastered,
        sessions: store.sessions(),
        percentage: percentage(cards_mastered, total_cards),
    }
}

/// Rounded percentage, zero when the denominator is zero.
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
