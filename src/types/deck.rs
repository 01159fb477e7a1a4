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

use serde::Deserialize;

use crate::types::card::Card;

/// A static deck descriptor from `decks.toml`: where to find the deck's
/// content and how to present it in the catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct DeckDescriptor {
    pub id: String,
    pub file: String,
    pub icon: String,
    pub category: String,
}

/// The shape of one deck content file.
#[derive(Debug, Deserialize)]
pub struct DeckContent {
    pub title: String,
    pub description: String,
    pub cards: Vec<Card>,
}

/// A fully loaded deck: descriptor metadata joined with its content. Decks
/// are loaded once and read-only thereafter.
#[derive(Clone, Debug)]
pub struct Deck {
    pub id: String,
    pub category: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(descriptor: DeckDescriptor, content: DeckContent) -> Self {
        Self {
            id: descriptor.id,
            category: descriptor.category,
            icon: descriptor.icon,
            title: content.title,
            description: content.description,
            cards: content.cards,
        }
    }
}
