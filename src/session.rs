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

use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::store::Store;
use crate::types::card::Card;
use crate::types::confidence::Confidence;
use crate::types::deck::Deck;
use crate::types::status::Status;

/// How the session queue is built from the deck.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full deck, original order.
    Study,
    /// Full deck, uniformly random permutation.
    Shuffle,
    /// Only cards not yet mastered, original relative order.
    Review,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Study => "study",
            Mode::Shuffle => "shuffle",
            Mode::Review => "review",
        }
    }
}

/// Counters accumulated over one session. `mistakes` holds the original
/// deck indices of cards rated `again` or `hard`, in rating order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total: u32,
    pub easy: u32,
    pub good: u32,
    pub hard: u32,
    pub again: u32,
    pub mistakes: Vec<usize>,
}

/// One run through a queue of cards.
///
/// The queue is a list of indices into the deck's card list, so a rating
/// always resolves to the card's original position no matter how the queue
/// was shuffled or filtered. A session is in progress until the position
/// runs off the end of the queue, after which only `study_again` and
/// `review_mistakes` produce a fresh one.
pub struct Session {
    deck_id: String,
    cards: Vec<Card>,
    mode: Mode,
    queue: Vec<usize>,
    position: usize,
    flipped: bool,
    complete: bool,
    stats: SessionStats,
}

impl Session {
    /// Start a session over `deck`. Returns `None` when the queue comes up
    /// empty (review mode with every card mastered, or an empty deck), in
    /// which case no session exists and nothing changes.
    pub fn start(deck: &Deck, mode: Mode, store: &Store) -> Option<Session> {
        let indices = 0..deck.cards.len();
        let queue: Vec<usize> = match mode {
            Mode::Study => indices.collect(),
            Mode::Shuffle => {
                let mut queue: Vec<usize> = indices.collect();
                queue.shuffle(&mut rand::rng());
                queue
            }
            Mode::Review => indices
                .filter(|&index| store.progress(&deck.id, index).status != Status::Mastered)
                .collect(),
        };
        if queue.is_empty() {
            return None;
        }
        log::debug!(
            "Starting {} session over {} ({} cards queued)",
            mode.as_str(),
            deck.id,
            queue.len()
        );
        Some(Session {
            deck_id: deck.id.clone(),
            cards: deck.cards.clone(),
            mode,
            queue,
            position: 0,
            flipped: false,
            complete: false,
            stats: SessionStats::default(),
        })
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// 0-based position within the queue.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn current_card(&self) -> &Card {
        &self.cards[self.queue[self.position]]
    }

    /// Toggle the answer side. Display-only: no progress is recorded.
    pub fn flip(&mut self) {
        if !self.complete {
            self.flipped = !self.flipped;
        }
    }

    /// Advance one card, or complete the session at the end of the queue.
    pub fn next(&mut self) {
        if self.complete {
            return;
        }
        if self.position + 1 < self.queue.len() {
            self.position += 1;
            self.flipped = false;
        } else {
            self.complete = true;
        }
    }

    /// Step back one card. No-op at the front of the queue.
    pub fn prev(&mut self) {
        if self.complete {
            return;
        }
        if self.position > 0 {
            self.position -= 1;
            self.flipped = false;
        }
    }

    /// Rate the current card and advance. The rating is recorded against
    /// the card's original deck index. Ignored once the session is
    /// complete.
    pub fn rate(&mut self, confidence: Confidence, store: &mut Store) {
        if self.complete {
            return;
        }
        let index = self.queue[self.position];
        store.record(&self.deck_id, index, confidence);
        self.stats.total += 1;
        match confidence {
            Confidence::Again => self.stats.again += 1,
            Confidence::Hard => self.stats.hard += 1,
            Confidence::Good => self.stats.good += 1,
            Confidence::Easy => self.stats.easy += 1,
        }
        if confidence.is_mistake() {
            self.stats.mistakes.push(index);
        }
        self.next();
    }

    /// Reshuffle the remaining queue and start over from the front.
    pub fn shuffle_now(&mut self) {
        if self.complete {
            return;
        }
        self.queue.shuffle(&mut rand::rng());
        self.position = 0;
        self.flipped = false;
    }

    /// Rebuild a fresh session over the same deck with the same mode.
    /// Review mode re-filters against current progress, so this can come
    /// up empty.
    pub fn study_again(&self, deck: &Deck, store: &Store) -> Option<Session> {
        Session::start(deck, self.mode, store)
    }

    /// A sub-session whose queue is exactly the mistakes of this session,
    /// in rating order. `None` when there were no mistakes.
    pub fn review_mistakes(&self) -> Option<Session> {
        if self.stats.mistakes.is_empty() {
            return None;
        }
        Some(Session {
            deck_id: self.deck_id.clone(),
            cards: self.cards.clone(),
            mode: self.mode,
            queue: self.stats.mistakes.clone(),
            position: 0,
            flipped: false,
            complete: false,
            stats: SessionStats::default(),
        })
    }
}
