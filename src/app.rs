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

use rand::Rng;

use crate::catalog::Catalog;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::Mode;
use crate::session::Session;
use crate::store::Store;
use crate::types::confidence::Confidence;
use crate::types::deck::Deck;
use crate::types::theme::Theme;

/// Opaque token pairing a reset request with its confirmation. Destructive
/// resets are a two-step command: `request_reset` hands out a token,
/// `confirm_reset` only proceeds when handed the same token back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResetToken(u64);

impl ResetToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

/// Result of trying to start a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StartOutcome {
    Started,
    /// The queue came up empty (review mode with everything mastered).
    /// The prior state is untouched.
    NothingToStudy,
    NoDeckSelected,
}

/// The application context: catalog, durable store, and the navigation and
/// session state driven by the command surface. One instance owns all
/// mutable state; there are no globals.
pub struct App {
    pub catalog: Catalog,
    pub store: Store,
    current_deck: Option<String>,
    session: Option<Session>,
    reset_token: Option<ResetToken>,
}

impl App {
    pub fn new(catalog: Catalog, store: Store) -> Self {
        Self {
            catalog,
            store,
            current_deck: None,
            session: None,
            reset_token: None,
        }
    }

    /// Select a deck for mode selection. Unknown ids are rejected.
    pub fn select_deck(&mut self, id: &str) -> bool {
        if self.catalog.deck(id).is_none() {
            return false;
        }
        self.current_deck = Some(id.to_string());
        true
    }

    pub fn current_deck(&self) -> Option<&Deck> {
        let id = self.current_deck.as_deref()?;
        self.catalog.deck(id)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a session over the selected deck. On success the session
    /// counter increments; an empty queue leaves everything unchanged.
    pub fn start_session(&mut self, mode: Mode) -> StartOutcome {
        let Some(deck) = self.current_deck() else {
            return StartOutcome::NoDeckSelected;
        };
        match Session::start(deck, mode, &self.store) {
            Some(session) => {
                self.session = Some(session);
                self.store.increment_sessions();
                StartOutcome::Started
            }
            None => StartOutcome::NothingToStudy,
        }
    }

    pub fn flip(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.flip();
        }
    }

    pub fn next(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.next();
        }
    }

    pub fn prev(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.prev();
        }
    }

    pub fn rate(&mut self, confidence: Confidence) {
        if let Some(session) = self.session.as_mut() {
            session.rate(confidence, &mut self.store);
        }
    }

    pub fn shuffle_now(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.shuffle_now();
        }
    }

    /// Restart the current session's deck with the same mode. Counts as a
    /// new session when it starts.
    pub fn study_again(&mut self) -> StartOutcome {
        let Some(session) = self.session.as_ref() else {
            return StartOutcome::NoDeckSelected;
        };
        let Some(deck) = self.catalog.deck(session.deck_id()) else {
            return StartOutcome::NoDeckSelected;
        };
        match session.study_again(deck, &self.store) {
            Some(next) => {
                self.session = Some(next);
                self.store.increment_sessions();
                StartOutcome::Started
            }
            None => StartOutcome::NothingToStudy,
        }
    }

    /// Replay the current session's mistakes. Does not touch the session
    /// counter: a mistake replay is a sub-session, not a new one.
    pub fn review_mistakes(&mut self) -> bool {
        let Some(replay) = self.session.as_ref().and_then(Session::review_mistakes) else {
            return false;
        };
        self.session = Some(replay);
        true
    }

    /// Navigate back to the deck list, abandoning any session.
    pub fn go_home(&mut self) {
        self.session = None;
        self.current_deck = None;
    }

    /// First step of reset-all: hand out a confirmation token. Requesting
    /// again replaces any earlier token.
    pub fn request_reset(&mut self) -> ResetToken {
        let token = ResetToken(rand::rng().random());
        self.reset_token = Some(token);
        token
    }

    /// Second step of reset-all: clears every progress record, but only
    /// when `token` matches the pending request.
    pub fn confirm_reset(&mut self, token: ResetToken) -> Fallible<()> {
        if self.reset_token != Some(token) {
            return fail("no matching reset request is pending.");
        }
        self.reset_token = None;
        self.store.reset_all();
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.store.theme().toggle();
        self.store.set_theme(theme);
        theme
    }
}
