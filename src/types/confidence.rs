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
use serde::Serialize;

/// The learner's self-assessed recall quality for a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Again,
    Hard,
    Good,
    Easy,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Again => "again",
            Confidence::Hard => "hard",
            Confidence::Good => "good",
            Confidence::Easy => "easy",
        }
    }

    /// A rating of `again` or `hard` counts as a mistake for the session.
    pub fn is_mistake(&self) -> bool {
        matches!(self, Confidence::Again | Confidence::Hard)
    }
}
