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

use crate::types::confidence::Confidence;

/// A card's mastery status, derived from its rating history.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Learning,
    Mastered,
}

impl Status {
    /// The status after one rating. `easy` always promotes to mastered,
    /// `again` and `hard` always demote to learning, and `good` promotes
    /// one step at a time: new cards to learning, learning cards to
    /// mastered. `good` on a mastered card keeps it mastered.
    pub fn after(self, confidence: Confidence) -> Status {
        match confidence {
            Confidence::Easy => Status::Mastered,
            Confidence::Good => match self {
                Status::New => Status::Learning,
                Status::Learning | Status::Mastered => Status::Mastered,
            },
            Confidence::Again | Confidence::Hard => Status::Learning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Learning => "learning",
            Status::Mastered => "mastered",
        }
    }
}
