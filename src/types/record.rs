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
use crate::types::status::Status;
use crate::types::timestamp::Timestamp;

/// Mastery state for one card, keyed by (deck id, card index) in the store.
/// A card with no record behaves as a fresh record: status `new`, zero
/// reviews.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub status: Status,
    pub reviews: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review: Option<Timestamp>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self {
            status: Status::New,
            reviews: 0,
            last_review: None,
        }
    }

    /// The record after one rating: status follows the transition table,
    /// the review count increments, and the review time is stamped.
    pub fn rated(&self, confidence: Confidence, now: Timestamp) -> Self {
        Self {
            status: self.status.after(confidence),
            reviews: self.reviews + 1,
            last_review: Some(now),
        }
    }
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = ProgressRecord::new();
        assert_eq!(record.status, Status::New);
        assert_eq!(record.reviews, 0);
        assert_eq!(record.last_review, None);
    }

    #[test]
    fn test_rated() {
        let now = Timestamp::now();
        let record = ProgressRecord::new().rated(Confidence::Good, now);
        assert_eq!(record.status, Status::Learning);
        assert_eq!(record.reviews, 1);
        assert_eq!(record.last_review, Some(now));
        let record = record.rated(Confidence::Good, now);
        assert_eq!(record.status, Status::Mastered);
        assert_eq!(record.reviews, 2);
    }

    #[test]
    fn test_serde_shape() {
        let now = Timestamp::now();
        let record = ProgressRecord::new().rated(Confidence::Easy, now);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "mastered");
        assert_eq!(json["reviews"], 1);
        assert!(json["lastReview"].is_i64());
    }

    #[test]
    fn test_missing_last_review_deserializes() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"status":"learning","reviews":3}"#).unwrap();
        assert_eq!(record.status, Status::Learning);
        assert_eq!(record.reviews, 3);
        assert_eq!(record.last_review, None);
    }
}
