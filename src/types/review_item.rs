// Copyright 2026 The wordmill authors
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

use crate::sm2::Sm2State;
use crate::types::card::Card;
use crate::types::item_id::ItemId;
use crate::types::timestamp::Timestamp;

/// A card's scheduling record. Created when the card is first learned,
/// then rewritten by every recorded review.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewItem {
    /// The card this record schedules.
    pub card: Card,
    /// When the card entered the review pool.
    pub added_at: Timestamp,
    /// Days between the last rating and the next review.
    pub interval_days: u32,
    /// Interval growth multiplier. Higher means the card is easier.
    pub ease_factor: f64,
    /// Consecutive successful reviews. Reset to zero by a failed one.
    pub repetitions: u32,
    /// When the card next comes up for review.
    pub next_review_at: Timestamp,
}

impl ReviewItem {
    pub fn item_id(&self) -> ItemId {
        self.card.item_id()
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }

    /// The scheduling fields the algorithm operates on.
    pub fn state(&self) -> Sm2State {
        Sm2State {
            interval_days: self.interval_days,
            ease_factor: self.ease_factor,
            repetitions: self.repetitions,
        }
    }
}
