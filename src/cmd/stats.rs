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

use std::collections::HashSet;

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

pub fn print_collection_stats(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::open(directory)?;
    let stats = collect_stats(&collection, Timestamp::now())?;
    let json = serde_json::to_string_pretty(&stats)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    folder_count: usize,
    card_count: usize,
    tracked_item_count: usize,
    new_card_count: usize,
    due_now_count: usize,
    review_count_today: usize,
}

fn collect_stats(collection: &Collection, now: Timestamp) -> Fallible<Stats> {
    let folders: HashSet<&str> = collection.cards.iter().map(|card| card.folder()).collect();
    let today = now.local_date();
    let review_count_today = collection
        .scheduler
        .reviews()?
        .iter()
        .filter(|review| review.reviewed_at.local_date() == today)
        .count();
    Ok(Stats {
        folder_count: folders.len(),
        card_count: collection.cards.len(),
        tracked_item_count: collection.scheduler.tracked_ids()?.len(),
        new_card_count: collection.untracked_cards()?.len(),
        due_now_count: collection.scheduler.due_items(now)?.len(),
        review_count_today,
    })
}
