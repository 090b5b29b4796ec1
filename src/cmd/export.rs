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

use std::collections::HashMap;

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::scheduler::SessionKind;
use crate::types::item_id::ItemId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// Dump everything the scheduling database knows as pretty-printed JSON:
/// every tracked item with its review history nested inside it, plus the
/// session log.
pub fn export_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::open(directory)?;
    let export = get_export(&collection)?;
    let json = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    items: Vec<ItemExport>,
    sessions: Vec<SessionExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemExport {
    item_id: ItemId,
    folder: String,
    front: String,
    back: String,
    example: Option<String>,
    added_at: Timestamp,
    interval_days: u32,
    ease_factor: f64,
    repetitions: u32,
    next_review_at: Timestamp,
    reviews: Vec<ReviewExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewExport {
    reviewed_at: Timestamp,
    quality: Quality,
    interval_days: u32,
    ease_factor: f64,
    repetitions: u32,
    next_review_at: Timestamp,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionExport {
    kind: SessionKind,
    started_at: Timestamp,
    ended_at: Timestamp,
    item_count: u32,
}

fn get_export(collection: &Collection) -> Fallible<Export> {
    let mut history: HashMap<ItemId, Vec<ReviewExport>> = HashMap::new();
    for record in collection.scheduler.reviews()? {
        history.entry(record.item_id).or_default().push(ReviewExport {
            reviewed_at: record.reviewed_at,
            quality: record.quality,
            interval_days: record.interval_days,
            ease_factor: record.ease_factor,
            repetitions: record.repetitions,
            next_review_at: record.next_review_at,
        });
    }
    let mut items = Vec::new();
    for item in collection.scheduler.all_items()? {
        let reviews = history.remove(&item.item_id()).unwrap_or_default();
        items.push(ItemExport {
            item_id: item.item_id(),
            folder: item.card.folder().to_owned(),
            front: item.card.front().to_owned(),
            back: item.card.back().to_owned(),
            example: item.card.example().map(ToOwned::to_owned),
            added_at: item.added_at,
            interval_days: item.interval_days,
            ease_factor: item.ease_factor,
            repetitions: item.repetitions,
            next_review_at: item.next_review_at,
            reviews,
        });
    }
    let sessions = collection
        .scheduler
        .sessions()?
        .into_iter()
        .map(|session| SessionExport {
            kind: session.kind,
            started_at: session.started_at,
            ended_at: session.ended_at,
            item_count: session.item_count,
        })
        .collect();
    Ok(Export { items, sessions })
}
