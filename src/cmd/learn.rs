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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::scheduler::Scheduler;
use crate::scheduler::SessionKind;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Walk through a batch of new cards in the terminal and enter them into
/// the review pool.
pub fn learn(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::open(directory)?;
    let started_at = Timestamp::now();
    let batch = select_batch(&collection)?;
    if batch.is_empty() {
        println!("No new cards to learn.");
        return Ok(());
    }
    let total = batch.len();
    println!("Learning {total} new cards.");
    for (position, card) in batch.iter().enumerate() {
        present_card(card, position + 1, total);
        wait_for_enter()?;
    }
    // Nothing is written until the whole batch has been seen. Quitting
    // mid-session leaves every card untracked for the next one.
    let now = Timestamp::now();
    seed_batch(&collection.scheduler, &batch, now)?;
    collection
        .scheduler
        .save_session(SessionKind::Learn, started_at, now, total as u32)?;
    println!();
    println!("Done. These cards will come up for review tomorrow.");
    Ok(())
}

/// The untracked cards this session will present, in folder-file order,
/// capped at the configured batch size.
fn select_batch(collection: &Collection) -> Fallible<Vec<&Card>> {
    let mut batch = collection.untracked_cards()?;
    batch.truncate(collection.config.learn.batch_size);
    Ok(batch)
}

fn present_card(card: &Card, position: usize, total: usize) {
    println!();
    println!("[{position}/{total}] {}", card.folder());
    println!("  {}", card.front());
    println!("  {}", card.back());
    if let Some(example) = card.example() {
        println!("  {example}");
    }
    println!("[press Enter to continue]");
}

fn wait_for_enter() -> Fallible<()> {
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(())
}

fn seed_batch(scheduler: &Scheduler, batch: &[&Card], now: Timestamp) -> Fallible<()> {
    for card in batch {
        scheduler.seed(card, now)?;
    }
    Ok(())
}
