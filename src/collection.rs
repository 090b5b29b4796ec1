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
use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::config::load_config;
use crate::error::Fallible;
use crate::error::fail;
use crate::folders::load_folders;
use crate::scheduler::Scheduler;
use crate::types::card::Card;
use crate::types::item_id::ItemId;

/// Name of the scheduling database file.
pub const DB_FILE: &str = "wordmill.db";

/// A collection directory: its folder files, configuration, and
/// scheduling database.
pub struct Collection {
    pub config: Config,
    pub cards: Vec<Card>,
    pub scheduler: Scheduler,
}

/// Resolve an optional directory argument to a canonical path,
/// defaulting to the current directory.
pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if directory.exists() {
        Ok(directory.canonicalize()?)
    } else {
        fail("directory does not exist.")
    }
}

impl Collection {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory = resolve_directory(directory)?;
        let config = load_config(&directory)?;
        let scheduler = Scheduler::open(&directory.join(DB_FILE))?;
        let cards = {
            log::debug!("Loading folders...");
            let start = Instant::now();
            let cards = load_folders(&directory)?;
            let end = Instant::now();
            let duration = end.duration_since(start).as_millis();
            log::debug!("Loaded {} cards in {duration}ms.", cards.len());
            cards
        };
        Ok(Self {
            config,
            cards,
            scheduler,
        })
    }

    /// Cards present in the folder files but not yet in the scheduling
    /// database.
    pub fn untracked_cards(&self) -> Fallible<Vec<&Card>> {
        let tracked = self.scheduler.tracked_ids()?;
        Ok(self
            .cards
            .iter()
            .filter(|card| !tracked.contains(&card.item_id()))
            .collect())
    }

    /// Item IDs present in the scheduling database but absent from the
    /// folder files. These belong to cards that were deleted or whose
    /// front was edited.
    pub fn orphaned_ids(&self) -> Fallible<Vec<ItemId>> {
        let current: HashSet<ItemId> = self.cards.iter().map(|card| card.item_id()).collect();
        let mut orphans: Vec<ItemId> = self
            .scheduler
            .tracked_ids()?
            .into_iter()
            .filter(|id| !current.contains(id))
            .collect();
        orphans.sort();
        Ok(orphans)
    }

    /// Copy edited backs and examples from the folder files into the
    /// database. Scheduling state is untouched. Returns how many items
    /// changed.
    pub fn sync_content(&self) -> Fallible<usize> {
        let mut changed = 0;
        for card in &self.cards {
            if self.scheduler.refresh_content(card)? {
                changed += 1;
            }
        }
        if changed > 0 {
            log::debug!("Refreshed the content of {changed} items.");
        }
        Ok(changed)
    }
}
