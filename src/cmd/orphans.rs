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

/// Print the IDs of scheduled items whose cards are gone from the folder
/// files, one per line. Deleting a card (or editing its front) strands its
/// scheduling record; this surfaces those records without touching them.
pub fn list_orphans(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::open(directory)?;
    for item_id in collection.orphaned_ids()? {
        println!("{item_id}");
    }
    Ok(())
}
