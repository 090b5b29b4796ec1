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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::scheduler::Scheduler;
use crate::types::review_item::ReviewItem;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct ServerState {
    pub total_items: usize,
    pub session_started_at: Timestamp,
    pub scheduler: Scheduler,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    /// Whether the back of the current item is showing.
    pub reveal: bool,
    /// Items still to be rated, current item first. Forgotten items
    /// re-enter at the back.
    pub queue: Vec<ReviewItem>,
    /// Ratings recorded so far this session.
    pub recorded: u32,
    /// Set once the session is over. The tally page is shown from then
    /// on and further ratings are ignored.
    pub finished_at: Option<Timestamp>,
}
