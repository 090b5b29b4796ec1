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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::error::Fallible;
use crate::scheduler::SessionKind;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Reveal,
    End,
    Shutdown,
    Forgot,
    Hard,
    Good,
    Easy,
}

impl Action {
    fn quality(&self) -> i64 {
        match self {
            Action::Forgot => 1,
            Action::Hard => 3,
            Action::Good => 4,
            Action::Easy => 5,
            _ => panic!("Action does not correspond to a rating"),
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form.action) {
        Ok(()) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, action: Action) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    match action {
        Action::Reveal => {
            if !mutable.reveal {
                mutable.reveal = true;
            }
        }
        Action::End => {
            finish_session(state, &mut mutable)?;
        }
        Action::Shutdown => {
            finish_session(state, &mut mutable)?;
            if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
                let _ = tx.send(());
            }
        }
        Action::Forgot | Action::Hard | Action::Good | Action::Easy => {
            // A rating only counts for a revealed card in a live session.
            // Stale posts, such as a rating submitted after the queue ran
            // out in another tab, are dropped.
            if mutable.reveal && mutable.finished_at.is_none() {
                let item = mutable.queue.remove(0);
                let updated =
                    state
                        .scheduler
                        .record_review(item.item_id(), action.quality(), Timestamp::now())?;
                mutable.recorded += 1;
                mutable.reveal = false;
                // Forgotten items come around again before the session
                // ends, carrying their reset scheduling state.
                if matches!(action, Action::Forgot) {
                    mutable.queue.push(updated);
                }
                if mutable.queue.is_empty() {
                    finish_session(state, &mut mutable)?;
                }
            }
        }
    }
    Ok(())
}

fn finish_session(state: &ServerState, mutable: &mut MutableState) -> Fallible<()> {
    if mutable.finished_at.is_some() {
        return Ok(());
    }
    log::debug!("Session completed.");
    let ended_at = Timestamp::now();
    state.scheduler.save_session(
        SessionKind::Review,
        state.session_started_at,
        ended_at,
        mutable.recorded,
    )?;
    mutable.finished_at = Some(ended_at);
    Ok(())
}
