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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::cmd::review::template::page_template;
use crate::types::timestamp::Timestamp;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = match mutable.finished_at {
        Some(finished_at) => tally_page(&state, &mutable, finished_at),
        None => card_page(&state, &mutable),
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn card_page(state: &ServerState, mutable: &MutableState) -> Markup {
    let progress = format!(
        "{} / {}",
        state.total_items.saturating_sub(mutable.queue.len()),
        state.total_items
    );
    let card = &mutable.queue[0].card;
    let content = if mutable.reveal {
        html! {
            div.content {
                div.front {
                    p {
                        (card.front())
                    }
                }
                div.back {
                    p {
                        (card.back())
                    }
                    @if let Some(example) = card.example() {
                        p.example {
                            (example)
                        }
                    }
                }
            }
        }
    } else {
        html! {
            div.content {
                div.front {
                    p {
                        (card.front())
                    }
                }
                div.back {}
            }
        }
    };
    let controls = if mutable.reveal {
        html! {
            form action="/" method="post" {
                div.spacer {}
                input id="forgot" type="submit" name="action" value="Forgot" title="Shortcut: 1.";
                input id="hard" type="submit" name="action" value="Hard" title="Shortcut: 2.";
                input id="good" type="submit" name="action" value="Good" title="Shortcut: 3.";
                input id="easy" type="submit" name="action" value="Easy" title="Shortcut: 4.";
                div.spacer {}
                input id="end" type="submit" name="action" value="End" title="End the session. Recorded ratings are kept.";
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                div.spacer {}
                input id="reveal" type="submit" name="action" value="Reveal" title="Show the back. Shortcut: space.";
                div.spacer {}
                input id="end" type="submit" name="action" value="End" title="End the session. Recorded ratings are kept.";
            }
        }
    };
    html! {
        div.root {
            div.card {
                div.header {
                    h1 {
                        (card.folder())
                    }
                    div.progress {
                        (progress)
                    }
                }
                (content)
                div.controls {
                    (controls)
                }
            }
        }
    }
}

fn tally_page(state: &ServerState, mutable: &MutableState, finished_at: Timestamp) -> Markup {
    let recorded = mutable.recorded;
    html! {
        div.finished {
            h1 {
                "Session Completed"
            }
            div.summary {
                "Recorded " (recorded) " reviews."
            }
            div.stats {
                table {
                    tbody {
                        tr {
                            td.key { "Items Due" }
                            td.val { (state.total_items) }
                        }
                        tr {
                            td.key { "Reviews Recorded" }
                            td.val { (recorded) }
                        }
                        @if recorded > 0 {
                            tr {
                                td.key { "Pace (s/review)" }
                                td.val {
                                    (format!(
                                        "{:.2}",
                                        finished_at.seconds_since(state.session_started_at) as f64
                                            / f64::from(recorded)
                                    ))
                                }
                            }
                        }
                    }
                }
            }
            form action="/" method="post" {
                input id="shutdown" type="submit" name="action" value="Shutdown" title="Stop the server.";
            }
        }
    }
}
