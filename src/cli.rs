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

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::export::export_collection;
use crate::cmd::learn::learn;
use crate::cmd::orphans::list_orphans;
use crate::cmd::review::server::start_server;
use crate::cmd::stats::print_collection_stats;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Learn new cards in the terminal.
    Learn {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Review due items in the browser.
    Review {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Print collection statistics as JSON.
    Stats {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Validate the folder files.
    Check {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// List scheduled items whose cards no longer exist.
    Orphans {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Dump items, review history, and sessions as JSON.
    Export {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Learn { directory } => learn(directory),
        Command::Review { directory } => {
            // The review server is the only asynchronous command.
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(start_server(directory, Timestamp::now()))
        }
        Command::Stats { directory } => print_collection_stats(directory),
        Command::Check { directory } => check_collection(directory),
        Command::Orphans { directory } => list_orphans(directory),
        Command::Export { directory } => export_collection(directory),
    }
}
