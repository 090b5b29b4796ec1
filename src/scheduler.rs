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
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::ToSql;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorReport;
use crate::sm2;
use crate::types::card::Card;
use crate::types::item_id::ItemId;
use crate::types::quality::InvalidQuality;
use crate::types::quality::Quality;
use crate::types::review_item::ReviewItem;
use crate::types::timestamp::Timestamp;

/// Failure modes of scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A review was recorded for a card that was never seeded.
    #[error("no review item exists for item {0}.")]
    ItemNotFound(ItemId),
    #[error(transparent)]
    InvalidQuality(#[from] InvalidQuality),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

/// Owns the scheduling state of a collection: which cards are tracked, their
/// SM-2 fields, the review history, and the session log. Backed by a SQLite
/// database stored next to the folder files.
#[derive(Clone)]
pub struct Scheduler {
    conn: Arc<Mutex<Connection>>,
}

impl Scheduler {
    pub fn open(database_path: &Path) -> Result<Self, SchedulerError> {
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, SchedulerError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, SchedulerError> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Enters a card into the review pool, due one day out. A card that is
    /// already tracked is left untouched and returned as is.
    pub fn seed(&self, card: &Card, now: Timestamp) -> Result<ReviewItem, SchedulerError> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        if let Some(existing) = get_item(&tx, card.item_id())? {
            return Ok(existing);
        }
        log::debug!(
            "Seeding item {}: '{}' from folder '{}'.",
            card.item_id(),
            card.front(),
            card.folder()
        );
        let state = sm2::initial_state();
        let item = ReviewItem {
            card: card.clone(),
            added_at: now,
            interval_days: state.interval_days,
            ease_factor: state.ease_factor,
            repetitions: state.repetitions,
            next_review_at: now.plus_days(state.interval_days),
        };
        insert_item(&tx, &item)?;
        tx.commit()?;
        Ok(item)
    }

    /// Applies a rating to a tracked item. The item row is rewritten and a
    /// history row appended in one transaction, so the update is a single
    /// atomic read-modify-write of the record.
    pub fn record_review(
        &self,
        item_id: ItemId,
        quality: i64,
        now: Timestamp,
    ) -> Result<ReviewItem, SchedulerError> {
        let quality = Quality::try_from(quality)?;
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let item = get_item(&tx, item_id)?.ok_or(SchedulerError::ItemNotFound(item_id))?;
        let state = sm2::next_state(item.state(), quality);
        let item = ReviewItem {
            card: item.card,
            added_at: item.added_at,
            interval_days: state.interval_days,
            ease_factor: state.ease_factor,
            repetitions: state.repetitions,
            next_review_at: now.plus_days(state.interval_days),
        };
        update_item(&tx, &item)?;
        let record = ReviewRecord {
            item_id,
            reviewed_at: now,
            quality,
            interval_days: item.interval_days,
            ease_factor: item.ease_factor,
            repetitions: item.repetitions,
            next_review_at: item.next_review_at,
        };
        insert_review(&tx, &record)?;
        tx.commit()?;
        log::debug!(
            "Reviewed item {}: quality={} interval={}d ease={:.2} due={}.",
            &item_id.to_hex()[..8],
            quality.value(),
            item.interval_days,
            item.ease_factor,
            item.next_review_at
        );
        Ok(item)
    }

    /// Every item due at the given time, soonest first. Recomputed fresh on
    /// each call.
    pub fn due_items(&self, now: Timestamp) -> Result<Vec<ReviewItem>, SchedulerError> {
        let conn = self.acquire();
        let sql = "select folder, front, back, example, added_at, interval_days, ease_factor, repetitions, next_review_at from items where next_review_at <= ? order by next_review_at, item_id;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([now])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(read_item(row)?);
        }
        Ok(items)
    }

    /// The scheduling record for one item, if it exists.
    pub fn item(&self, item_id: ItemId) -> Result<Option<ReviewItem>, SchedulerError> {
        let conn = self.acquire();
        Ok(get_item(&conn, item_id)?)
    }

    /// The set of all tracked item ids.
    pub fn tracked_ids(&self) -> Result<HashSet<ItemId>, SchedulerError> {
        let mut ids = HashSet::new();
        let conn = self.acquire();
        let mut stmt = conn.prepare("select item_id from items;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: ItemId = row.get(0)?;
            ids.insert(id);
        }
        Ok(ids)
    }

    /// Every tracked item, ordered by folder and front.
    pub fn all_items(&self) -> Result<Vec<ReviewItem>, SchedulerError> {
        let conn = self.acquire();
        let sql = "select folder, front, back, example, added_at, interval_days, ease_factor, repetitions, next_review_at from items order by folder, front;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(read_item(row)?);
        }
        Ok(items)
    }

    /// Rewrites the stored back and example of a tracked card whose folder
    /// file changed. Content is opaque to the scheduling fields, which are
    /// left untouched. Returns whether anything was written.
    pub fn refresh_content(&self, card: &Card) -> Result<bool, SchedulerError> {
        let conn = self.acquire();
        let sql = "update items set back = ?2, example = ?3 where item_id = ?1 and (back is not ?2 or example is not ?3);";
        let changed = conn.execute(sql, (card.item_id(), card.back(), card.example()))?;
        Ok(changed > 0)
    }

    /// The full review history, oldest first.
    pub fn reviews(&self) -> Result<Vec<ReviewRecord>, SchedulerError> {
        let conn = self.acquire();
        let sql = "select item_id, reviewed_at, quality, interval_days, ease_factor, repetitions, next_review_at from reviews order by review_id;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(ReviewRecord {
                item_id: row.get("item_id")?,
                reviewed_at: row.get("reviewed_at")?,
                quality: row.get("quality")?,
                interval_days: row.get("interval_days")?,
                ease_factor: row.get("ease_factor")?,
                repetitions: row.get("repetitions")?,
                next_review_at: row.get("next_review_at")?,
            });
        }
        Ok(records)
    }

    /// Logs a completed session.
    pub fn save_session(
        &self,
        kind: SessionKind,
        started_at: Timestamp,
        ended_at: Timestamp,
        item_count: u32,
    ) -> Result<(), SchedulerError> {
        let conn = self.acquire();
        let sql = "insert into sessions (kind, started_at, ended_at, item_count) values (?, ?, ?, ?);";
        conn.execute(sql, (kind, started_at, ended_at, item_count))?;
        Ok(())
    }

    /// The session log, oldest first.
    pub fn sessions(&self) -> Result<Vec<SessionRecord>, SchedulerError> {
        let conn = self.acquire();
        let sql =
            "select kind, started_at, ended_at, item_count from sessions order by session_id;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(SessionRecord {
                kind: row.get("kind")?,
                started_at: row.get("started_at")?,
                ended_at: row.get("ended_at")?,
                item_count: row.get("item_count")?,
            });
        }
        Ok(records)
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

/// One row of review history: the rating and the scheduling state it
/// produced.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewRecord {
    pub item_id: ItemId,
    pub reviewed_at: Timestamp,
    pub quality: Quality,
    pub interval_days: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub next_review_at: Timestamp,
}

/// What a logged session was doing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionKind {
    Learn,
    Review,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Learn => "learn",
            SessionKind::Review => "review",
        }
    }
}

impl Serialize for SessionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<String> for SessionKind {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "learn" => Ok(SessionKind::Learn),
            "review" => Ok(SessionKind::Review),
            other => Err(ErrorReport::new(format!("unknown session kind: {other}"))),
        }
    }
}

impl ToSql for SessionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SessionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        SessionKind::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// One row of the session log.
#[derive(Clone, PartialEq, Debug)]
pub struct SessionRecord {
    pub kind: SessionKind,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub item_count: u32,
}

fn get_item(conn: &Connection, item_id: ItemId) -> rusqlite::Result<Option<ReviewItem>> {
    let sql = "select folder, front, back, example, added_at, interval_days, ease_factor, repetitions, next_review_at from items where item_id = ?;";
    conn.query_row(sql, [item_id], read_item).optional()
}

fn read_item(row: &Row) -> rusqlite::Result<ReviewItem> {
    let folder: String = row.get("folder")?;
    let front: String = row.get("front")?;
    let back: String = row.get("back")?;
    let example: Option<String> = row.get("example")?;
    Ok(ReviewItem {
        card: Card::new(folder, front, back, example),
        added_at: row.get("added_at")?,
        interval_days: row.get("interval_days")?,
        ease_factor: row.get("ease_factor")?,
        repetitions: row.get("repetitions")?,
        next_review_at: row.get("next_review_at")?,
    })
}

fn insert_item(tx: &Transaction, item: &ReviewItem) -> rusqlite::Result<()> {
    let sql = "insert into items (item_id, folder, front, back, example, added_at, interval_days, ease_factor, repetitions, next_review_at) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            item.item_id(),
            item.card.folder(),
            item.card.front(),
            item.card.back(),
            item.card.example(),
            item.added_at,
            item.interval_days,
            item.ease_factor,
            item.repetitions,
            item.next_review_at,
        ),
    )?;
    Ok(())
}

fn update_item(tx: &Transaction, item: &ReviewItem) -> rusqlite::Result<()> {
    let sql = "update items set interval_days = ?, ease_factor = ?, repetitions = ?, next_review_at = ? where item_id = ?;";
    tx.execute(
        sql,
        (
            item.interval_days,
            item.ease_factor,
            item.repetitions,
            item.next_review_at,
            item.item_id(),
        ),
    )?;
    Ok(())
}

fn insert_review(tx: &Transaction, record: &ReviewRecord) -> rusqlite::Result<()> {
    let sql = "insert into reviews (item_id, reviewed_at, quality, interval_days, ease_factor, repetitions, next_review_at) values (?, ?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            record.item_id,
            record.reviewed_at,
            record.quality,
            record.interval_days,
            record.ease_factor,
            record.repetitions,
            record.next_review_at,
        ),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> rusqlite::Result<bool> {
    let sql = "select count(*) from sqlite_master where type='table' and name=?;";
    let count: i64 = tx.query_row(sql, ["items"], |row| row.get(0))?;
    Ok(count > 0)
}
