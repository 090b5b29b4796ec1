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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;
use thiserror::Error;

/// A recall rating on the SM-2 scale: 0 (total blackout) to 5 (perfect
/// recall). The review UI only ever emits the four named levels, but the
/// algorithm accepts the whole scale.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Quality(u8);

/// Rejected rating, outside the 0 to 5 scale.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("invalid quality rating {0}: must be an integer from 0 to 5.")]
pub struct InvalidQuality(pub i64);

impl Quality {
    pub const FORGOT: Quality = Quality(1);
    pub const HARD: Quality = Quality(3);
    pub const GOOD: Quality = Quality(4);
    pub const EASY: Quality = Quality(5);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and up count as successful recall.
    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=5).contains(&value) {
            Ok(Quality(value as u8))
        } else {
            Err(InvalidQuality(value))
        }
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        i64::from(quality.0)
    }
}

impl ToSql for Quality {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for Quality {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        Quality::try_from(raw).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Serialize for Quality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}
