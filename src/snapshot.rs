//! Plain data shapes handed to storage and share-link collaborators.
//!
//! The storage medium and any compression are someone else's concern; this
//! module only fixes the shape and offers JSON conversion.

use crate::payout::PayoutRow;
use crate::pots::Boards;
use crate::session::{BetRow, PayoutSheet, SidePotSheet};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    Version(u32),
}

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

fn one_board() -> String {
    "1".to_string()
}

fn no_dead_money() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSnapshot {
    #[serde(default = "current_version")]
    pub v: u32,
    #[serde(default, rename = "buyIn")]
    pub buy_in: String,
    #[serde(default)]
    pub rows: Vec<PayoutRow>,
}

impl PayoutSnapshot {
    pub fn from_sheet(sheet: &PayoutSheet) -> Self {
        Self {
            v: SNAPSHOT_VERSION,
            buy_in: sheet.buy_in().to_string(),
            rows: sheet.rows().to_vec(),
        }
    }

    pub fn into_sheet(self, max_rows: usize) -> PayoutSheet {
        PayoutSheet::with_rows(self.rows, self.buy_in, max_rows)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(s)?;
        check_version(snapshot.v)?;
        Ok(snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePotSnapshot {
    #[serde(default = "current_version")]
    pub v: u32,
    /// Board count as typed.
    #[serde(default = "one_board")]
    pub boards: String,
    #[serde(default = "no_dead_money", rename = "initialPot")]
    pub initial_pot: String,
    #[serde(default)]
    pub rows: Vec<BetRow>,
}

impl SidePotSnapshot {
    /// Winner marks are not part of the snapshot; they are re-picked after a
    /// restore.
    pub fn from_sheet(sheet: &SidePotSheet) -> Self {
        Self {
            v: SNAPSHOT_VERSION,
            boards: sheet.boards().as_input(),
            initial_pot: sheet.initial_pot().to_string(),
            rows: sheet.rows().to_vec(),
        }
    }

    pub fn into_sheet(self, max_rows: usize) -> SidePotSheet {
        SidePotSheet::with_rows(
            self.rows,
            self.initial_pot,
            Boards::from_input(&self.boards),
            max_rows,
        )
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(s)?;
        check_version(snapshot.v)?;
        Ok(snapshot)
    }
}

fn check_version(v: u32) -> Result<(), SnapshotError> {
    if v != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version(v));
    }
    Ok(())
}
