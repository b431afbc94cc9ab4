//! Snowflake ID generator.
//!
//! IDs are laid out as a 41-bit millisecond timestamp relative to a custom
//! epoch, a 10-bit machine ID and a 12-bit per-millisecond sequence:
//!
//! ```text
//! 0 | timestamp (41) | machine (10) | sequence (12)
//! ```
//!
//! The generator is an ordinary value: construct one per process (or per
//! test) and inject it through `ServerDeps`.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::warn;

use super::BaseIdGenerator;

const MACHINE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;

/// Largest machine ID that fits the layout.
pub const MAX_MACHINE_ID: i64 = (1 << MACHINE_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MACHINE_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + MACHINE_BITS;

/// Format accepted for the configured start time.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdGeneratorError {
    #[error("machine id {0} is outside 0..={MAX_MACHINE_ID}")]
    InvalidMachineId(i64),

    #[error("invalid start time {0:?}, expected YYYY-MM-DD HH:MM:SS")]
    InvalidStartTime(String),

    #[error("snowflake epoch must not be in the future")]
    EpochInFuture,
}

/// Fields packed into a snowflake ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeParts {
    /// Milliseconds since the generator's epoch
    pub elapsed_ms: i64,
    pub machine_id: i64,
    pub sequence: i64,
}

#[derive(Debug)]
struct SnowflakeState {
    last_ms: i64,
    sequence: i64,
}

/// Thread-safe snowflake generator.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    epoch_ms: i64,
    machine_id: i64,
    state: Mutex<SnowflakeState>,
}

impl SnowflakeGenerator {
    /// Create a generator with an explicit epoch and machine ID.
    pub fn new(epoch: DateTime<Utc>, machine_id: i64) -> Result<Self, IdGeneratorError> {
        if !(0..=MAX_MACHINE_ID).contains(&machine_id) {
            return Err(IdGeneratorError::InvalidMachineId(machine_id));
        }
        if epoch > Utc::now() {
            return Err(IdGeneratorError::EpochInFuture);
        }

        Ok(Self {
            epoch_ms: epoch.timestamp_millis(),
            machine_id,
            state: Mutex::new(SnowflakeState {
                last_ms: -1,
                sequence: 0,
            }),
        })
    }

    /// Create a generator from a configured start time string (UTC).
    pub fn from_start_time(start_time: &str, machine_id: i64) -> Result<Self, IdGeneratorError> {
        let naive = NaiveDateTime::parse_from_str(start_time.trim(), START_TIME_FORMAT)
            .map_err(|_| IdGeneratorError::InvalidStartTime(start_time.to_string()))?;
        Self::new(naive.and_utc(), machine_id)
    }

    /// Split an ID produced by this layout back into its fields.
    pub fn decompose(id: i64) -> SnowflakeParts {
        SnowflakeParts {
            elapsed_ms: id >> TIMESTAMP_SHIFT,
            machine_id: (id >> MACHINE_SHIFT) & MAX_MACHINE_ID,
            sequence: id & SEQUENCE_MASK,
        }
    }

    fn elapsed_ms(&self) -> i64 {
        // id 0 is reserved, so the first millisecond of the epoch counts as 1
        (Utc::now().timestamp_millis() - self.epoch_ms).max(1)
    }
}

impl BaseIdGenerator for SnowflakeGenerator {
    fn generate(&self) -> i64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let mut now = self.elapsed_ms();
        if now < state.last_ms {
            warn!(
                last_ms = state.last_ms,
                now_ms = now,
                "Clock moved backwards, reusing last snowflake timestamp"
            );
            now = state.last_ms;
        }

        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond
                while now <= state.last_ms {
                    std::hint::spin_loop();
                    now = self.elapsed_ms();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_ms = now;

        (now << TIMESTAMP_SHIFT) | (self.machine_id << MACHINE_SHIFT) | state.sequence
    }
}
