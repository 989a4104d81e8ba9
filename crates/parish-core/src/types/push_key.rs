//! Time-ordered record key generation.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use super::RecordId;

/// Key alphabet in ASCII order, so keys sort lexicographically by time.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;

/// Generates 20-character push keys.
///
/// The first 8 characters encode the creation time in milliseconds and the
/// remaining 12 are random. Keys produced by one generator are strictly
/// increasing: within the same millisecond (or if the clock steps back) the
/// random suffix of the previous key is incremented instead of redrawn.
#[derive(Debug, Default)]
pub struct PushKeyGenerator {
    state: Mutex<PushState>,
}

#[derive(Debug, Default)]
struct PushState {
    last_millis: i64,
    last_random: [u8; RANDOM_CHARS],
}

impl PushKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a key for the current time.
    pub fn next_key(&self) -> RecordId {
        self.next_key_at(Utc::now().timestamp_millis())
    }

    /// Generate a key for the given time in milliseconds since the epoch.
    pub fn next_key_at(&self, millis: i64) -> RecordId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let millis = if millis <= state.last_millis {
            increment(&mut state.last_random);
            state.last_millis
        } else {
            state.last_random = random_digits();
            state.last_millis = millis;
            millis
        };

        let mut key = String::with_capacity(TIME_CHARS + RANDOM_CHARS);
        let mut time_chars = [0u8; TIME_CHARS];
        let mut remaining = millis.max(0) as u64;
        for slot in time_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        key.extend(time_chars.iter().map(|&b| b as char));
        key.extend(
            state
                .last_random
                .iter()
                .map(|&d| PUSH_CHARS[d as usize] as char),
        );

        // Every character comes from PUSH_CHARS, which only holds valid key characters.
        RecordId::new(key).unwrap_or_else(|_| unreachable!("push keys use a valid alphabet"))
    }
}

/// Twelve random base-64 digits.
fn random_digits() -> [u8; RANDOM_CHARS] {
    let bytes = Uuid::new_v4().into_bytes();
    let mut digits = [0u8; RANDOM_CHARS];
    // Byte 6 holds the UUID version bits; every other byte keeps 6 random low bits.
    for (slot, byte) in digits.iter_mut().zip(
        bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 6)
            .map(|(_, b)| *b),
    ) {
        *slot = byte % 64;
    }
    digits
}

/// Add one to a big-endian base-64 number, wrapping on overflow.
fn increment(digits: &mut [u8; RANDOM_CHARS]) {
    for digit in digits.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
}
