use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use serde::{Deserialize, Serialize};

/// How many entries the leaderboard shows.
pub const TOP_ENTRIES: usize = 5;

/// A finished game: who cleared the board and how many seconds it took.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub time: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, time: u32) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }
}

/// Append-only list of finished games. Entries are never removed or merged.
pub trait LeaderboardStore {
    type Error;

    fn load_entries(&self) -> core::result::Result<Vec<LeaderboardEntry>, Self::Error>;

    fn append_entry(&mut self, entry: LeaderboardEntry) -> core::result::Result<(), Self::Error>;

    /// Fastest `count` entries, see [`top_entries`].
    fn top(&self, count: usize) -> core::result::Result<Vec<LeaderboardEntry>, Self::Error> {
        Ok(top_entries(self.load_entries()?, count))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryStore {
    type Error = Infallible;

    fn load_entries(&self) -> core::result::Result<Vec<LeaderboardEntry>, Self::Error> {
        Ok(self.entries.clone())
    }

    fn append_entry(&mut self, entry: LeaderboardEntry) -> core::result::Result<(), Self::Error> {
        self.entries.push(entry);
        Ok(())
    }
}

/// Ascending by time, ties kept in insertion order, truncated to `count`.
pub fn top_entries(mut entries: Vec<LeaderboardEntry>, count: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by_key(|entry| entry.time);
    entries.truncate(count);
    entries
}
