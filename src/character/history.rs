use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run statistics shown on the history page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKey {
    Kills,
    DmgDone,
    DmgTaken,
    RunAway,
    Rest,
    RiskyWin,
}

impl HistoryKey {
    pub const ALL: [HistoryKey; 6] = [
        HistoryKey::Kills,
        HistoryKey::DmgDone,
        HistoryKey::DmgTaken,
        HistoryKey::RunAway,
        HistoryKey::Rest,
        HistoryKey::RiskyWin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HistoryKey::Kills => "Monsters killed",
            HistoryKey::DmgDone => "Damage dealt",
            HistoryKey::DmgTaken => "Damage taken",
            HistoryKey::RunAway => "Times fled",
            HistoryKey::Rest => "Times rested",
            HistoryKey::RiskyWin => "Risky wins",
        }
    }
}

/// Append-only counters; a key that was never touched reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    counts: BTreeMap<HistoryKey, u64>,
}

impl History {
    pub fn increment(&mut self, key: HistoryKey, amount: u64) {
        *self.counts.entry(key).or_insert(0) += amount;
    }

    pub fn get(&self, key: HistoryKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HistoryKey, u64)> + '_ {
        HistoryKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}
