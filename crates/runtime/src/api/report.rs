//! Narrative events the runtime publishes while following a run.
//!
//! Reports carry plain data; rendering them is left to the client.
use core::fmt;

use showdown_core::Rejection;

/// Counters accumulated over one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleTally {
    pub turns: i32,
    /// Seconds.
    pub time: i64,
    pub hits: i32,
    pub potions_used: i32,
    pub combos: i32,
}

/// Result line of a won battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub room: String,
    /// `None` when following started in the middle of the battle.
    pub tally: Option<BattleTally>,
}

/// `mm:ss`, or `hh:mm:ss` once an hour has passed.
pub fn pretty_time(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    if hours == 0 {
        format!("{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.room)?;
        match &self.tally {
            Some(tally) => {
                writeln!(f, "Turns taken: {}", tally.turns)?;
                writeln!(f, "Time taken: {}", pretty_time(tally.time))?;
                writeln!(f, "Hits taken: {}", tally.hits)?;
                writeln!(f, "Potions used: {}", tally.potions_used)?;
                write!(f, "Combos: {}", tally.combos)
            }
            None => {
                writeln!(f, "Turns taken: unknown")?;
                writeln!(f, "Time taken: unknown")?;
                writeln!(f, "Hits taken: unknown")?;
                writeln!(f, "Potions used: unknown")?;
                write!(f, "Combos: unknown")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    RunStarted { day: i32 },
    /// Following began with a snapshot taken after the first turn.
    JoinedMidRun,
    BattleStarted { room: String, resumed: bool },
    Turn { turn: i32, time: i64 },
    /// The one hero action that explains the last turn.
    Explained { description: String },
    Ambiguous { descriptions: Vec<String> },
    Unexplained { rejections: Vec<Rejection> },
    /// `id: candidates` for every held potion, sent when the knowledge changed.
    Potions { lines: Vec<String> },
    BattleFinished(Split),
    RewardEntered { room: String, offer: String, resumed: bool },
    RewardTaken { description: String },
    RewardRerolled { price: i32 },
    MapEntered,
    ShopEntered { shop: String, inventory: Vec<String>, resumed: bool },
    ShopPurchase { description: String },
    ShopRestocked { inventory: Vec<String> },
    PotionsSold { descriptions: Vec<String> },
    CoinsSpent { amount: i32, left: i32 },
    DeckChanged { added: Vec<String>, removed: Vec<String> },
    RunFinished,
}

impl Report {
    /// Reports that belong in a splits-only log.
    pub fn is_split(&self) -> bool {
        matches!(self, Self::BattleFinished(_))
    }
}
