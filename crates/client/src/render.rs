//! Plain-text rendering of runtime reports.
use showdown_runtime::{Report, pretty_time};

/// How much of the narrative is printed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    pub verbose: bool,
    pub splits: bool,
}

impl Renderer {
    pub const fn new(verbose: bool, splits: bool) -> Self {
        Self { verbose, splits }
    }

    /// Lines to print for `report`; empty when the mode hides it.
    pub fn render(&self, report: &Report) -> Vec<String> {
        if self.splits {
            return match report {
                Report::BattleFinished(split) => {
                    let mut lines: Vec<String> = split.to_string().lines().map(str::to_string).collect();
                    lines.push(String::new());
                    lines
                }
                _ => Vec::new(),
            };
        }

        match report {
            Report::RunStarted { day } => vec![format!("== RUN STARTED (day {day}) =="), String::new()],
            Report::JoinedMidRun => vec![
                "== Logging started in the middle of a run lacks many features. ==".into(),
                String::new(),
            ],
            Report::BattleStarted { room, resumed } => {
                let title = if *resumed { "== IN A BATTLE ==" } else { "== BATTLE STARTED ==" };
                vec![String::new(), title.into(), format!("== {room} =="), String::new()]
            }
            Report::Turn { turn, time } => vec![format!("TURN {turn}, TIME {}", pretty_time(*time))],
            Report::Explained { description } => vec![description.clone()],
            Report::Ambiguous { descriptions } => {
                let mut lines = vec!["More than one scenario fits this turn:".to_string()];
                lines.extend(descriptions.iter().map(|description| format!("  - {description}")));
                lines
            }
            Report::Unexplained { rejections } => {
                let mut lines = vec!["Correct scenario has not been found :(".to_string()];
                if self.verbose {
                    lines.extend(
                        rejections
                            .iter()
                            .map(|rejection| format!("  - {}: {}", rejection.description, rejection.reason)),
                    );
                }
                lines
            }
            Report::Potions { lines: potions } => {
                let mut lines = vec!["Potions:".to_string()];
                lines.extend(potions.iter().map(|line| format!("  {line}")));
                lines
            }
            Report::BattleFinished(split) => {
                let mut lines = vec![String::new(), "== BATTLE WON ==".to_string()];
                lines.extend(split.to_string().lines().map(str::to_string));
                lines.push(String::new());
                lines
            }
            Report::RewardEntered { room, offer, resumed } => {
                let title = if *resumed { "== IN A REWARD ROOM ==" } else { "== ENTERED REWARD ROOM ==" };
                let mut lines = vec![title.to_string(), format!("== {room} ==")];
                if !offer.is_empty() {
                    lines.push(format!("Offer: {offer}"));
                }
                lines.push(String::new());
                lines
            }
            Report::RewardTaken { description } => vec![description.clone()],
            Report::RewardRerolled { price } => vec![format!("Rerolled the reward for {price} coins")],
            Report::MapEntered => vec!["== ENTERED MAP JOURNEY ==".into(), String::new()],
            Report::ShopEntered {
                shop,
                inventory,
                resumed,
            } => {
                let title = if *resumed { "== IN A SHOP ==" } else { "== ENTERED A SHOP ==" };
                let mut lines = vec![title.to_string(), format!("== {shop} =="), String::new()];
                lines.extend(inventory.iter().cloned());
                lines.push(String::new());
                lines
            }
            Report::ShopPurchase { description } => vec![description.clone()],
            Report::ShopRestocked { inventory } => {
                let mut lines = vec!["The shop has been restocked. New inventory:".to_string()];
                lines.extend(inventory.iter().cloned());
                lines.push(String::new());
                lines
            }
            Report::PotionsSold { descriptions } => match descriptions.as_slice() {
                [only] => vec![only.clone()],
                _ => {
                    let mut lines = vec!["Potions sold, one of:".to_string()];
                    lines.extend(descriptions.iter().map(|description| format!("  - {description}")));
                    lines
                }
            },
            Report::CoinsSpent { amount, left } => vec![format!("Spent {amount} coins, {left} left")],
            Report::DeckChanged { added, removed } => {
                let mut lines = Vec::new();
                if !added.is_empty() {
                    lines.push(format!("Deck gained: {}", added.join(", ")));
                }
                if !removed.is_empty() {
                    lines.push(format!("Deck lost: {}", removed.join(", ")));
                }
                lines
            }
            Report::RunFinished => vec![String::new(), "Run finished".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::Rejection;
    use showdown_runtime::{BattleTally, Split};

    fn split() -> Report {
        Report::BattleFinished(Split {
            room: "Bamboo Grove, battle #2".into(),
            tally: Some(BattleTally {
                turns: 14,
                time: 95,
                hits: 1,
                potions_used: 0,
                combos: 2,
            }),
        })
    }

    #[test]
    fn splits_mode_keeps_only_won_battles() {
        let renderer = Renderer::new(false, true);
        assert!(renderer.render(&Report::MapEntered).is_empty());
        let lines = renderer.render(&split());
        assert_eq!(lines[0], "== Bamboo Grove, battle #2 ==");
        assert_eq!(lines[2], "Time taken: 01:35");
    }

    #[test]
    fn rejections_need_verbose_mode() {
        let report = Report::Unexplained {
            rejections: vec![Rejection {
                description: "Hero has waited a turn".into(),
                reason: "hero position differs".into(),
            }],
        };
        assert_eq!(Renderer::new(false, false).render(&report).len(), 1);
        let verbose = Renderer::new(true, false).render(&report);
        assert_eq!(verbose[1], "  - Hero has waited a turn: hero position differs");
    }
}
