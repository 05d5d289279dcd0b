//! Weapon profile table: how each weapon kind selects cells and what it does
//! to the targets it hits.
//!
//! Most weapons are plain strikes, described by a [`Targeting`] pattern and a
//! [`FollowUp`]. Weapons whose effect cannot be expressed that way (volleys,
//! chains, movement, summons) get a dedicated [`Execution`] the engine
//! dispatches on.

use super::kinds::WeaponKind;

// ============================================================================
// Targeting
// ============================================================================

/// How a striking weapon picks its target cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Targeting {
    /// Fixed offsets relative to the attacker, multiplied by its facing.
    Offsets(&'static [i32]),
    /// The first occupied cell ahead.
    FirstAhead,
    /// The last occupied cell ahead, scanning back from the board edge.
    LastAhead,
    /// The first target ahead plus whatever its push would collide with.
    Crossbow,
    /// The cell the hero stood on before acting.
    PreviousHeroCell,
    /// Every cell of the board.
    AllCells,
    /// Cells of enemies below their maximum HP.
    HurtEnemies,
}

// ============================================================================
// Follow-up
// ============================================================================

/// Positional side effect applied to each target after damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// Turns targets around.
    Flip,
    /// Pushes non-heavy targets away from the attacker.
    Push,
    /// Pushes the target one cell and the attacker one cell back.
    Recoil,
    /// Pulls a non-heavy target next to the attacker.
    Pull,
}

// ============================================================================
// Execution
// ============================================================================

/// Side of the attacker a directional move uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Ahead,
    Behind,
}

impl Side {
    /// Sign applied to the attacker's facing direction.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Ahead => 1,
            Self::Behind => -1,
        }
    }
}

/// Where a corrupted wave tile spawns its waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveSpawn {
    LeftToRight,
    RightToLeft,
    Barrage,
}

/// What executing a weapon does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// Hit the targeted cells, then resolve the aftermath.
    Strike(Targeting),
    /// Three kunai thrown one after another.
    Kunai,
    /// Chain that drags the hero forward after every kill.
    Hookblade,
    /// First target ahead within three cells, then the cell behind.
    MeteorHammer,
    /// First target ahead within three cells, exploding on a kill.
    BlazingSuisei,
    /// Nearest target on either side, growing with each kill.
    Chakram,
    SpawnWave(WaveSpawn),
    Trap,
    Bomb,
    Mirror,
    Dash,
    SwapToss,
    OriginOfSymmetry,
    BossSwap,
    SharpTurn,
    Charge(Side),
    ShadowDash(Side),
    SmokeBomb(Side),
    BossSummon,
    Thorns,
    Barricade,
    Curse,
    ShieldSelf,
    ShieldAlly,
    SignatureMove,
    /// Executes without a board effect.
    Inert,
    /// No simulated effect; the branch is abandoned.
    Unsimulatable,
}

/// Complete description of a weapon kind's behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponProfile {
    pub execution: Execution,
    pub follow_up: FollowUp,
    /// Coins spent each time the weapon is executed.
    pub coin_cost: i32,
}

impl WeaponProfile {
    const fn new(execution: Execution) -> Self {
        Self {
            execution,
            follow_up: FollowUp::None,
            coin_cost: 0,
        }
    }

    const fn strike(targeting: Targeting) -> Self {
        Self::new(Execution::Strike(targeting))
    }

    const fn then(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = follow_up;
        self
    }

    const fn costing(mut self, coins: i32) -> Self {
        self.coin_cost = coins;
        self
    }
}

const AHEAD: &[i32] = &[1];
const BEHIND: &[i32] = &[-1];
const BOTH_SIDES: &[i32] = &[-1, 1];
const LINE_OF_TWO: &[i32] = &[1, 2];
const WIDE_SWEEP: &[i32] = &[-2, -1, 1, 2];
const SPIKES: &[i32] = &[-2, 2];
const SECOND_CELL: &[i32] = &[2];

impl WeaponKind {
    /// Profile table entry for this kind.
    pub const fn profile(self) -> WeaponProfile {
        use Execution as E;
        use Targeting as T;
        use WeaponKind as W;
        match self {
            // melee
            W::Katana | W::Sai | W::Tetsubo | W::BladeOfPatience => WeaponProfile::strike(T::Offsets(AHEAD)),
            W::Bo => WeaponProfile::strike(T::Offsets(AHEAD)).then(FollowUp::Flip),
            W::DragonPunch => WeaponProfile::strike(T::Offsets(AHEAD)).then(FollowUp::Push),
            W::Spear => WeaponProfile::strike(T::Offsets(LINE_OF_TWO)),
            W::BackStrike => WeaponProfile::strike(T::Offsets(BEHIND)),
            W::Swirl => WeaponProfile::strike(T::Offsets(BOTH_SIDES)),
            W::TwinTessen => WeaponProfile::strike(T::Offsets(BOTH_SIDES)).then(FollowUp::Push),
            W::Nagiboku => WeaponProfile::strike(T::Offsets(WIDE_SWEEP)),

            // ranged
            W::Arrow | W::Shuriken => WeaponProfile::strike(T::FirstAhead),
            W::GrapplingHook => WeaponProfile::strike(T::FirstAhead).then(FollowUp::Pull),
            W::KiPush => WeaponProfile::strike(T::FirstAhead).then(FollowUp::Push),
            W::Tanegashima => WeaponProfile::strike(T::FirstAhead).then(FollowUp::Recoil),
            W::Mon => WeaponProfile::strike(T::FirstAhead).costing(1),
            W::Lightning => WeaponProfile::strike(T::LastAhead),
            W::EarthImpale => WeaponProfile::strike(T::Offsets(SPIKES)),
            W::ShadowKama => WeaponProfile::strike(T::Offsets(SECOND_CELL)),
            W::Crossbow => WeaponProfile::strike(T::Crossbow),
            W::Volley => WeaponProfile::strike(T::PreviousHeroCell),
            W::Chakram => WeaponProfile::new(E::Chakram),

            // global
            W::CorruptedExplosion => WeaponProfile::strike(T::AllCells),
            W::ScarStrike => WeaponProfile::strike(T::HurtEnemies),

            // hazards
            W::CorruptedWaveLtr => WeaponProfile::new(E::SpawnWave(WaveSpawn::LeftToRight)),
            W::CorruptedWaveRtl => WeaponProfile::new(E::SpawnWave(WaveSpawn::RightToLeft)),
            W::CorruptedBarrage => WeaponProfile::new(E::SpawnWave(WaveSpawn::Barrage)),
            W::Trap => WeaponProfile::new(E::Trap),
            W::Bomb => WeaponProfile::new(E::Bomb),

            // movement
            W::Mirror => WeaponProfile::new(E::Mirror),
            W::Dash => WeaponProfile::new(E::Dash),
            W::SwapToss => WeaponProfile::new(E::SwapToss),
            W::OriginOfSymmetry => WeaponProfile::new(E::OriginOfSymmetry),
            W::BossSwap => WeaponProfile::new(E::BossSwap),

            // move and attack
            W::SharpTurn => WeaponProfile::new(E::SharpTurn),
            W::Charge => WeaponProfile::new(E::Charge(Side::Ahead)),
            W::BackCharge => WeaponProfile::new(E::Charge(Side::Behind)),
            W::ShadowDash => WeaponProfile::new(E::ShadowDash(Side::Ahead)),
            W::BackShadowDash => WeaponProfile::new(E::ShadowDash(Side::Behind)),
            W::SmokeBomb => WeaponProfile::new(E::SmokeBomb(Side::Ahead)),
            W::BackSmokeBomb => WeaponProfile::new(E::SmokeBomb(Side::Behind)),

            // summons
            W::BossSummon => WeaponProfile::new(E::BossSummon),
            W::Thorns => WeaponProfile::new(E::Thorns),
            W::Barricade => WeaponProfile::new(E::Barricade),

            // special
            W::Kunai => WeaponProfile::new(E::Kunai),
            W::Hookblade => WeaponProfile::new(E::Hookblade),
            W::MeteorHammer => WeaponProfile::new(E::MeteorHammer),
            W::BlazingSuisei => WeaponProfile::new(E::BlazingSuisei),
            W::Curse => WeaponProfile::new(E::Curse),
            W::ShieldSelf => WeaponProfile::new(E::ShieldSelf),
            W::ShieldAlly => WeaponProfile::new(E::ShieldAlly),
            W::SignatureMove => WeaponProfile::new(E::SignatureMove),
            W::Maku | W::CopycatMirror => WeaponProfile::new(E::Inert),

            W::KillSummons
            | W::CorruptedWave
            | W::Explosion
            | W::Shock
            | W::PoisonTick
            | W::Stop
            | W::Any => WeaponProfile::new(E::Unsimulatable),

            // the signature push travels through the push auxiliary
            W::Push => WeaponProfile::new(E::Unsimulatable).then(FollowUp::Push),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn push_weapons_share_the_push_follow_up() {
        for kind in [WeaponKind::DragonPunch, WeaponKind::TwinTessen, WeaponKind::KiPush, WeaponKind::Push] {
            assert_eq!(kind.profile().follow_up, FollowUp::Push, "{kind}");
        }
    }

    #[test]
    fn only_mon_costs_coins() {
        let costly: Vec<_> = WeaponKind::iter().filter(|kind| kind.profile().coin_cost > 0).collect();
        assert_eq!(costly, vec![WeaponKind::Mon]);
    }

    #[test]
    fn nagiboku_sweeps_both_sides() {
        assert_eq!(
            WeaponKind::Nagiboku.profile().execution,
            Execution::Strike(Targeting::Offsets(&[-2, -1, 1, 2]))
        );
    }

    #[test]
    fn auxiliary_weapons_are_not_executable() {
        for kind in [WeaponKind::Shock, WeaponKind::Explosion, WeaponKind::KillSummons] {
            assert_eq!(kind.profile().execution, Execution::Unsimulatable);
        }
    }
}
