//! Weapon identities and effect enums keyed by their save-file codes.
//!
//! Player tiles use the game's own codes. Enemy-only tiles and the auxiliary
//! weapons the engine fabricates (traps, shocks, explosions) take codes outside
//! the player range so every kind round-trips through an `i32`.

/// Every tile the engine can execute or reason about.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum WeaponKind {
    // ===== player tiles =====
    #[strum(to_string = "Arrow")]
    Arrow = 1,
    #[strum(to_string = "Spear")]
    Spear = 2,
    #[strum(to_string = "Bo")]
    Bo = 3,
    #[strum(to_string = "Lightning")]
    Lightning = 4,
    #[strum(to_string = "Swirl")]
    Swirl = 5,
    #[strum(to_string = "Dragon Punch")]
    DragonPunch = 6,
    #[strum(to_string = "Grappling Hook")]
    GrapplingHook = 7,
    #[strum(to_string = "Twin Tessen")]
    TwinTessen = 8,
    #[strum(to_string = "Trap")]
    Trap = 9,
    #[strum(to_string = "Charge")]
    Charge = 12,
    #[strum(to_string = "Smoke Bomb")]
    SmokeBomb = 15,
    #[strum(to_string = "Nagiboku")]
    Nagiboku = 17,
    #[strum(to_string = "Chakram")]
    Chakram = 19,
    #[strum(to_string = "Earth Impale")]
    EarthImpale = 22,
    #[strum(to_string = "Mirror")]
    Mirror = 23,
    #[strum(to_string = "Shadow Kama")]
    ShadowKama = 25,
    #[strum(to_string = "Crossbow")]
    Crossbow = 31,
    #[strum(to_string = "Swap Toss")]
    SwapToss = 32,
    #[strum(to_string = "Tanegashima")]
    Tanegashima = 34,
    #[strum(to_string = "Scar Strike")]
    ScarStrike = 37,
    #[strum(to_string = "Meteor Hammer")]
    MeteorHammer = 39,
    #[strum(to_string = "Ki Push")]
    KiPush = 40,
    #[strum(to_string = "Back Shadow Dash")]
    BackShadowDash = 45,
    #[strum(to_string = "Sai")]
    Sai = 46,
    #[strum(to_string = "Mon")]
    Mon = 48,
    #[strum(to_string = "Katana")]
    Katana = -1,
    #[strum(to_string = "Tetsubo")]
    Tetsubo = -2,
    #[strum(to_string = "Blade of Patience")]
    BladeOfPatience = -3,
    #[strum(to_string = "Hookblade")]
    Hookblade = -4,
    #[strum(to_string = "Back Strike")]
    BackStrike = -6,
    #[strum(to_string = "Blazing Suisei")]
    BlazingSuisei = -10,
    #[strum(to_string = "Shuriken")]
    Shuriken = -11,
    #[strum(to_string = "Kunai")]
    Kunai = -13,
    #[strum(to_string = "Thorns")]
    Thorns = -18,
    #[strum(to_string = "Shadow Dash")]
    ShadowDash = -19,
    #[strum(to_string = "Back Charge")]
    BackCharge = -20,
    #[strum(to_string = "Back Smoke Bomb")]
    BackSmokeBomb = -21,
    #[strum(to_string = "Curse")]
    Curse = -22,
    #[strum(to_string = "Sharp Turn")]
    SharpTurn = -23,
    #[strum(to_string = "Signature Move")]
    SignatureMove = -24,
    #[strum(to_string = "Dash")]
    Dash = -26,
    #[strum(to_string = "Origin of Symmetry")]
    OriginOfSymmetry = -27,

    // ===== enemy tiles =====
    #[strum(to_string = "Volley")]
    Volley = 100,
    #[strum(to_string = "Bomb")]
    Bomb = 101,
    #[strum(to_string = "Summon")]
    BossSummon = 102,
    #[strum(to_string = "Boss Swap")]
    BossSwap = 103,
    #[strum(to_string = "Barricade")]
    Barricade = 104,
    #[strum(to_string = "Copycat Mirror")]
    CopycatMirror = 105,
    #[strum(to_string = "Maku")]
    Maku = 106,
    #[strum(to_string = "Shield Ally")]
    ShieldAlly = 107,
    #[strum(to_string = "Shield")]
    ShieldSelf = 108,
    #[strum(to_string = "Corrupted Wave")]
    CorruptedWaveLtr = 109,
    #[strum(to_string = "Corrupted Wave")]
    CorruptedWaveRtl = 110,
    #[strum(to_string = "Corrupted Barrage")]
    CorruptedBarrage = 111,
    #[strum(to_string = "Corrupted Explosion")]
    CorruptedExplosion = 112,
    #[strum(to_string = "Kill Summons")]
    KillSummons = 113,

    // ===== auxiliary weapons =====
    #[strum(to_string = "Corrupted Wave")]
    CorruptedWave = -1001,
    #[strum(to_string = "Explosion")]
    Explosion = -1002,
    #[strum(to_string = "Shock")]
    Shock = -1003,
    #[strum(to_string = "Poison")]
    PoisonTick = -1004,
    #[strum(to_string = "Collision")]
    Stop = -1005,
    #[strum(to_string = "Push")]
    Push = -1006,
    #[strum(to_string = "Any")]
    Any = -1007,
}

impl WeaponKind {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}

/// On-hit effect carried by a tile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum AttackEffect {
    #[strum(to_string = "Ice")]
    Ice = 1,
    #[strum(to_string = "Double Strike")]
    DoubleStrike = 2,
    #[strum(to_string = "Shockwave")]
    Shockwave = 3,
    #[strum(to_string = "Poison")]
    Poison = 4,
    #[strum(to_string = "Perfect Strike")]
    PerfectStrike = 5,
    #[strum(to_string = "Curse")]
    Curse = 666,
}

impl AttackEffect {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}

/// Effect that changes how a tile enters the queue.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum TileEffect {
    #[strum(to_string = "Immediate")]
    Immediate = 1,
}

impl TileEffect {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}
