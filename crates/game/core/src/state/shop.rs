//! Shops and the tile upgrades sold in shops and reward rooms.

use super::skills::SkillKind;

/// Tile upgrades offered by shops and reward rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::FromRepr, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Upgrade {
    #[strum(to_string = "+1 damage, +1 cooldown")]
    DamageWithCooldown = 100,
    #[strum(to_string = "+1 damage")]
    Damage = 101,
    #[strum(to_string = "-1 cooldown")]
    Cooldown = 102,
    #[strum(to_string = "-2 cooldown")]
    CooldownTwo = 103,
    #[strum(to_string = "-4 cooldown for -1 damage")]
    CooldownForDamage = 104,
    #[strum(to_string = "+2 damage for +3 cooldown")]
    DamageForCooldown = 105,
    #[strum(to_string = "Ice")]
    Ice = 201,
    #[strum(to_string = "Poison")]
    Poison = 202,
    #[strum(to_string = "Double Strike")]
    DoubleStrike = 203,
    #[strum(to_string = "Perfect Strike")]
    PerfectStrike = 204,
    #[strum(to_string = "Curse")]
    Curse = 205,
    #[strum(to_string = "Immediate")]
    Immediate = 300,
    #[strum(to_string = "Sacrifice Tile")]
    SacrificeTile = 400,
    #[strum(to_string = "Warrior's Gamble")]
    WarriorsGamble = 401,
    #[strum(to_string = "+1 slot")]
    PlusSlot = 500,
    #[strum(to_string = "+1 slot, -1 cooldown")]
    PlusSlotMinusCooldown = 501,
}

impl Upgrade {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// `0` means nothing is on offer.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub fn describe(code: i32) -> String {
        match Self::from_code(code) {
            Some(upgrade) => upgrade.to_string(),
            None => format!("Unknown upgrade {code}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopService {
    #[strum(serialize = "RerollForHp")]
    RerollForHp,
    #[strum(serialize = "BloodExchange")]
    MoneyForHp,
    #[strum(serialize = "FullHealForSkulls")]
    FullHealForSkulls,
    #[strum(serialize = "SkullsForCoins")]
    MoneyForSkulls,
}

impl ShopService {
    pub const fn price(self) -> i32 {
        match self {
            Self::RerollForHp => 1,
            Self::MoneyForHp => 2,
            Self::FullHealForSkulls => 35,
            Self::MoneyForSkulls => 70,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RerollForHp => "Restock Shop",
            Self::MoneyForHp => "Blood Exchange",
            Self::FullHealForSkulls => "Bone Soup",
            Self::MoneyForSkulls => "Skull Money",
        }
    }

    pub const fn currency(self) -> &'static str {
        match self {
            Self::RerollForHp | Self::MoneyForHp => "HP",
            Self::FullHealForSkulls | Self::MoneyForSkulls => "skulls",
        }
    }
}

const SKILL_ITEMS: &[(&str, SkillKind)] = &[
    ("UnfriendlyFireShopItem", SkillKind::UnfriendlyFire),
    ("MindfulnessShopItem", SkillKind::Mindfulness),
    ("SniperShopItem", SkillKind::Sniper),
    ("BackStabberShopItem", SkillKind::BackStabber),
    ("CentralDominionShopItem", SkillKind::CentralDominion),
    ("ComboCoinShopItem", SkillKind::ComboCoin),
    ("TripleComboHealShopItem", SkillKind::TripleComboHeal),
    ("ComboCurseShopItem", SkillKind::ComboCurse),
    ("DamagingMoveShopItem", SkillKind::DamagingMove),
    ("RogueRetailShopItem", SkillKind::RogueRetail),
    ("BigPocketsShopItem", SkillKind::BigPockets),
    ("MonomancerShopItem", SkillKind::Monomancer),
    ("CloseCombatShopItem", SkillKind::CloseCombat),
    ("OddCurseShopItem", SkillKind::OddCurse),
    ("ComboRechargeShopItem", SkillKind::ComboRecharge),
    ("ComboDealShopItem", SkillKind::ComboDeal),
    ("KobushiComboShopItem", SkillKind::KobushiCombo),
    ("ComboBoonShopItem", SkillKind::ComboBoon),
    ("ChillingComboShopItem", SkillKind::ChillingCombo),
    ("HealthyShopItem", SkillKind::Healthy),
    ("FortressShopItem", SkillKind::Fortress),
    ("ReactiveShieldShopItem", SkillKind::ReactiveShield),
    ("ShieldRetentionShopItem", SkillKind::ShieldRetention),
    ("KarmaShopItem", SkillKind::Karma),
    ("ChillingBloodShopItem", SkillKind::ChillingBlood),
    ("IronSkinShopItem", SkillKind::IronSkin),
    ("OverflowGuardShopItem", SkillKind::OverflowGuard),
    ("TwoWayMoveShopItem", SkillKind::TwoWayMove),
    ("QuickRecoveryShopItem", SkillKind::QuickRecovery),
    ("DynamicBoostShopItem", SkillKind::DynamicBoost),
    ("CursingMoveShopItem", SkillKind::CursingMove),
    ("ChikaraCrushShopItem", SkillKind::ChikaraCrush),
    ("MamushiMoveShopItem", SkillKind::MamushiMove),
    ("TwoFacedDangerShopItem", SkillKind::TwoFacedDanger),
    ("FenghuangsFeatherShopItem", SkillKind::FenghuangsFeather),
    ("SeiryusScaleShopItem", SkillKind::SeiryusScale),
];

const EDAMAME_ITEM: &str = "EdamameBrewShopItem";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopItemKind {
    Skill(SkillKind),
    EdamameBrew,
    Service(ShopService),
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    /// Item name as written in the save file.
    pub code: String,
    pub kind: ShopItemKind,
    /// `-1` when the price is not known.
    pub price: i32,
    pub on_sale: bool,
}

impl ShopItem {
    /// Item for a save-file code, priced for its sale status.
    pub fn from_code(code: &str, on_sale: bool) -> Self {
        let kind = if code == EDAMAME_ITEM {
            ShopItemKind::EdamameBrew
        } else if let Ok(service) = code.parse::<ShopService>() {
            ShopItemKind::Service(service)
        } else if let Some((_, skill)) = SKILL_ITEMS.iter().find(|(item, _)| *item == code) {
            ShopItemKind::Skill(*skill)
        } else {
            ShopItemKind::Unknown
        };
        let full_price = match kind {
            ShopItemKind::Skill(skill) => skill.price().unwrap_or(-1),
            ShopItemKind::EdamameBrew => 5,
            ShopItemKind::Service(service) => service.price(),
            ShopItemKind::Unknown => -1,
        };
        let price = match (on_sale, kind) {
            (false, _) => full_price,
            (true, ShopItemKind::Skill(_)) => full_price / 2,
            (true, ShopItemKind::EdamameBrew) => 2,
            (true, ShopItemKind::Service(_)) => 1,
            (true, ShopItemKind::Unknown) => full_price,
        };
        Self {
            code: code.to_string(),
            kind,
            price,
            on_sale,
        }
    }

    pub fn service(&self) -> Option<ShopService> {
        match self.kind {
            ShopItemKind::Service(service) => Some(service),
            _ => None,
        }
    }

    fn name(&self) -> String {
        match self.kind {
            ShopItemKind::Skill(skill) => skill.to_string(),
            ShopItemKind::EdamameBrew => "Edamame Brew".into(),
            ShopItemKind::Service(service) => service.name().into(),
            ShopItemKind::Unknown => format!("Unknown Item \"{}\"", self.code),
        }
    }

    fn currency(&self) -> &'static str {
        self.service().map_or("coins", ShopService::currency)
    }

    pub fn pretty(&self) -> String {
        let sale = if self.on_sale { " (sale!)" } else { "" };
        format!("{} ({} {}{sale})", self.name(), self.price, self.currency())
    }

    pub fn purchase(&self) -> String {
        format!("Purchased {} for {} {}", self.name(), self.price, self.currency())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopType {
    #[strum(serialize = "DamageUpgrade")]
    Damage,
    #[strum(serialize = "CooldownUpgrade")]
    Cooldown,
    #[strum(serialize = "SacrificeTile")]
    Sacrifice,
    #[strum(serialize = "WarriorGamble")]
    WarriorsGamble,
    #[strum(serialize = "WarringShop")]
    Warring,
    #[strum(serialize = "ComboShop")]
    Combo,
    #[strum(serialize = "DancerShop")]
    Dancer,
    #[strum(serialize = "GuardingShop")]
    Guarding,
    #[strum(serialize = "MaxLevelUpgrade")]
    Slot,
    #[strum(serialize = "EnchantUpgrade")]
    Enchant,
    #[strum(serialize = "MoonlitPortShop")]
    MoonlitPort,
}

impl ShopType {
    pub fn save_name(self) -> &'static str {
        self.into()
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Damage => "Damage",
            Self::Cooldown => "Cooldown",
            Self::Sacrifice => "Sacrifice Tile",
            Self::WarriorsGamble => "Warrior's Gamble",
            Self::Warring => "Warring",
            Self::Combo => "Combo",
            Self::Dancer => "Dancer",
            Self::Guarding => "Guarding",
            Self::Slot => "Slot Upgrade",
            Self::Enchant => "Enchant",
            Self::MoonlitPort => "Moonlit Port",
        }
    }
}

/// Shop locations on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopLocation {
    #[strum(serialize = "green-shop-1A")]
    BambooGroveUp,
    #[strum(serialize = "green-shop-1B")]
    BambooGroveDown,
    #[strum(serialize = "brown-shop-1A")]
    BeforeMoonlitPortUp,
    #[strum(serialize = "brown-shop-1B")]
    BeforeMoonlitPortCenter,
    #[strum(serialize = "brown-shop-1C")]
    BeforeMoonlitPortDown,
    #[strum(serialize = "brown-combat-2")]
    MoonlitPort,
    #[strum(serialize = "red-shop-1A")]
    SpiritGatewayUp,
    #[strum(serialize = "red-shop-1B")]
    SpiritGatewayDown,
    #[strum(serialize = "purple-shop-1A")]
    ForsakenLandsUp,
    #[strum(serialize = "purple-shop-1B")]
    ForsakenLandsDown,
    #[strum(serialize = "white-shop-1")]
    Hideyoshi,
    #[strum(serialize = "gray-shop-1")]
    Nobunaga,
    #[strum(serialize = "darkGreen-shop-1")]
    Ieiasu,
    #[strum(serialize = "shogun-shop-1")]
    Shogun,
}

impl ShopLocation {
    pub fn location_id(self) -> &'static str {
        self.into()
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BambooGroveUp | Self::BambooGroveDown => "Shop after Bamboo Grove",
            Self::BeforeMoonlitPortUp | Self::BeforeMoonlitPortCenter | Self::BeforeMoonlitPortDown => {
                "Shop before Moonlit Port"
            }
            Self::MoonlitPort => "Moonlit Port shop",
            Self::SpiritGatewayUp | Self::SpiritGatewayDown => "Spirit Gateway shop",
            Self::ForsakenLandsUp | Self::ForsakenLandsDown => "Forsaken Lands shop",
            Self::Hideyoshi => "Shop before Hideyoshi's Keep",
            Self::Nobunaga => "Shop before Nobunaga's Fortress",
            Self::Ieiasu => "Shop before Ieiasu's Gardens",
            Self::Shogun => "Shop before The Shogun's Castle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopRoom {
    pub location: ShopLocation,
    /// Left and right stall.
    pub types: [ShopType; 2],
    pub items: Vec<ShopItem>,
    /// Upgrade code on offer, `0` for none.
    pub upgrade: i32,
    pub upgrade_price: i32,
    pub already_upgraded: bool,
    pub free_potion: bool,
    pub exhausted: bool,
}

impl ShopRoom {
    pub fn pretty_shop(&self) -> String {
        format!("{} + {}", self.types[0].display_name(), self.types[1].display_name())
    }

    pub fn pretty_items(&self) -> Vec<String> {
        self.items.iter().map(ShopItem::pretty).collect()
    }

    /// Upgrade offer followed by every item.
    pub fn pretty_everything(&self) -> Vec<String> {
        let mut lines = vec![format!("{} ({} coins)", Upgrade::describe(self.upgrade), self.upgrade_price)];
        lines.extend(self.pretty_items());
        lines
    }

    pub fn service(&self) -> Option<ShopService> {
        self.items.iter().find_map(ShopItem::service)
    }
}
