use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::errors::{PricecheckError, Result};

/// How the single capture of a pattern is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeKind {
    Integer,
    Decimal,
}

#[derive(Debug, Clone)]
pub struct AffixPattern {
    pub identifier: String,
    pub matcher: Regex,
    pub kind: MagnitudeKind,
}

impl AffixPattern {
    pub fn new(identifier: &str, pattern: &str, kind: MagnitudeKind) -> Result<Self> {
        let matcher = Regex::new(pattern).map_err(|e| PricecheckError::InvalidPattern {
            affix: identifier.to_string(),
            reason: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        if matcher.captures_len() != 2 {
            return Err(PricecheckError::InvalidPattern {
                affix: identifier.to_string(),
                reason: format!(
                    "expected exactly one capturing group, found {}",
                    matcher.captures_len() - 1
                ),
            });
        }

        Ok(Self {
            identifier: identifier.to_string(),
            matcher,
            kind,
        })
    }

    /// Returns the captured magnitude text if the whole line matches.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.matcher
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Ordered registry of affix matchers. The declared order is the canonical
/// feature-vector axis.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<AffixPattern>,
    index: HashMap<String, usize>,
}

static STANDARD_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    let entries = STANDARD_AFFIXES
        .iter()
        .map(|(id, pattern, kind)| (id.to_string(), pattern.to_string(), *kind));
    // The table is a compile-time constant; a bad entry is a programming error.
    PatternTable::new(entries).unwrap_or_else(|e| panic!("standard affix table is invalid: {e}"))
});

impl PatternTable {
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String, MagnitudeKind)>,
    {
        let mut patterns = Vec::new();
        let mut index = HashMap::new();

        for (identifier, pattern, kind) in entries {
            if index.contains_key(&identifier) {
                return Err(PricecheckError::DuplicateAffix(identifier));
            }
            index.insert(identifier.clone(), patterns.len());
            patterns.push(AffixPattern::new(&identifier, &pattern, kind)?);
        }

        Ok(Self { patterns, index })
    }

    /// The hand-curated jewel affix table, built once on first use.
    pub fn standard() -> &'static PatternTable {
        &STANDARD_TABLE
    }

    pub fn patterns_in_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(|p| p.identifier.as_str())
    }

    pub fn matcher_for(&self, identifier: &str) -> Option<&AffixPattern> {
        self.index.get(identifier).map(|&i| &self.patterns[i])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AffixPattern> + '_ {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

use MagnitudeKind::{Decimal, Integer};

const STANDARD_AFFIXES: &[(&str, &str, MagnitudeKind)] = &[
    // Generic damage
    ("Damage", r"^(\d+)% increased Damage$", Integer),
    ("Physical Damage", r"^(\d+)% increased Global Physical Damage$", Integer),
    ("Fire Damage", r"^(\d+)% increased Fire Damage$", Integer),
    ("Cold Damage", r"^(\d+)% increased Cold Damage$", Integer),
    ("Lightning Damage", r"^(\d+)% increased Lightning Damage$", Integer),
    ("Chaos Damage", r"^(\d+)% increased Chaos Damage$", Integer),
    ("Elemental Damage", r"^(\d+)% increased Elemental Damage$", Integer),
    ("Spell Damage", r"^(\d+)% increased Spell Damage$", Integer),
    ("Area Damage", r"^(\d+)% increased Area Damage$", Integer),
    ("Projectile Damage", r"^(\d+)% increased Projectile Damage$", Integer),
    ("Melee Damage", r"^(\d+)% increased Melee Damage$", Integer),
    ("Damage over Time", r"^(\d+)% increased Damage over Time$", Integer),
    ("Minion Damage", r"^Minions deal (\d+)% increased Damage$", Integer),
    ("Totem Damage", r"^(\d+)% increased Totem Damage$", Integer),
    ("Trap Damage", r"^(\d+)% increased Trap Damage$", Integer),
    ("Mine Damage", r"^(\d+)% increased Mine Damage$", Integer),
    (
        "Elemental Damage with Attack Skills",
        r"^(\d+)% increased Elemental Damage with Attack Skills$",
        Integer,
    ),
    (
        "Fire Damage with Attack Skills",
        r"^(\d+)% increased Fire Damage with Attack Skills$",
        Integer,
    ),
    (
        "Cold Damage with Attack Skills",
        r"^(\d+)% increased Cold Damage with Attack Skills$",
        Integer,
    ),
    (
        "Lightning Damage with Attack Skills",
        r"^(\d+)% increased Lightning Damage with Attack Skills$",
        Integer,
    ),
    // Weapon-class damage
    ("Physical Damage with Axes", r"^(\d+)% increased Physical Damage with Axes$", Integer),
    ("Physical Damage with Bows", r"^(\d+)% increased Physical Damage with Bows$", Integer),
    ("Physical Damage with Claws", r"^(\d+)% increased Physical Damage with Claws$", Integer),
    ("Physical Damage with Daggers", r"^(\d+)% increased Physical Damage with Daggers$", Integer),
    ("Physical Damage with Maces", r"^(\d+)% increased Physical Damage with Maces$", Integer),
    ("Physical Damage with Staves", r"^(\d+)% increased Physical Damage with Staves$", Integer),
    ("Physical Damage with Swords", r"^(\d+)% increased Physical Damage with Swords$", Integer),
    ("Physical Damage with Wands", r"^(\d+)% increased Physical Damage with Wands$", Integer),
    (
        "Physical Damage with Two Handed Melee Weapons",
        r"^(\d+)% increased Physical Damage with Two Handed Melee Weapons$",
        Integer,
    ),
    (
        "Physical Damage with One Handed Melee Weapons",
        r"^(\d+)% increased Physical Damage with One Handed Melee Weapons$",
        Integer,
    ),
    (
        "Physical Weapon Damage while Dual Wielding",
        r"^(\d+)% increased Physical Weapon Damage while Dual Wielding$",
        Integer,
    ),
    // Speed
    ("Attack Speed", r"^(\d+)% increased Attack Speed$", Integer),
    ("Cast Speed", r"^(\d+)% increased Cast Speed$", Integer),
    ("Attack Speed with Axes", r"^(\d+)% increased Attack Speed with Axes$", Integer),
    ("Attack Speed with Bows", r"^(\d+)% increased Attack Speed with Bows$", Integer),
    ("Attack Speed with Claws", r"^(\d+)% increased Attack Speed with Claws$", Integer),
    ("Attack Speed with Daggers", r"^(\d+)% increased Attack Speed with Daggers$", Integer),
    ("Attack Speed with Maces", r"^(\d+)% increased Attack Speed with Maces$", Integer),
    ("Attack Speed with Staves", r"^(\d+)% increased Attack Speed with Staves$", Integer),
    ("Attack Speed with Swords", r"^(\d+)% increased Attack Speed with Swords$", Integer),
    ("Attack Speed with Wands", r"^(\d+)% increased Attack Speed with Wands$", Integer),
    (
        "Attack Speed while holding a Shield",
        r"^(\d+)% increased Attack Speed while holding a Shield$",
        Integer,
    ),
    (
        "Attack Speed while Dual Wielding",
        r"^(\d+)% increased Attack Speed while Dual Wielding$",
        Integer,
    ),
    (
        "Cast Speed while Dual Wielding",
        r"^(\d+)% increased Cast Speed while Dual Wielding$",
        Integer,
    ),
    (
        "Cast Speed while holding a Shield",
        r"^(\d+)% increased Cast Speed while holding a Shield$",
        Integer,
    ),
    ("Projectile Speed", r"^(\d+)% increased Projectile Speed$", Integer),
    // Critical strikes
    (
        "Global Critical Strike Chance",
        r"^(\d+)% increased Global Critical Strike Chance$",
        Integer,
    ),
    (
        "Global Critical Strike Multiplier",
        r"^\+(\d+)% to Global Critical Strike Multiplier$",
        Integer,
    ),
    (
        "Critical Strike Chance for Spells",
        r"^(\d+)% increased Critical Strike Chance for Spells$",
        Integer,
    ),
    (
        "Critical Strike Multiplier for Spells",
        r"^\+(\d+)% to Critical Strike Multiplier for Spells$",
        Integer,
    ),
    (
        "Melee Critical Strike Chance",
        r"^(\d+)% increased Melee Critical Strike Chance$",
        Integer,
    ),
    (
        "Melee Critical Strike Multiplier",
        r"^\+(\d+)% to Melee Critical Strike Multiplier$",
        Integer,
    ),
    // Defences
    ("maximum Life", r"^(\d+)% increased maximum Life$", Integer),
    ("maximum Mana", r"^(\d+)% increased maximum Mana$", Integer),
    ("maximum Energy Shield", r"^(\d+)% increased maximum Energy Shield$", Integer),
    ("Armour", r"^(\d+)% increased Armour$", Integer),
    ("Evasion Rating", r"^(\d+)% increased Evasion Rating$", Integer),
    ("Chance to Block", r"^(\d+)% Chance to Block$", Integer),
    ("Chance to Block Spells", r"^(\d+)% Chance to Block Spells$", Integer),
    (
        "Life Regeneration",
        r"^(\d+(?:\.\d+)?)% of Life Regenerated per second$",
        Decimal,
    ),
    ("Mana Regeneration Rate", r"^(\d+)% increased Mana Regeneration Rate$", Integer),
    (
        "Energy Shield Recharge Rate",
        r"^(\d+)% increased Energy Shield Recharge Rate$",
        Integer,
    ),
    (
        "Life gained for each Enemy hit by Attacks",
        r"^\+(\d+) Life gained for each Enemy hit by your Attacks$",
        Integer,
    ),
    // Leech keeps the "0." inside the capture so the magnitude reads as written
    (
        "Life Leech",
        r"^(0\.\d+)% of Physical Attack Damage Leeched as Life$",
        Decimal,
    ),
    (
        "Mana Leech",
        r"^(0\.\d+)% of Physical Attack Damage Leeched as Mana$",
        Decimal,
    ),
    // Attributes
    ("Strength", r"^\+(\d+) to Strength$", Integer),
    ("Dexterity", r"^\+(\d+) to Dexterity$", Integer),
    ("Intelligence", r"^\+(\d+) to Intelligence$", Integer),
    ("all Attributes", r"^\+(\d+) to all Attributes$", Integer),
    ("Strength and Dexterity", r"^\+(\d+) to Strength and Dexterity$", Integer),
    ("Strength and Intelligence", r"^\+(\d+) to Strength and Intelligence$", Integer),
    ("Dexterity and Intelligence", r"^\+(\d+) to Dexterity and Intelligence$", Integer),
    ("Accuracy Rating", r"^\+(\d+) to Accuracy Rating$", Integer),
    // Resistances
    ("Fire Resistance", r"^\+(\d+)% to Fire Resistance$", Integer),
    ("Cold Resistance", r"^\+(\d+)% to Cold Resistance$", Integer),
    ("Lightning Resistance", r"^\+(\d+)% to Lightning Resistance$", Integer),
    ("Chaos Resistance", r"^\+(\d+)% to Chaos Resistance$", Integer),
    (
        "all Elemental Resistances",
        r"^\+(\d+)% to all Elemental Resistances$",
        Integer,
    ),
    (
        "Fire and Cold Resistances",
        r"^\+(\d+)% to Fire and Cold Resistances$",
        Integer,
    ),
    (
        "Fire and Lightning Resistances",
        r"^\+(\d+)% to Fire and Lightning Resistances$",
        Integer,
    ),
    (
        "Cold and Lightning Resistances",
        r"^\+(\d+)% to Cold and Lightning Resistances$",
        Integer,
    ),
    // Minions, totems, utility
    ("Minion Life", r"^Minions have (\d+)% increased maximum Life$", Integer),
    (
        "Minion Attack and Cast Speed",
        r"^Minions have (\d+)% increased Attack Speed and Cast Speed$",
        Integer,
    ),
    ("Totem Life", r"^(\d+)% increased Totem Life$", Integer),
    ("Area of Effect", r"^(\d+)% increased Area of Effect$", Integer),
    ("Stun Duration", r"^(\d+)% increased Stun Duration on Enemies$", Integer),
    ("Flask Charges gained", r"^(\d+)% increased Flask Charges gained$", Integer),
    ("Flask Effect Duration", r"^(\d+)% increased Flask effect duration$", Integer),
    ("Chance to Ignite", r"^(\d+)% chance to Ignite$", Integer),
    ("Chance to Freeze", r"^(\d+)% chance to Freeze$", Integer),
    ("Chance to Shock", r"^(\d+)% chance to Shock$", Integer),
];
