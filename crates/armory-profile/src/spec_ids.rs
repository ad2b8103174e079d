//! Specialization name to id lookup
//!
//! Static table for resolving a specialization id from its display name,
//! used when a roster entry stores only the spec name. Names shared across
//! classes (Frost, Restoration, Holy, Protection) resolve to the entry the
//! bare name historically pointed at; the suffixed forms (`Frost Mage`,
//! `Restoration Shaman`, `Holy Paladin`, `Protection Paladin`) disambiguate.

use crate::colors::normalize_name;

const SPEC_IDS: &[(&str, u32)] = &[
    // Death Knight
    ("blood", 250),
    ("unholy", 252),
    ("frostdeathknight", 251),
    // Demon Hunter
    ("havoc", 577),
    ("vengeance", 581),
    // Druid
    ("balance", 102),
    ("feral", 103),
    ("guardian", 104),
    ("restorationdruid", 105),
    // Hunter
    ("beastmastery", 253),
    ("marksmanship", 254),
    ("survival", 255),
    // Mage
    ("arcane", 62),
    ("fire", 63),
    ("frost", 64),
    ("frostmage", 64),
    // Monk
    ("brewmaster", 268),
    ("windwalker", 269),
    ("mistweaver", 270),
    // Paladin
    ("holypaladin", 65),
    ("protectionpaladin", 66),
    ("retribution", 70),
    // Priest
    ("discipline", 256),
    ("holy", 257),
    ("shadow", 258),
    // Rogue
    ("assassination", 259),
    ("outlaw", 260),
    ("subtlety", 261),
    // Shaman
    ("elemental", 262),
    ("enhancement", 263),
    ("restoration", 264),
    ("restorationshaman", 264),
    // Warlock
    ("affliction", 265),
    ("demonology", 266),
    ("destruction", 267),
    // Warrior
    ("arms", 71),
    ("fury", 72),
    ("protection", 73),
];

/// Resolve a specialization id from its display name. Lookup ignores case,
/// spaces, and accents; unknown names return `None`.
pub fn spec_id_by_name(name: &str) -> Option<u32> {
    let normalized = normalize_name(name);
    SPEC_IDS
        .iter()
        .find(|&&(key, _)| key == normalized)
        .map(|&(_, id)| id)
}
