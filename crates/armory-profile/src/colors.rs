//! Class display colors
//!
//! The canonical class palette, keyed by the class display name after
//! normalization (lower-cased, spaces and common Latin accents stripped, so
//! localized names still have a chance to match).

/// Canonical class colors
const CLASS_COLORS: &[(&str, &str)] = &[
    ("warrior", "#C79C6E"),
    ("paladin", "#F58CBA"),
    ("hunter", "#ABD473"),
    ("rogue", "#FFF569"),
    ("priest", "#FFFFFF"),
    ("deathknight", "#C41F3B"),
    ("shaman", "#0070DE"),
    ("mage", "#69CCF0"),
    ("warlock", "#9482C9"),
    ("monk", "#00FF96"),
    ("druid", "#FF7D0A"),
    ("demonhunter", "#A330C9"),
    ("evoker", "#33937F"),
];

/// Fallback for class names not in the palette
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Display color for a class name. Unknown names fall back to white; this
/// never fails.
pub fn class_color(name: &str) -> &'static str {
    let normalized = normalize_name(name);
    CLASS_COLORS
        .iter()
        .find(|&&(key, _)| key == normalized)
        .map_or(FALLBACK_COLOR, |&(_, color)| color)
}

/// Lower-case a display name and strip spaces and common Latin accents.
pub(crate) fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_accent)
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        other => other,
    }
}
