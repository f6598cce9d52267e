use crate::config::TeamAlias;
use std::collections::HashMap;

/// Mascots that ESPN-style and logo-file team names carry after the school
/// ("Duke Blue Devils", "Long Beach St. 49ers"), kept sorted. Multi-word
/// entries must beat their one-word tails ("GOLDEN EAGLES" over "EAGLES"),
/// which [`strip_mascot`] handles by taking the longest match. `BEACH` is left
/// out: it would eat half of "Long Beach".
const MASCOT_SUFFIXES: &[&str] = &[
    "49ERS",
    "AGGIES",
    "ANTEATERS",
    "ANTELOPES",
    "AZTECS",
    "BADGERS",
    "BEACONS",
    "BEARCATS",
    "BEARKATS",
    "BEARS",
    "BEAVERS",
    "BENGALS",
    "BIG GREEN",
    "BIG RED",
    "BILLIKENS",
    "BISON",
    "BISONS",
    "BLACK BEARS",
    "BLACK KNIGHTS",
    "BLACKBIRDS",
    "BLAZERS",
    "BLUE DEMONS",
    "BLUE DEVILS",
    "BLUE HENS",
    "BLUE HOSE",
    "BLUE RAIDERS",
    "BLUEJAYS",
    "BOBCATS",
    "BOILERMAKERS",
    "BONNIES",
    "BRAVES",
    "BRONCOS",
    "BRONCS",
    "BRUINS",
    "BUCCANEERS",
    "BUCKEYES",
    "BUFFALOES",
    "BULLDOGS",
    "BULLS",
    "CARDINAL",
    "CARDINALS",
    "CATAMOUNTS",
    "CAVALIERS",
    "CHANTICLEERS",
    "CHARGERS",
    "CHIPPEWAS",
    "COLONELS",
    "COLONIALS",
    "COMMODORES",
    "CORNHUSKERS",
    "COUGARS",
    "COWBOYS",
    "CRIMSON",
    "CRIMSON TIDE",
    "CRUSADERS",
    "CYCLONES",
    "DELTA DEVILS",
    "DEMON DEACONS",
    "DEMONS",
    "DOLPHINS",
    "DONS",
    "DRAGONS",
    "DUCKS",
    "DUKES",
    "EAGLES",
    "EXPLORERS",
    "FALCONS",
    "FIGHTING CAMELS",
    "FIGHTING HAWKS",
    "FIGHTING ILLINI",
    "FIGHTING IRISH",
    "FLAMES",
    "FLYERS",
    "FRIARS",
    "GAELS",
    "GAMECOCKS",
    "GATORS",
    "GAUCHOS",
    "GOLDEN BEARS",
    "GOLDEN EAGLES",
    "GOLDEN FLASHES",
    "GOLDEN GOPHERS",
    "GOLDEN GRIFFINS",
    "GOLDEN GRIZZLIES",
    "GOLDEN HURRICANE",
    "GOLDEN LIONS",
    "GOVERNORS",
    "GREAT DANES",
    "GREEN WAVE",
    "GREYHOUNDS",
    "GRIFFINS",
    "GRIZZLIES",
    "HATTERS",
    "HAWKEYES",
    "HAWKS",
    "HIGHLANDERS",
    "HILLTOPPERS",
    "HOKIES",
    "HOOSIERS",
    "HORNED FROGS",
    "HORNETS",
    "HOYAS",
    "HURRICANES",
    "HUSKIES",
    "ISLANDERS",
    "JACKRABBITS",
    "JAGUARS",
    "JASPERS",
    "JAYHAWKS",
    "KEYDETS",
    "KNIGHTS",
    "LAKERS",
    "LANCERS",
    "LEATHERNECKS",
    "LEOPARDS",
    "LIONS",
    "LOBOS",
    "LONGHORNS",
    "LOPES",
    "LUMBERJACKS",
    "MASTODONS",
    "MATADORS",
    "MAVERICKS",
    "MEAN GREEN",
    "MIDSHIPMEN",
    "MINERS",
    "MINUTEMEN",
    "MOCS",
    "MONARCHS",
    "MOUNTAIN HAWKS",
    "MOUNTAINEERS",
    "MUSKETEERS",
    "MUSTANGS",
    "NITTANY LIONS",
    "NORSE",
    "ORANGE",
    "OSPREYS",
    "OWLS",
    "PALADINS",
    "PANTHERS",
    "PATRIOTS",
    "PEACOCKS",
    "PENGUINS",
    "PHOENIX",
    "PILOTS",
    "PIONEERS",
    "PIRATES",
    "PRIDE",
    "PRIVATEERS",
    "PURPLE ACES",
    "PURPLE EAGLES",
    "QUAKERS",
    "RACERS",
    "RAGIN CAJUNS",
    "RAIDERS",
    "RAINBOW WARRIORS",
    "RAMBLERS",
    "RAMS",
    "RATTLERS",
    "RAZORBACKS",
    "REBELS",
    "RED FLASH",
    "RED FOXES",
    "RED RAIDERS",
    "RED STORM",
    "RED WOLVES",
    "REDBIRDS",
    "REDHAWKS",
    "RETRIEVERS",
    "REVOLUTIONARIES",
    "RIVER HAWKS",
    "ROADRUNNERS",
    "ROCKETS",
    "ROOS",
    "ROYALS",
    "RUNNIN BULLDOGS",
    "RUNNIN REBELS",
    "SAINTS",
    "SALUKIS",
    "SCARLET KNIGHTS",
    "SCREAMING EAGLES",
    "SEAHAWKS",
    "SEAWOLVES",
    "SEMINOLES",
    "SHARKS",
    "SHOCKERS",
    "SKYHAWKS",
    "SOONERS",
    "SPARTANS",
    "SPIDERS",
    "STAGS",
    "SUN DEVILS",
    "SYCAMORES",
    "TAR HEELS",
    "TERRAPINS",
    "TERRIERS",
    "TEXANS",
    "THUNDERBIRDS",
    "THUNDERING HERD",
    "TIGERS",
    "TITANS",
    "TOMMIES",
    "TOREROS",
    "TRAILBLAZERS",
    "TRIBE",
    "TRITONS",
    "TROJANS",
    "UTES",
    "VANDALS",
    "VAQUEROS",
    "VIKINGS",
    "VOLUNTEERS",
    "WARHAWKS",
    "WARRIORS",
    "WAVES",
    "WILDCATS",
    "WOLF PACK",
    "WOLFPACK",
    "WOLVERINES",
    "WOLVES",
    "YELLOW JACKETS",
    "ZIPS",
];

/// Emoji, pictographs, dingbats and the joiners/selectors that glue them.
fn is_decoration(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE0F | 0x200D
    )
}

/// Drop emoji badges, a leading rank and extra whitespace:
/// `"12. Duke 🔥"` -> `"Duke"`.
pub fn strip_decorations(name: &str) -> String {
    let cleaned: String = name.chars().filter(|&c| !is_decoration(c)).collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    match strip_rank(&collapsed) {
        Some(rest) => rest.to_string(),
        None => collapsed,
    }
}

/// `"12. Duke"` -> `"Duke"`. Needs digits, a dot and something after them,
/// so `"1."` alone is kept.
fn strip_rank(name: &str) -> Option<&str> {
    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = name[digits..].strip_prefix('.')?.trim_start();
    (!rest.is_empty()).then_some(rest)
}

/// Longest mascot suffix that ends the name on a word boundary and leaves a
/// non-empty school name.
fn strip_mascot(name: &str) -> &str {
    let mut best: Option<&str> = None;
    let mut best_len = 0;
    for suffix in MASCOT_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            if !stripped.ends_with(' ') {
                continue;
            }
            let stripped = stripped.trim_end();
            if !stripped.is_empty() && suffix.len() > best_len {
                best = Some(stripped);
                best_len = suffix.len();
            }
        }
    }
    best.unwrap_or(name)
}

/// Join key for team names from different sources.
///
/// `"Michigan St."`, `"Michigan State"` and `"Michigan State Spartans"` all
/// give `"MICHIGANSTATE"`; `"St. John's"` and `"Saint John's"` both give
/// `"SAINTJOHNS"`. A trailing `ST` means State, anywhere else Saint.
pub fn name_key(name: &str) -> String {
    let upper = strip_decorations(name)
        .to_uppercase()
        .replace('&', " AND ")
        .replace('-', " ");
    let cleaned: String = upper
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let tokens: Vec<&str> = strip_mascot(&collapsed).split_whitespace().collect();
    let last = tokens.len().saturating_sub(1);
    let expanded: Vec<&str> = tokens
        .iter()
        .enumerate()
        .map(|(i, &tok)| match tok {
            "ST" if i == last && i > 0 => "STATE",
            "ST" => "SAINT",
            other => other,
        })
        .collect();

    expanded.concat()
}

/// URL-safe lowercase slug: `"Texas A&M"` -> `"texas-a-m"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in strip_decorations(name).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if c == '\'' || c == '.' {
            continue;
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Name key -> canonical display name. Built once from configuration and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    by_key: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn from_entries(entries: &[TeamAlias]) -> Self {
        let mut by_key = HashMap::new();
        for entry in entries {
            let canonical = strip_decorations(&entry.canonical);
            for name in std::iter::once(&entry.canonical).chain(entry.aliases.iter()) {
                let key = name_key(name);
                if key.is_empty() {
                    continue;
                }
                if let Some(existing) = by_key.get(&key) {
                    if existing != &canonical {
                        tracing::warn!(
                            alias = %name,
                            existing = %existing,
                            ignored = %canonical,
                            "team alias maps to two canonical names, keeping the first"
                        );
                    }
                    continue;
                }
                by_key.insert(key, canonical.clone());
            }
        }
        Self { by_key }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.by_key.get(&name_key(name)).map(String::as_str)
    }

    /// Canonical name if known, otherwise the input without decorations.
    pub fn resolve(&self, name: &str) -> String {
        match self.canonical(name) {
            Some(canonical) => canonical.to_string(),
            None => strip_decorations(name),
        }
    }
}
