use regex::Regex;
use std::sync::OnceLock;

/// Deduplicated keyword set with stable insertion order. Order only matters
/// for display truncation; matching treats it as a plain set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    pub fn insert(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if !self.keywords.iter().any(|k| k == &keyword) {
            self.keywords.push(keyword);
        }
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.keywords
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(words: Vec<String>) -> Self {
        let mut set = Self::new();
        for word in words {
            set.insert(word);
        }
        set
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

/// Hand-curated mapping from colloquial (mostly Indonesian) trigger phrases
/// to the technical vocabulary used in the knowledge-base columns. A trigger
/// fires when it appears as a case-insensitive substring of the query, so
/// short triggers like "ac" can also fire inside unrelated words; that
/// imprecision is accepted in exchange for catching inflected forms
/// ("bergetarnya", "overheating").
static KEYWORD_MAPPINGS: &[(&str, &[&str])] = &[
    // Common symptoms
    ("bergetar", &["vibration", "getar", "bergetar", "getaran", "shaking"]),
    ("goyang", &["vibration", "goyang", "bergoyang", "wobble"]),
    ("bunyi", &["noise", "bunyi", "suara", "audio", "sound"]),
    ("berisik", &["noise", "berisik", "bising", "keras"]),
    ("panas", &["overheat", "panas", "hot", "temperature", "cooling"]),
    ("dingin", &["cold", "dingin", "ac", "cooling", "hvac"]),
    ("mati", &["stall", "mati", "dead", "tidak hidup", "won't start"]),
    ("tidak mau hidup", &["no start", "cranking", "starting", "ignition"]),
    ("susah hidup", &["hard start", "starting", "cranking"]),
    ("boros", &["fuel consumption", "boros", "irit", "fuel"]),
    ("irit", &["fuel efficiency", "irit", "hemat"]),
    ("asap", &["smoke", "asap", "exhaust", "emission"]),
    ("bocor", &["leak", "bocor", "kebocoran", "leaking"]),
    ("rembes", &["seepage", "rembes", "bocor halus"]),
    ("keras", &["hard", "keras", "stiff", "berat"]),
    ("berat", &["heavy", "berat", "keras", "stiff"]),
    ("ringan", &["light", "ringan", "loose"]),
    ("kendor", &["loose", "kendor", "longgar"]),
    ("bunyi cit", &["squeal", "cit", "squeak", "brake"]),
    ("bunyi duk", &["knock", "duk", "knocking", "engine"]),
    ("bunyi tek tek", &["clicking", "tek", "ticking"]),
    ("ngebul", &["smoke", "ngebul", "asap tebal"]),
    ("ngelitik", &["knock", "ping", "detonation", "ngelitik"]),
    ("brebet", &["misfire", "brebet", "tersendat"]),
    ("tersendat", &["hesitation", "tersendat", "stumble"]),
    ("ngadat", &["stall", "ngadat", "mati mendadak"]),
    ("ngempos", &["power loss", "ngempos", "loyo"]),
    ("loyo", &["weak", "loyo", "lemah", "power loss"]),
    ("bau", &["smell", "bau", "odor"]),
    ("bau gosong", &["burning smell", "gosong", "terbakar"]),
    ("bau bensin", &["fuel smell", "bensin", "gasoline"]),
    // Systems
    ("mesin", &["engine", "mesin", "motor"]),
    ("rem", &["brake", "rem", "braking"]),
    ("kopling", &["clutch", "kopling"]),
    ("transmisi", &["transmission", "gigi", "matic"]),
    ("matic", &["automatic", "matic", "transmission"]),
    ("manual", &["manual", "transmission"]),
    ("power steering", &["steering", "power steering", "kemudi"]),
    ("kemudi", &["steering", "kemudi", "stir"]),
    ("ac", &["hvac", "ac", "air conditioning", "cooling"]),
    ("lampu", &["light", "lampu", "electrical"]),
    ("aki", &["battery", "aki", "accu"]),
    ("alternator", &["charging", "alternator", "pengisian"]),
    ("radiator", &["cooling", "radiator", "pendingin"]),
    ("kipas", &["fan", "kipas", "cooling fan"]),
    ("oli", &["oil", "oli", "lubricant"]),
    ("bensin", &["fuel", "bensin", "gasoline"]),
    ("solar", &["diesel", "solar", "fuel"]),
    ("knalpot", &["exhaust", "knalpot", "muffler"]),
    ("suspensi", &["suspension", "suspensi", "shock"]),
    ("shock", &["suspension", "shock", "damper"]),
    ("per", &["spring", "per", "coil"]),
    ("ban", &["tire", "ban", "wheel"]),
    ("velg", &["wheel", "velg", "rim"]),
    // Specific components
    ("sensor", &["sensor", "detector"]),
    ("ecu", &["ecu", "ecm", "computer", "module"]),
    ("injector", &["injector", "injektor", "fuel injection"]),
    ("busi", &["spark plug", "busi", "ignition"]),
    ("coil", &["ignition coil", "coil", "koil"]),
    ("throttle", &["throttle", "gas", "accelerator"]),
    ("turbo", &["turbo", "turbocharger", "boost"]),
    ("catalytic", &["catalytic", "converter", "cat"]),
    ("oxygen sensor", &["o2 sensor", "oxygen", "lambda"]),
    ("maf", &["maf", "mass air flow", "sensor udara"]),
    ("map", &["map", "manifold pressure"]),
    ("tps", &["tps", "throttle position"]),
    ("ckp", &["ckp", "crankshaft position"]),
    ("cmp", &["cmp", "camshaft position"]),
    ("abs", &["abs", "anti-lock", "brake"]),
    ("airbag", &["srs", "airbag", "safety"]),
    // DTC prefixes
    ("p0", &["P0", "powertrain", "engine"]),
    ("p1", &["P1", "manufacturer", "powertrain"]),
    ("p2", &["P2", "powertrain"]),
    ("b0", &["B0", "body"]),
    ("c0", &["C0", "chassis"]),
    ("u0", &["U0", "network"]),
];

fn dtc_pattern() -> &'static Regex {
    static DTC: OnceLock<Regex> = OnceLock::new();
    DTC.get_or_init(|| Regex::new(r"(?i)[pbcu][0-9]{4}").unwrap())
}

/// Tokens of the lowercased query longer than two characters. Short tokens
/// ("di", "ke", "ac") carry almost no discriminative value against the
/// knowledge-base columns and are dropped as noise.
#[must_use]
pub fn query_tokens(natural_query: &str) -> Vec<String> {
    natural_query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(ToString::to_string)
        .collect()
}

/// Translate a free-text complaint into technical search keywords.
///
/// Total over all inputs: empty input yields an empty set, nothing fails.
/// Raw tokens stay lowercase, dictionary expansions are lowercased, DTC
/// matches are added uppercased on top (the code columns store them that
/// way), so a query like "P0300" ends up with both "p0300" and "P0300".
#[must_use]
pub fn translate(natural_query: &str) -> KeywordSet {
    let query = natural_query.to_lowercase();
    let mut keywords = KeywordSet::new();

    for word in query_tokens(natural_query) {
        keywords.insert(word);
    }

    for (trigger, expansions) in KEYWORD_MAPPINGS {
        if query.contains(trigger) {
            for expansion in *expansions {
                keywords.insert(expansion.to_lowercase());
            }
        }
    }

    for dtc in dtc_pattern().find_iter(natural_query) {
        keywords.insert(dtc.as_str().to_uppercase());
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: &KeywordSet) -> Vec<String> {
        let mut v: Vec<String> = set.as_slice().to_vec();
        v.sort();
        v
    }

    #[test]
    fn empty_query_yields_empty_set() {
        assert!(translate("").is_empty());
        assert!(translate("   \t  ").is_empty());
    }

    #[test]
    fn raw_tokens_longer_than_two_chars_are_kept() {
        let set = translate("di jalan mogok total");
        assert!(set.contains("mogok"));
        assert!(set.contains("total"));
        assert!(set.contains("jalan"));
        assert!(!set.contains("di"));
    }

    #[test]
    fn indonesian_symptom_expands_to_technical_terms() {
        let set = translate("mesin bergetar saat idle");

        for expected in [
            "vibration", "getar", "bergetar", "getaran", "shaking", "engine", "motor", "mesin",
            "saat", "idle",
        ] {
            assert!(set.contains(expected), "missing keyword {expected:?}");
        }
    }

    #[test]
    fn dtc_code_is_added_in_both_forms() {
        let set = translate("P0300");
        assert!(set.contains("p0300"), "raw lowercase token");
        assert!(set.contains("P0300"), "uppercased DTC match");

        // Lowercase input still triggers the DTC scan.
        let set = translate("kode p0171 muncul");
        assert!(set.contains("P0171"));
    }

    #[test]
    fn dtc_prefix_trigger_fires_on_full_codes() {
        let set = translate("P0300");
        assert!(set.contains("powertrain"));
        assert!(set.contains("p0"));
    }

    #[test]
    fn substring_trigger_can_fire_inside_words() {
        // "ac" appears inside "acara"; accepted false positive.
        let set = translate("ada acara besok");
        assert!(set.contains("hvac"));
    }

    #[test]
    fn translate_is_idempotent() {
        let a = translate("mesin panas dan rem bunyi cit P0128");
        let b = translate("mesin panas dan rem bunyi cit P0128");
        assert_eq!(sorted(&a), sorted(&b));
    }

    #[test]
    fn keyword_set_deduplicates_preserving_first_seen_order() {
        let mut set = KeywordSet::new();
        set.insert("engine");
        set.insert("brake");
        set.insert("engine");
        assert_eq!(set.as_slice(), ["engine".to_string(), "brake".to_string()]);
    }
}
