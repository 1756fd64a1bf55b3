//! Deficiency label normalization
//!
//! The prediction service returns fine-grained labels ("Vitamin B12
//! Deficiency"); meal plans exist only for coarse keys ("B-Vitamin").

/// Label fragments grouped under the B-vitamin plan.
const B_VITAMIN_MARKERS: &[&str] = &["B1", "B2", "B3", "B9", "B12"];

/// Label fragments grouped under the protein/mineral plan.
const PROTEIN_MINERAL_MARKERS: &[&str] = &["IRON", "ZINC", "BIOTIN", "PROTEIN"];

/// Planner key for B-vitamin subtypes.
pub const B_VITAMIN_KEY: &str = "B-Vitamin";

/// Planner key for iron, zinc, biotin and protein.
pub const PROTEIN_MINERAL_KEY: &str = "Protein-Mineral";

/// Key used by the profile page when a record has no label.
pub const FALLBACK_PROFILE_KEY: &str = "VitaminA";

/// Map a deficiency label to the planner key used in `/planner/:vitamin`.
///
/// `"Vitamin B12 Deficiency"` → `"B-Vitamin"`, `"Iron deficiency"` →
/// `"Protein-Mineral"`, `"Vitamin C deficiency"` → `"VitaminC"`.
pub fn planner_key(deficiency: &str) -> String {
    let upper = deficiency.to_uppercase();

    if B_VITAMIN_MARKERS.iter().any(|m| upper.contains(m)) {
        return B_VITAMIN_KEY.to_string();
    }
    if PROTEIN_MINERAL_MARKERS.iter().any(|m| upper.contains(m)) {
        return PROTEIN_MINERAL_KEY.to_string();
    }

    strip_whitespace(&remove_first_ignore_case(deficiency, " deficiency"))
}

/// Form of a history label compared against a requested planner key:
/// first "deficiency" removed, whitespace stripped, lowercased.
pub fn history_match_key(deficiency: &str) -> String {
    strip_label(deficiency).to_lowercase()
}

/// Whether any history label normalizes to `vitamin` (case-insensitive).
pub fn matches_history<'a, I>(vitamin: &str, deficiencies: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = vitamin.to_lowercase();
    deficiencies
        .into_iter()
        .any(|label| history_match_key(label) == wanted)
}

/// Planner key behind the "View Planner" link of a profile history entry.
///
/// Normalized like [`history_match_key`], so the link always finds the
/// record it came from.
pub fn profile_planner_key(deficiency: &str) -> String {
    let key = strip_label(deficiency);
    if key.is_empty() {
        return FALLBACK_PROFILE_KEY.to_string();
    }
    key
}

/// First "deficiency" (any case) removed, whitespace stripped.
fn strip_label(deficiency: &str) -> String {
    strip_whitespace(&remove_first_ignore_case(deficiency, "deficiency"))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Remove the first ASCII case-insensitive occurrence of `needle`.
fn remove_first_ignore_case(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    match lower.find(&needle.to_ascii_lowercase()) {
        Some(start) => {
            let mut out = String::with_capacity(haystack.len());
            out.push_str(&haystack[..start]);
            out.push_str(&haystack[start + needle.len()..]);
            out
        }
        None => haystack.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Vitamin B1 Deficiency")]
    #[case("vitamin b2 deficiency")]
    #[case("Vitamin B3")]
    #[case("Vitamin B9 (Folate) Deficiency")]
    #[case("Vitamin B12 Deficiency")]
    fn test_b_vitamins_group(#[case] label: &str) {
        assert_eq!(planner_key(label), B_VITAMIN_KEY);
    }

    #[rstest]
    #[case("Iron Deficiency")]
    #[case("zinc deficiency")]
    #[case("Biotin Deficiency")]
    #[case("Protein Deficiency")]
    fn test_protein_minerals_group(#[case] label: &str) {
        assert_eq!(planner_key(label), PROTEIN_MINERAL_KEY);
    }

    #[rstest]
    #[case("Vitamin C deficiency", "VitaminC")]
    #[case("Vitamin A Deficiency", "VitaminA")]
    #[case("Vitamin D", "VitaminD")]
    #[case("Unknown Deficiency", "Unknown")]
    #[case("  Vitamin  E  ", "VitaminE")]
    fn test_passthrough_strips_suffix_and_whitespace(#[case] label: &str, #[case] key: &str) {
        assert_eq!(planner_key(label), key);
    }

    #[test]
    fn test_history_matching_is_case_insensitive() {
        let labels = ["Vitamin C Deficiency", "Vitamin D Deficiency"];
        assert!(matches_history("VitaminC", labels.iter().copied()));
        assert!(matches_history("vitamind", labels.iter().copied()));
        assert!(!matches_history("VitaminA", labels.iter().copied()));
        assert!(!matches_history("VitaminC", std::iter::empty()));
    }

    #[rstest]
    #[case("Vitamin C Deficiency", "VitaminC")]
    #[case("Vitamin C deficiency", "VitaminC")]
    #[case("VITAMIN C DEFICIENCY", "VITAMINC")]
    #[case("", FALLBACK_PROFILE_KEY)]
    #[case("  Deficiency ", FALLBACK_PROFILE_KEY)]
    fn test_profile_key(#[case] label: &str, #[case] key: &str) {
        assert_eq!(profile_planner_key(label), key);
    }

    #[rstest]
    #[case("Vitamin C Deficiency")]
    #[case("Vitamin C deficiency")]
    #[case("vitamin d DEFICIENCY")]
    #[case("Iron Deficiency")]
    fn test_profile_key_matches_its_own_record(#[case] label: &str) {
        let key = profile_planner_key(label);
        assert!(matches_history(&key, [label]));
    }
}
