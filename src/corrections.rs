//! Literal text substitutions applied to every cue line.
//!
//! The table is data rather than logic: deployments swap in their own
//! find/replace pairs (typically recurring transcription errors for names
//! the recognizer has never heard of). Rules run in order, all occurrences,
//! case-sensitive, so an earlier rule may rewrite text a later rule would
//! otherwise have matched.

pub type Correction = (&'static str, &'static str);

/// Default rule set, carried over from the recordings this tool was built
/// around.
pub const DEFAULT_CORRECTIONS: &[Correction] = &[
    ("McCauley", "McCallie"),
    ("Catherine", "Katharine"),
    ("Chicago coal", "Chicago cold"),
    ("HIROX", "High Rocks"),
];

/// Apply every rule in order to `text`.
pub fn apply(text: &str, rules: &[Correction]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |text, (find, replace)| {
            text.replace(find, replace)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_all_occurrences() {
        let fixed = apply("McCauley met McCauley", DEFAULT_CORRECTIONS);
        assert_eq!(fixed, "McCallie met McCallie");
    }

    #[test]
    fn rules_apply_in_order() {
        // An earlier rule may produce text a later rule then picks up.
        let rules: &[Correction] = &[("colour", "color"), ("color scheme", "palette")];
        assert_eq!(apply("colour scheme", rules), "palette");
    }

    #[test]
    fn untouched_text_passes_through() {
        assert_eq!(apply("nothing to fix", DEFAULT_CORRECTIONS), "nothing to fix");
    }
}
