//! The seeded truth history every case is judged against.

/// Lore statements that open every game path, in order.
pub const BASE_TRUTHS: [&str; 3] = [
    "The world is governed by the principle that Logic is Truth (L ≡ T).",
    "All established facts are immutable until logically proven otherwise.",
    "A character's identity is fundamentally linked to their accepted or rejected origin story.",
];

/// Number of entries in a seeded history: the base truths plus the category context.
pub const HISTORY_LEN: usize = BASE_TRUTHS.len() + 1;

/// The statement that scopes a case to its category.
#[must_use]
pub fn category_context(category: &str) -> String {
    format!("The current game context is focused on the '{category}' domain.")
}

/// Build a fresh truth history for one case.
#[must_use]
pub fn truth_history(category: &str) -> Vec<String> {
    let mut history = Vec::with_capacity(HISTORY_LEN);
    history.extend(BASE_TRUTHS.iter().map(|truth| (*truth).to_string()));
    history.push(category_context(category));
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Combat")]
    #[case("Social")]
    #[case("")]
    fn history_has_base_then_category(#[case] category: &str) {
        let history = truth_history(category);
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(&history[..3], &BASE_TRUTHS.map(String::from));
        assert_eq!(history[3], category_context(category));
    }

    #[test]
    fn histories_are_independent() {
        let mut first = truth_history("Combat");
        first.push("leaked".into());
        assert_eq!(truth_history("Combat").len(), HISTORY_LEN);
    }
}
