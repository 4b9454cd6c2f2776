use praven_core::models::ProfileSource;
use praven_knowledge::{infer_family, KnowledgeBase};
use proptest::prelude::*;

fn kb() -> KnowledgeBase {
    KnowledgeBase::bundled().unwrap()
}

proptest! {
    /// Inference ignores case.
    #[test]
    fn inference_is_case_insensitive(name in "[A-Za-z -]{0,30}") {
        let kb = kb();
        prop_assert_eq!(
            infer_family(&kb, &name),
            infer_family(&kb, &name.to_uppercase())
        );
    }

    /// The inferred family is always the first rule, in table order, that matches.
    #[test]
    fn inferred_family_is_first_match(prefix in "[a-z ]{0,10}", idx in 0usize..30) {
        let kb = kb();
        let rules = kb.families();
        let rule = &rules[idx % rules.len()];
        let name = format!("{}{}", prefix, rule.patterns[0]);
        let inferred = infer_family(&kb, &name).unwrap();
        let inferred_pos = rules.iter().position(|r| r.name == inferred).unwrap();
        prop_assert!(inferred_pos <= idx % rules.len());
        for earlier in &rules[..inferred_pos] {
            prop_assert!(!earlier.matches_lowercase(&name.to_lowercase()));
        }
    }

    /// Purely numeric names match no pattern and resolve unknown.
    #[test]
    fn unmatched_names_resolve_unknown(n in 0u32..100_000) {
        let kb = kb();
        let name = format!("{n}");
        prop_assert_eq!(kb.resolve(&name).source, ProfileSource::Unknown);
    }
}
