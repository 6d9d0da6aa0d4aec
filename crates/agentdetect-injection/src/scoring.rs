//! Groups raw findings by `(type, name)` and applies spec.md §4.3's
//! scoring formula.

use std::collections::HashMap;

use crate::finding::InjectionFinding;

/// `maxWeight × (1 + 0.2 × (min(count,5) - 1))` per group, summed, then
/// `min(100, round(sum / 50 × 100))`.
pub fn score(findings: &[InjectionFinding]) -> u32 {
    if findings.is_empty() {
        return 0;
    }

    let mut groups: HashMap<(&'static str, &str), (u8, u32)> = HashMap::new();
    for finding in findings {
        let entry = groups
            .entry((finding.type_, finding.name.as_str()))
            .or_insert((finding.weight, 0));
        entry.0 = entry.0.max(finding.weight);
        entry.1 += 1;
    }

    let sum: f64 = groups
        .values()
        .map(|(max_weight, count)| {
            let capped_count = (*count).min(5) as f64;
            (*max_weight as f64) * (1.0 + 0.2 * (capped_count - 1.0))
        })
        .sum();

    let normalized = (sum / 50.0) * 100.0;
    std::cmp::min(100, normalized.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(type_: &'static str, name: &str, weight: u8) -> InjectionFinding {
        InjectionFinding::new(type_, name, weight)
    }

    #[test]
    fn no_findings_scores_zero() {
        assert_eq!(score(&[]), 0);
    }

    #[test]
    fn single_finding_uses_its_own_weight() {
        let findings = vec![f("text", "text.get_answer", 8)];
        let expected = std::cmp::min(100, ((8.0 / 50.0) * 100.0).round() as u32);
        assert_eq!(score(&findings), expected);
    }

    #[test]
    fn repeated_findings_in_same_group_get_count_multiplier_capped_at_five() {
        let many: Vec<InjectionFinding> = (0..10).map(|_| f("text", "text.get_answer", 8)).collect();
        let five: Vec<InjectionFinding> = (0..5).map(|_| f("text", "text.get_answer", 8)).collect();
        assert_eq!(score(&many), score(&five));
    }

    #[test]
    fn score_never_exceeds_one_hundred() {
        let findings: Vec<InjectionFinding> = (0..20)
            .map(|i| f("attribute", Box::leak(format!("attribute.kind{i}").into_boxed_str()), 10))
            .collect();
        assert_eq!(score(&findings), 100);
    }

    #[test]
    fn distinct_names_score_as_independent_groups() {
        let findings = vec![f("text", "text.a", 6), f("text", "text.b", 6)];
        let single = vec![f("text", "text.a", 6)];
        assert!(score(&findings) > score(&single));
    }

    use proptest::prelude::*;

    proptest! {
        /// The normalized score is a percentage, whatever the input.
        #[test]
        fn score_is_always_in_range(
            names in prop::collection::vec(0u8..6, 0..40),
            weights in prop::collection::vec(1u8..=10, 0..40),
        ) {
            let n = names.len().min(weights.len());
            let findings: Vec<InjectionFinding> = (0..n)
                .map(|i| f("attribute", &format!("attribute.kind{}", names[i]), weights[i]))
                .collect();
            let result = score(&findings);
            prop_assert!(result <= 100);
        }
    }
}
