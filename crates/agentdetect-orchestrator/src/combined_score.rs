//! The combined-score composition and verdict derivation (spec.md §4.5).

use agentdetect_core::types::Verdict;

fn add_capped(score: u32, delta: u32) -> u32 {
    std::cmp::min(100, score + delta)
}

/// Folds the interaction, injection, fingerprint and agent sub-scores
/// into the single combined score, exactly per spec.md §4.5's integer
/// composition (every running addition saturates at 100).
pub fn combined_score(
    interaction_score: u32,
    injection_score: u32,
    fingerprint_score: u32,
    agent_score: u32,
) -> u32 {
    let mut score = interaction_score;

    if injection_score >= 50 {
        score = add_capped(score, 25);
    } else if injection_score >= 25 {
        score = add_capped(score, 15);
    } else if injection_score >= 10 {
        score = add_capped(score, 5);
    }

    if fingerprint_score >= 70 {
        score = add_capped(score, 30);
    } else if fingerprint_score >= 40 {
        score = add_capped(score, 15);
    } else if fingerprint_score >= 20 {
        score = add_capped(score, 5);
    }

    if agent_score >= 70 {
        score = std::cmp::max(score, 80);
        score = add_capped(score, 10);
    } else if agent_score >= 40 {
        score = add_capped(score, 15);
    } else if agent_score >= 20 {
        score = add_capped(score, 5);
    }

    std::cmp::min(score, 100)
}

pub fn verdict_for(score: u32) -> Verdict {
    Verdict::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_everything_is_zero() {
        assert_eq!(combined_score(0, 0, 0, 0), 0);
    }

    #[test]
    fn saturates_at_one_hundred() {
        assert_eq!(combined_score(100, 100, 100, 100), 100);
    }

    #[test]
    fn high_agent_score_floors_combined_at_eighty_then_adds_ten() {
        // interaction alone is low, but a high agent score forces the floor
        // before its own +10 is applied.
        assert_eq!(combined_score(0, 0, 0, 80), 90);
    }

    #[test]
    fn moderate_agent_score_adds_fifteen_without_flooring() {
        assert_eq!(combined_score(10, 0, 0, 50), 25);
    }

    #[test]
    fn each_tier_boundary_is_inclusive() {
        assert_eq!(combined_score(0, 50, 0, 0), 25);
        assert_eq!(combined_score(0, 49, 0, 0), 15);
        assert_eq!(combined_score(0, 70, 0, 0), 0); // injection has no 70 tier
        assert_eq!(combined_score(0, 0, 70, 0), 30);
        assert_eq!(combined_score(0, 0, 40, 0), 15);
        assert_eq!(combined_score(0, 0, 20, 0), 5);
    }

    #[test]
    fn verdict_thresholds_match_core() {
        assert_eq!(verdict_for(80), Verdict::HighConfidenceAgent);
        assert_eq!(verdict_for(19), Verdict::LikelyHuman);
    }
}
