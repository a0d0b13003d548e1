//! Generate human-readable explanations for recommendations.
//!
//! Explanations are presentational; nothing here feeds back into scoring.

use super::{Explanation, ScoringStrategy};
use learnhub_core::{Game, Profile, SurveyTag};

const FALLBACK_REASON: &str = "provides a good overall learning experience";

/// Explain each selected game, in the order given.
pub fn explain(profile: &Profile, games: &[Game]) -> Vec<Explanation> {
    games
        .iter()
        .map(|game| {
            let reasons = matched_reasons(profile, game);
            Explanation {
                game_id: game.id.clone(),
                text: sentence(&game.name, &reasons),
                reasons,
            }
        })
        .collect()
}

/// Check each dimension in fixed order: age, style, needs, interests,
/// attention, experience.
fn matched_reasons(profile: &Profile, game: &Game) -> Vec<String> {
    let features = &game.features;
    let mut reasons = Vec::new();

    if let Some(group) = profile.age_group {
        let fits = if features.age_groups.is_empty() {
            game.age_range.contains(&group.years())
        } else {
            features.age_groups.contains(&group)
        };
        if fits {
            reasons.push(format!("is designed for your age group ({group})"));
        }
    }

    if let Some(style) = profile.learning_style {
        if features.learning_styles.contains(&style) {
            reasons.push(format!("supports your {style} learning style"));
        }
    }

    let supported: Vec<&str> = profile
        .declared_special_needs()
        .into_iter()
        .filter(|need| features.special_needs.contains(need))
        .map(|need| need.as_str())
        .collect();
    if !supported.is_empty() {
        reasons.push(format!("provides support for {}", supported.join(", ")));
    }

    let shared: Vec<&str> = profile
        .interests
        .iter()
        .filter(|interest| features.interests.iter().any(|tag| tag == *interest))
        .map(String::as_str)
        .collect();
    if !shared.is_empty() {
        reasons.push(format!("aligns with your interests in {}", shared.join(", ")));
    }

    if let (Some(span), Some(required)) = (profile.attention_span, features.attention_span) {
        if span == required {
            reasons.push(format!("is well-suited for your {span} attention span"));
        }
    }

    if let (Some(level), Some(required)) = (profile.previous_experience, features.experience) {
        if level == required {
            reasons.push(format!("matches your {level} experience level"));
        }
    }

    reasons
}

/// "`name` was recommended because it a, b and c."
fn sentence(name: &str, reasons: &[String]) -> String {
    let body = match reasons {
        [] => FALLBACK_REASON.to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    };
    format!("{name} was recommended because it {body}.")
}

/// Generate a summary of one recommendation cycle.
pub fn summarize_recommendations(
    count: usize,
    strategy: ScoringStrategy,
    fell_back: bool,
) -> String {
    let mut parts = Vec::new();

    let noun = if count == 1 { "game" } else { "games" };
    parts.push(format!("Recommended {count} {noun}"));
    parts.push(format!("scored by the {} scorer", strategy.label()));

    if fell_back {
        parts.push("learned scorer unavailable".to_string());
    }

    parts.join(", ")
}
