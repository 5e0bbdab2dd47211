use std::collections::HashSet;

use crate::models::{LeadScore, LeadSignals, ScoreBreakdown, ScoringWeights};

/// Keywords that mark an urgent purchase timeline
const URGENCY_KEYWORDS: [&str; 5] = ["immediate", "asap", "urgent", "now", "quick"];

/// Sub-score used when a lead has no signal for a factor
///
/// A lead with no history must not be penalized as if it had negative
/// engagement.
const NEUTRAL: f64 = 0.5;

/// Computes a single priority score in [0, 1] from five weighted
/// behavioral sub-scores
///
/// # Scoring formula
/// score = (
///     response_time * 0.30 +       # Faster responders score higher
///     engagement_level * 0.20 +    # More distinct activity types
///     property_interest * 0.20 +   # Breadth and depth of browsing
///     budget_alignment * 0.15 +    # Budget close to viewed prices
///     timeline * 0.15              # Urgency keywords in the timeline
/// )
#[derive(Debug, Clone)]
pub struct LeadScorer {
    weights: ScoringWeights,
}

impl LeadScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score a lead's behavioral signals
    ///
    /// The final score is clamped to [0, 1] regardless of intermediate
    /// rounding.
    pub fn score(&self, lead_id: &str, signals: &LeadSignals) -> LeadScore {
        let breakdown = ScoreBreakdown {
            response_time: score_response_time(signals),
            engagement_level: score_engagement(signals),
            property_interest: score_property_interest(signals),
            budget_alignment: score_budget_alignment(signals),
            timeline: score_timeline(signals),
        };

        let total = breakdown.response_time * self.weights.response_time
            + breakdown.engagement_level * self.weights.engagement
            + breakdown.property_interest * self.weights.property_interest
            + breakdown.budget_alignment * self.weights.budget_alignment
            + breakdown.timeline * self.weights.timeline;

        LeadScore {
            lead_id: lead_id.to_string(),
            score: total.clamp(0.0, 1.0),
            breakdown,
        }
    }
}

impl Default for LeadScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Faster responders score closer to 1, monotonically decreasing in the
/// average latency
#[inline]
fn score_response_time(signals: &LeadSignals) -> f64 {
    if signals.response_times.is_empty() {
        return NEUTRAL;
    }

    let avg = signals.response_times.iter().sum::<f64>() / signals.response_times.len() as f64;
    1.0 / (1.0 + avg)
}

/// Distinct activity types, normalized against five
#[inline]
fn score_engagement(signals: &LeadSignals) -> f64 {
    if signals.activities.is_empty() {
        return NEUTRAL;
    }

    let distinct: HashSet<&str> = signals
        .activities
        .iter()
        .map(|a| a.activity_type.as_str())
        .collect();

    (distinct.len() as f64 / 5.0).min(1.0)
}

/// Rewards both breadth and depth of listing browsing
#[inline]
fn score_property_interest(signals: &LeadSignals) -> f64 {
    if signals.viewed_properties.is_empty() {
        return NEUTRAL;
    }

    let total_view_time: f64 = signals.viewed_properties.iter().map(|v| v.view_time).sum();
    ((signals.viewed_properties.len() as f64 * total_view_time) / 1000.0).min(1.0)
}

/// Budget proximity to the average viewed price
///
/// A zero budget yields the neutral default instead of dividing by zero.
#[inline]
fn score_budget_alignment(signals: &LeadSignals) -> f64 {
    if signals.viewed_properties.is_empty() || signals.budget <= 0.0 {
        return NEUTRAL;
    }

    let avg_price = signals.viewed_properties.iter().map(|v| v.price).sum::<f64>()
        / signals.viewed_properties.len() as f64;
    let price_diff = (signals.budget - avg_price).abs();

    1.0 / (1.0 + price_diff / signals.budget)
}

/// Fraction of the urgency keyword set found in the free-text timeline
#[inline]
fn score_timeline(signals: &LeadSignals) -> f64 {
    if signals.timeline.is_empty() {
        return NEUTRAL;
    }

    let timeline = signals.timeline.to_lowercase();
    let hits = URGENCY_KEYWORDS
        .iter()
        .filter(|keyword| timeline.contains(**keyword))
        .count();

    (hits as f64 / URGENCY_KEYWORDS.len() as f64).min(1.0)
}
