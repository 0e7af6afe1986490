//! Rule engine for section ordering.
//!
//! Composes multiple section rules with configurable evaluation modes
//! and tie-breaking strategies. Sorting is stable: sections the rules
//! cannot tell apart keep their creation order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{RuleScore, SectionRule};
use crate::models::{Section, SectionSet};

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Keep creation order (default).
    #[default]
    CreationOrder,
    /// Deterministic by section id (lexicographic).
    ById,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn SectionRule>,
    weight: f64,
}

/// A composable rule engine for section ordering.
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (creation order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::CreationOrder,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: SectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: SectionRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, used only in Sequential mode).
    pub fn with_tie_breaker<R: SectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Returns indices into `sections.as_slice()` in visiting order.
    pub fn sort_indices(&self, sections: &SectionSet) -> Vec<usize> {
        let slice = sections.as_slice();
        let mut indices: Vec<usize> = (0..slice.len()).collect();

        match &self.mode {
            EvaluationMode::Sequential => {
                let scores: Vec<Vec<RuleScore>> = slice
                    .iter()
                    .map(|s| self.rules.iter().map(|wr| wr.rule.evaluate(s, sections)).collect())
                    .collect();
                indices.sort_by(|&a, &b| {
                    self.compare_scores(&scores[a], &scores[b])
                        .then_with(|| self.break_tie(&slice[a], &slice[b]))
                });
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = slice
                    .iter()
                    .map(|s| self.weighted_score(s, sections))
                    .collect();
                indices.sort_by(|&a, &b| {
                    scores[a]
                        .partial_cmp(&scores[b])
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| self.break_tie(&slice[a], &slice[b]))
                });
            }
        }

        indices
    }

    /// Evaluates a single section and returns weighted scores from each rule.
    pub fn evaluate(&self, section: &Section, sections: &SectionSet) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(section, sections) * wr.weight)
            .collect()
    }

    fn compare_scores(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (sa, sb) in a.iter().zip(b) {
            if (sa - sb).abs() > self.epsilon {
                return sa.partial_cmp(sb).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn break_tie(&self, a: &Section, b: &Section) -> Ordering {
        match &self.tie_breaker {
            TieBreaker::CreationOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }

    fn weighted_score(&self, section: &Section, sections: &SectionSet) -> f64 {
        self.evaluate(section, sections).iter().sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
