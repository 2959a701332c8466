//! Bayesian confidence scoring — Beta-Binomial posteriors, momentum, decay,
//! and credible-interval tiers over aggregated patterns.

pub mod beta;
pub mod scorer;
pub mod types;

pub use scorer::{ConfidenceScorer, FeedbackStore, ScorerConfig};
pub use types::{ConfidenceScore, ConfidenceTier, MomentumDirection};
