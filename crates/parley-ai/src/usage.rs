//! Running token and cost totals for one session.

use crate::TokenUsage;

/// Cumulative metering. Totals only ever grow; start over by creating or
/// restoring a session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageStats {
    total_tokens: u64,
    total_cost: f64,
    /// Exchanges that reported usage.
    exchanges: u64,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metering of one completed exchange, priced at
    /// `cost_per_1k_tokens` USD.
    pub fn record(&mut self, usage: &TokenUsage, cost_per_1k_tokens: f64) {
        let tokens = usage.total_tokens();
        self.total_tokens = self.total_tokens.saturating_add(tokens);
        let cost = tokens as f64 / 1000.0 * cost_per_1k_tokens;
        if cost.is_finite() && cost > 0.0 {
            self.total_cost += cost;
        }
        self.exchanges += 1;
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Estimated cost in USD.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }

    /// Fold another session's totals into this one.
    pub fn absorb(&mut self, other: &UsageStats) {
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
        self.total_cost += other.total_cost;
        self.exchanges += other.exchanges;
    }
}
