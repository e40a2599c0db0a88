//! Load balancing strategy definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Endpoint selection strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancingStrategy {
    /// Cycle through eligible endpoints
    #[default]
    RoundRobin,
    /// Random pick weighted by configured weight, latency, success rate and load
    WeightedRoundRobin,
    /// Fewest in-flight requests, ties by response time
    LeastConnections,
    /// Lowest average response time, ties by success rate
    FastestResponse,
    /// Cheapest for the request's token budget, ties by response time
    LowestCost,
}

impl LoadBalancingStrategy {
    pub const ALL: [LoadBalancingStrategy; 5] = [
        LoadBalancingStrategy::RoundRobin,
        LoadBalancingStrategy::WeightedRoundRobin,
        LoadBalancingStrategy::LeastConnections,
        LoadBalancingStrategy::FastestResponse,
        LoadBalancingStrategy::LowestCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadBalancingStrategy::RoundRobin => "round_robin",
            LoadBalancingStrategy::WeightedRoundRobin => "weighted_round_robin",
            LoadBalancingStrategy::LeastConnections => "least_connections",
            LoadBalancingStrategy::FastestResponse => "fastest_response",
            LoadBalancingStrategy::LowestCost => "lowest_cost",
        }
    }
}

impl fmt::Display for LoadBalancingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadBalancingStrategy {
    type Err = String;

    /// Accepts `least_connections`, `least-connections` and `LeastConnections`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().replace('_', "") == normalized)
            .ok_or_else(|| format!("unknown load balancing strategy: {}", s))
    }
}
