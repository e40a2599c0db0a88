//! Load balancer
//!
//! Picks one eligible endpoint client per request. Selection never blocks:
//! strategies work on metric snapshots and the round-robin cursor is atomic.

use super::metrics::InFlightGuard;
use super::strategy::LoadBalancingStrategy;
use super::strategy_impl::{self, Candidate};
use crate::core::endpoint::EndpointClient;
use crate::core::types::CompletionRequest;
use crate::services::pricing::CostTable;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tracing::debug;

/// A chosen endpoint plus the in-flight slot counted against it
#[derive(Debug)]
pub struct Selection {
    client: Arc<EndpointClient>,
    _guard: InFlightGuard,
}

impl Selection {
    fn new(client: Arc<EndpointClient>) -> Self {
        let guard = InFlightGuard::new(Arc::clone(client.metrics()));
        Self {
            client,
            _guard: guard,
        }
    }

    pub fn client(&self) -> &Arc<EndpointClient> {
        &self.client
    }

    pub fn endpoint_id(&self) -> &str {
        self.client.id()
    }
}

#[derive(Debug)]
pub struct LoadBalancer {
    endpoints: Vec<Arc<EndpointClient>>,
    strategy: LoadBalancingStrategy,
    cursor: AtomicUsize,
    costs: CostTable,
}

impl LoadBalancer {
    pub fn new(endpoints: Vec<Arc<EndpointClient>>, strategy: LoadBalancingStrategy) -> Self {
        Self::with_costs(endpoints, strategy, CostTable::default())
    }

    pub fn with_costs(
        endpoints: Vec<Arc<EndpointClient>>,
        strategy: LoadBalancingStrategy,
        costs: CostTable,
    ) -> Self {
        Self {
            endpoints,
            strategy,
            cursor: AtomicUsize::new(0),
            costs,
        }
    }

    pub fn strategy(&self) -> LoadBalancingStrategy {
        self.strategy
    }

    pub fn endpoints(&self) -> &[Arc<EndpointClient>] {
        &self.endpoints
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn get(&self, endpoint_id: &str) -> Option<&Arc<EndpointClient>> {
        self.endpoints.iter().find(|c| c.id() == endpoint_id)
    }

    /// Endpoints that are enabled and healthy right now
    pub fn eligible(&self) -> Vec<&Arc<EndpointClient>> {
        self.endpoints.iter().filter(|c| c.is_eligible()).collect()
    }

    /// Choose an endpoint for `request`, or `None` when nothing is eligible
    pub fn select(&self, request: &CompletionRequest) -> Option<Selection> {
        let eligible = self.eligible();

        let chosen = match eligible.len() {
            0 => {
                debug!("No eligible endpoint among {}", self.endpoints.len());
                return None;
            }
            1 => eligible[0],
            len => {
                let index = self.choose(&eligible, request);
                debug_assert!(index < len);
                eligible[index]
            }
        };

        debug!(
            endpoint = %chosen.id(),
            strategy = %self.strategy,
            "Selected endpoint"
        );
        Some(Selection::new(Arc::clone(chosen)))
    }

    /// Feed one attempt outcome back into the endpoint's rolling metrics
    pub fn record_outcome(&self, endpoint_id: &str, latency: Duration, success: bool, tokens: u64) -> bool {
        match self.get(endpoint_id) {
            Some(client) => {
                client
                    .metrics()
                    .record(latency.as_millis() as u64, success, tokens);
                true
            }
            None => false,
        }
    }

    fn choose(&self, eligible: &[&Arc<EndpointClient>], request: &CompletionRequest) -> usize {
        let candidates = || -> Vec<Candidate> {
            eligible
                .iter()
                .map(|client| Candidate {
                    metrics: client.metrics().snapshot(),
                    weight: client.config().weight,
                    price_per_1k: self.costs.endpoint_price(client.config()),
                })
                .collect()
        };

        match self.strategy {
            LoadBalancingStrategy::RoundRobin => {
                strategy_impl::round_robin(&self.cursor, eligible.len())
            }
            LoadBalancingStrategy::WeightedRoundRobin => {
                strategy_impl::weighted_random(&candidates(), request.priority)
            }
            LoadBalancingStrategy::LeastConnections => {
                strategy_impl::least_connections(&candidates())
            }
            LoadBalancingStrategy::FastestResponse => {
                strategy_impl::fastest_response(&candidates())
            }
            LoadBalancingStrategy::LowestCost => {
                let tokens = u64::from(request.estimated_prompt_tokens())
                    + u64::from(request.max_tokens);
                strategy_impl::lowest_cost(&candidates(), tokens)
            }
        }
    }
}
