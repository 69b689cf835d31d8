use crate::domain::{common::CoreError, health::entities::IsHealthy};

pub trait HealthRepository: Send + Sync {
    fn ping(&self) -> impl Future<Output = IsHealthy> + Send;
}

pub trait HealthService: Send + Sync {
    /// Resolves to `Err(CoreError::Unhealthy)` when the backing store does not answer.
    fn check_health(&self) -> impl Future<Output = Result<IsHealthy, CoreError>> + Send;
}

/// Health probe for stores that live in process memory.
#[derive(Clone, Default)]
pub struct InMemoryHealthRepository;

impl InMemoryHealthRepository {
    pub fn new() -> Self {
        Self
    }
}

impl HealthRepository for InMemoryHealthRepository {
    async fn ping(&self) -> IsHealthy {
        IsHealthy::new(true)
    }
}
