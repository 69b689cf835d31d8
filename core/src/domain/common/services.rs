use crate::domain::{health::port::HealthRepository, message::ports::MessageRepository};

#[derive(Clone)]
pub struct Service<M, H>
where
    M: MessageRepository,
    H: HealthRepository,
{
    pub(crate) message_repository: M,
    pub(crate) health_repository: H,
}

impl<M, H> Service<M, H>
where
    M: MessageRepository,
    H: HealthRepository,
{
    pub fn new(message_repository: M, health_repository: H) -> Self {
        Self {
            message_repository,
            health_repository,
        }
    }
}
