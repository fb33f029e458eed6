mod redis_impl;
mod traits;

#[cfg(test)]
mod test_mock;

// Re-export the traits
pub use traits::{Repository, SessionStorage, StateStorage};

// Re-export the implementation
pub use redis_impl::RedisRepository;

// Re-export test mock
#[cfg(test)]
pub use test_mock::MockRepository;
