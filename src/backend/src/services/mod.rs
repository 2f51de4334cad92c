pub mod captive;
pub mod credentials;
pub mod rate_limit;
pub mod store;
