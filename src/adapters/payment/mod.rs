//! Payment service adapters.

mod mock_gateway;
mod rest_client;

pub use mock_gateway::MockPaymentGateway;
pub use rest_client::RestPaymentGateway;
