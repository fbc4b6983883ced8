pub mod error;
pub mod rest;
pub mod traits;
pub mod types;

pub use error::{GatewayError, GatewayResult};
pub use rest::RestGateway;
pub use traits::ListingsGateway;
pub use types::GatewayConfig;
