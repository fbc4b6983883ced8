//! Client for a real-estate listings backend: property search with
//! client-side filtering, rotating banner ads, WhatsApp inquiry
//! statistics and the admin dashboard flows.

pub mod banners;
pub mod config;
pub mod filters;
pub mod gateway;
pub mod models;
pub mod views;

pub use banners::{BannerCarousel, BannerRotation};
pub use config::AppConfig;
pub use filters::{apply_filters, FilterCriteria, FilterField};
pub use gateway::{GatewayConfig, GatewayError, ListingsGateway, RestGateway};
