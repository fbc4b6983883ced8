use crate::gateway::error::GatewayResult;
use crate::models::{
    Banner, Company, DisplayLocation, InquiryRequest, NewBanner, Property, Tier, WhatsAppInquiry,
    WhatsAppStats,
};
use async_trait::async_trait;

/// REST surface of the listings backend.
/// Views only depend on this trait, so tests can swap in an in-memory backend.
#[async_trait]
pub trait ListingsGateway: Send + Sync {
    /// Every listing, unfiltered
    async fn list_properties(&self) -> GatewayResult<Vec<Property>>;

    /// One listing; `None` when the backend reports it missing
    async fn get_property(&self, id: i64) -> GatewayResult<Option<Property>>;

    async fn update_property_tier(&self, id: i64, tier: Tier) -> GatewayResult<()>;

    async fn list_companies(&self) -> GatewayResult<Vec<Company>>;

    /// Banners for a display location, or all banners when `location` is `None`
    async fn list_banners(&self, location: Option<DisplayLocation>) -> GatewayResult<Vec<Banner>>;

    async fn create_banner(&self, banner: &NewBanner) -> GatewayResult<()>;

    async fn delete_banner(&self, id: i64) -> GatewayResult<()>;

    async fn whatsapp_stats(&self, agent_phone: &str) -> GatewayResult<WhatsAppStats>;

    async fn list_inquiries(&self) -> GatewayResult<Vec<WhatsAppInquiry>>;

    /// Listings the backend suspects are duplicates; the record shape is backend-defined
    async fn duplicate_check(&self) -> GatewayResult<Vec<serde_json::Value>>;

    async fn send_inquiry(&self, request: &InquiryRequest) -> GatewayResult<()>;

    /// Base URL requests are resolved against
    fn base_url(&self) -> &str;
}
