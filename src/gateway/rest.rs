use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::traits::ListingsGateway;
use crate::gateway::types::GatewayConfig;
use crate::models::{
    Banner, Company, DisplayLocation, InquiryRequest, NewBanner, Property, Tier, WhatsAppInquiry,
    WhatsAppStats,
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

/// JSON-over-HTTP client for the listings backend
pub struct RestGateway {
    client: Client,
    base: Url,
    config: GatewayConfig,
}

impl RestGateway {
    /// Create a gateway pointed at the default local backend
    pub fn new() -> GatewayResult<Self> {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a gateway with custom connection settings
    pub fn with_config(config: GatewayConfig) -> GatewayResult<Self> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::Config(format!("bad base URL '{}': {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> GatewayResult<Response> {
        let response = request.send().await.map_err(|source| GatewayError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(GatewayError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> GatewayResult<T> {
        response.json::<T>().await.map_err(|source| GatewayError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> GatewayResult<T> {
        debug!("GET {}", url);
        let response = self.send(self.client.get(url.clone()), &url).await?;
        Self::decode(response, &url).await
    }
}

#[async_trait]
impl ListingsGateway for RestGateway {
    async fn list_properties(&self) -> GatewayResult<Vec<Property>> {
        let properties: Vec<Property> = self.get_json(self.endpoint(&["properties"])).await?;
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn get_property(&self, id: i64) -> GatewayResult<Option<Property>> {
        let id = id.to_string();
        match self.get_json(self.endpoint(&["properties", &id])).await {
            Ok(property) => Ok(Some(property)),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {
                debug!("Property {} not found", id);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn update_property_tier(&self, id: i64, tier: Tier) -> GatewayResult<()> {
        let url = self.endpoint(&["properties", &id.to_string()]);
        debug!("PUT {} tier={}", url, tier);
        self.send(self.client.put(url.clone()).json(&json!({ "tier": tier })), &url)
            .await?;
        info!("Property {} moved to tier {}", id, tier);
        Ok(())
    }

    async fn list_companies(&self) -> GatewayResult<Vec<Company>> {
        self.get_json(self.endpoint(&["companies"])).await
    }

    async fn list_banners(&self, location: Option<DisplayLocation>) -> GatewayResult<Vec<Banner>> {
        let mut url = self.endpoint(&["banners"]);
        if let Some(location) = location {
            url.query_pairs_mut().append_pair("location", location.as_str());
        }
        let banners: Vec<Banner> = self.get_json(url).await?;
        debug!("Fetched {} banners", banners.len());
        Ok(banners)
    }

    async fn create_banner(&self, banner: &NewBanner) -> GatewayResult<()> {
        let url = self.endpoint(&["banners"]);
        debug!("POST {}", url);
        self.send(self.client.post(url.clone()).json(banner), &url).await?;
        info!("Created banner '{}'", banner.title);
        Ok(())
    }

    async fn delete_banner(&self, id: i64) -> GatewayResult<()> {
        let url = self.endpoint(&["banners", &id.to_string()]);
        debug!("DELETE {}", url);
        self.send(self.client.delete(url.clone()), &url).await?;
        info!("Deleted banner {}", id);
        Ok(())
    }

    async fn whatsapp_stats(&self, agent_phone: &str) -> GatewayResult<WhatsAppStats> {
        self.get_json(self.endpoint(&["whatsapp", "stats", agent_phone]))
            .await
    }

    async fn list_inquiries(&self) -> GatewayResult<Vec<WhatsAppInquiry>> {
        self.get_json(self.endpoint(&["whatsapp", "inquiries"])).await
    }

    async fn duplicate_check(&self) -> GatewayResult<Vec<serde_json::Value>> {
        self.get_json(self.endpoint(&["whatsapp", "duplicate-check"]))
            .await
    }

    async fn send_inquiry(&self, request: &InquiryRequest) -> GatewayResult<()> {
        let url = self.endpoint(&["whatsapp", "webhook"]);
        debug!("POST {} for property {}", url, request.property_id);
        self.send(self.client.post(url.clone()).json(request), &url).await?;
        Ok(())
    }

    fn base_url(&self) -> &str {
        self.base.as_str()
    }
}
