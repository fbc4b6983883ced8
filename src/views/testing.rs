//! In-memory backend used by the view tests.

use crate::gateway::{GatewayError, GatewayResult, ListingsGateway};
use crate::models::{
    Banner, Company, DisplayLocation, InquiryRequest, NewBanner, Property, Tier, WhatsAppInquiry,
    WhatsAppStats,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::sync::Mutex;

pub fn company(id: i64, name: &str, phone: Option<&str>) -> Company {
    Company {
        id,
        name: name.to_string(),
        logo: None,
        contact_email: None,
        contact_phone: phone.map(str::to_string),
        address: None,
    }
}

pub fn property(id: i64, price: f64, city: &str, company_id: i64) -> Property {
    Property {
        id,
        title: format!("Listing {}", id),
        address: format!("{} Main St", id),
        city: city.to_string(),
        state: "TX".to_string(),
        zip_code: "73301".to_string(),
        price,
        bedrooms: 2,
        bathrooms: 1,
        area: 80.0,
        tier: Tier::Standard,
        image_url: None,
        description: None,
        company: None,
        company_id,
    }
}

pub fn banner(id: i64, location: DisplayLocation) -> Banner {
    Banner {
        id,
        title: format!("Banner {}", id),
        image_url: format!("https://img.example/{}.png", id),
        target_link: Some(format!("https://ads.example/{}", id)),
        display_location: location,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
        priority: 0,
        is_active: true,
    }
}

pub struct FakeGateway {
    pub properties: Vec<Property>,
    pub companies: Vec<Company>,
    pub banners: Vec<Banner>,
    pub stats: Option<WhatsAppStats>,
    pub inquiries: Vec<WhatsAppInquiry>,
    pub duplicates: Vec<serde_json::Value>,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            companies: vec![
                company(1, "Acme Realty", Some("+15550001")),
                company(2, "Lone Star Homes", None),
            ],
            banners: Vec::new(),
            stats: None,
            inquiries: Vec::new(),
            duplicates: Vec::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> GatewayResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.fail {
            return Err(GatewayError::Status {
                url: "http://fake/api".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ListingsGateway for FakeGateway {
    async fn list_properties(&self) -> GatewayResult<Vec<Property>> {
        self.record("GET /properties".to_string())?;
        Ok(self.properties.clone())
    }

    async fn get_property(&self, id: i64) -> GatewayResult<Option<Property>> {
        self.record(format!("GET /properties/{}", id))?;
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn update_property_tier(&self, id: i64, tier: Tier) -> GatewayResult<()> {
        self.record(format!("PUT /properties/{} {}", id, tier))
    }

    async fn list_companies(&self) -> GatewayResult<Vec<Company>> {
        self.record("GET /companies".to_string())?;
        Ok(self.companies.clone())
    }

    async fn list_banners(&self, location: Option<DisplayLocation>) -> GatewayResult<Vec<Banner>> {
        self.record(format!("GET /banners {:?}", location))?;
        Ok(self
            .banners
            .iter()
            .filter(|b| match location {
                Some(loc) => b.display_location == loc || b.display_location == DisplayLocation::All,
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create_banner(&self, banner: &NewBanner) -> GatewayResult<()> {
        self.record(format!("POST /banners {}", banner.title))
    }

    async fn delete_banner(&self, id: i64) -> GatewayResult<()> {
        self.record(format!("DELETE /banners/{}", id))
    }

    async fn whatsapp_stats(&self, agent_phone: &str) -> GatewayResult<WhatsAppStats> {
        self.record(format!("GET /whatsapp/stats/{}", agent_phone))?;
        self.stats.clone().ok_or_else(|| GatewayError::Status {
            url: format!("http://fake/api/whatsapp/stats/{}", agent_phone),
            status: StatusCode::NOT_FOUND,
        })
    }

    async fn list_inquiries(&self) -> GatewayResult<Vec<WhatsAppInquiry>> {
        self.record("GET /whatsapp/inquiries".to_string())?;
        Ok(self.inquiries.clone())
    }

    async fn duplicate_check(&self) -> GatewayResult<Vec<serde_json::Value>> {
        self.record("GET /whatsapp/duplicate-check".to_string())?;
        Ok(self.duplicates.clone())
    }

    async fn send_inquiry(&self, request: &InquiryRequest) -> GatewayResult<()> {
        self.record(format!("POST /whatsapp/webhook {}", request.agent_phone))
    }

    fn base_url(&self) -> &str {
        "http://fake/api"
    }
}
