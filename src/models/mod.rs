use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Promotion level of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tier {
    #[default]
    Standard,
    Featured,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "Standard",
            Tier::Featured => "Featured",
            Tier::Premium => "Premium",
        }
    }

    /// Premium and Featured listings are promoted on the home page
    pub fn is_promoted(&self) -> bool {
        matches!(self, Tier::Premium | Tier::Featured)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Tier::Standard),
            "featured" => Ok(Tier::Featured),
            "premium" => Ok(Tier::Premium),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Real estate company owning listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
    pub company_id: i64,
}

impl Property {
    /// Phone number inquiries about this listing are routed to
    pub fn agent_phone(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.contact_phone.as_deref())
            .filter(|phone| !phone.trim().is_empty())
    }
}

/// Page context a banner is shown on
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DisplayLocation {
    #[default]
    All,
    Homepage,
    PropertyListing,
    PropertyDetail,
}

impl DisplayLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayLocation::All => "all",
            DisplayLocation::Homepage => "homepage",
            DisplayLocation::PropertyListing => "property_listing",
            DisplayLocation::PropertyDetail => "property_detail",
        }
    }
}

impl fmt::Display for DisplayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(DisplayLocation::All),
            "homepage" => Ok(DisplayLocation::Homepage),
            "property_listing" => Ok(DisplayLocation::PropertyListing),
            "property_detail" => Ok(DisplayLocation::PropertyDetail),
            other => Err(format!("unknown display location '{}'", other)),
        }
    }
}

/// Banner ad as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub target_link: Option<String>,
    #[serde(default)]
    pub display_location: DisplayLocation,
    #[serde(deserialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub is_active: bool,
}

pub const BANNER_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x200?text=Banner+Ad";
pub const MAX_BANNER_PRIORITY: u8 = 10;

/// Payload for creating a banner from the admin dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    pub title: String,
    pub image_url: String,
    pub target_link: String,
    pub display_location: DisplayLocation,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub priority: u8,
    pub is_active: bool,
}

impl Default for NewBanner {
    fn default() -> Self {
        Self {
            title: String::new(),
            image_url: BANNER_PLACEHOLDER_IMAGE.to_string(),
            target_link: String::new(),
            display_location: DisplayLocation::All,
            start_date: Utc::now().date_naive(),
            end_date: None,
            priority: 0,
            is_active: true,
        }
    }
}

impl NewBanner {
    /// Check the form before it is submitted
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Banner title is required".to_string());
        }
        if self.image_url.trim().is_empty() {
            return Err("Banner image URL is required".to_string());
        }
        if self.priority > MAX_BANNER_PRIORITY {
            return Err(format!(
                "Banner priority must be between 0 and {}",
                MAX_BANNER_PRIORITY
            ));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err("Banner end date is before its start date".to_string());
            }
        }
        Ok(())
    }
}

/// WhatsApp response statistics for one agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppStats {
    pub total_inquiries: u64,
    pub response_rate: f64,
    pub avg_response_time: f64,
}

/// Minimal listing reference embedded in an inquiry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryProperty {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Customer inquiry received over WhatsApp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppInquiry {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub agent_phone: Option<String>,
    #[serde(default)]
    pub property_id: Option<i64>,
    #[serde(default)]
    pub property: Option<InquiryProperty>,
    #[serde(default)]
    pub message: String,
    pub inquiry_time: DateTime<Utc>,
    #[serde(default)]
    pub response_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub response_time_in_minutes: Option<f64>,
}

pub const FALLBACK_AGENT_PHONE: &str = "+0987654321";
pub const DEFAULT_CUSTOMER_PHONE: &str = "+1234567890";
pub const DEFAULT_CUSTOMER_NAME: &str = "Test Customer";

/// Webhook payload that opens an inquiry about a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub customer_phone: String,
    pub agent_phone: String,
    pub property_id: i64,
    pub message: String,
    pub customer_name: String,
}

impl InquiryRequest {
    pub fn for_property(property: &Property, customer_name: &str, customer_phone: &str) -> Self {
        Self {
            customer_phone: customer_phone.to_string(),
            agent_phone: property
                .agent_phone()
                .unwrap_or(FALLBACK_AGENT_PHONE)
                .to_string(),
            property_id: property.id,
            message: format!("I'm interested in the property at {}", property.address),
            customer_name: customer_name.to_string(),
        }
    }
}

/// Accepts `2024-05-01` as well as full RFC 3339 timestamps
fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| format!("invalid date '{}': {}", raw, e))
}

fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

fn optional_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_calendar_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_decodes_camel_case_payload() {
        let property: Property = serde_json::from_value(json!({
            "id": 7,
            "title": "Loft",
            "address": "1 Main St",
            "city": "Austin",
            "state": "TX",
            "zipCode": "73301",
            "price": 250000.0,
            "bedrooms": 2,
            "bathrooms": 1,
            "area": 80.5,
            "tier": "Premium",
            "companyId": 3,
            "company": { "id": 3, "name": "Acme Realty", "contactPhone": "+15550001" }
        }))
        .unwrap();

        assert_eq!(property.zip_code, "73301");
        assert_eq!(property.tier, Tier::Premium);
        assert_eq!(property.agent_phone(), Some("+15550001"));
        assert!(property.image_url.is_none());
    }

    #[test]
    fn missing_tier_defaults_to_standard() {
        let property: Property = serde_json::from_value(json!({
            "id": 1, "title": "t", "address": "a", "city": "c",
            "price": 1.0, "bedrooms": 0, "bathrooms": 0, "area": 1.0, "companyId": 1
        }))
        .unwrap();
        assert_eq!(property.tier, Tier::Standard);
    }

    #[test]
    fn banner_accepts_date_and_timestamp_forms() {
        let banner: Banner = serde_json::from_value(json!({
            "id": 1,
            "title": "Spring sale",
            "imageUrl": "https://img/1.png",
            "displayLocation": "property_listing",
            "startDate": "2024-03-01T00:00:00.000Z",
            "endDate": "2024-04-01",
            "priority": 5,
            "isActive": true
        }))
        .unwrap();

        assert_eq!(banner.display_location, DisplayLocation::PropertyListing);
        assert_eq!(banner.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(banner.end_date, NaiveDate::from_ymd_opt(2024, 4, 1));
    }

    #[test]
    fn empty_end_date_is_none() {
        let banner: Banner = serde_json::from_value(json!({
            "id": 1, "title": "x", "imageUrl": "u",
            "startDate": "2024-03-01", "endDate": ""
        }))
        .unwrap();
        assert_eq!(banner.end_date, None);
        assert_eq!(banner.display_location, DisplayLocation::All);
    }

    #[test]
    fn new_banner_validation() {
        let mut form = NewBanner::default();
        assert_eq!(form.image_url, BANNER_PLACEHOLDER_IMAGE);
        assert!(form.validate().is_err());

        form.title = "Open house".to_string();
        assert!(form.validate().is_ok());

        form.priority = 11;
        assert!(form.validate().is_err());
        form.priority = 10;

        form.end_date = form.start_date.pred_opt();
        assert!(form.validate().is_err());
    }

    #[test]
    fn new_banner_serializes_for_the_backend() {
        let form = NewBanner {
            title: "Open house".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ..NewBanner::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["displayLocation"], "all");
        assert_eq!(value["startDate"], "2024-01-02");
        assert_eq!(value["isActive"], true);
    }

    #[test]
    fn inquiry_request_falls_back_to_default_agent() {
        let property: Property = serde_json::from_value(json!({
            "id": 9, "title": "t", "address": "12 Elm Rd", "city": "c",
            "price": 1.0, "bedrooms": 0, "bathrooms": 0, "area": 1.0, "companyId": 1
        }))
        .unwrap();

        let request = InquiryRequest::for_property(&property, "Ana", "+100");
        assert_eq!(request.agent_phone, FALLBACK_AGENT_PHONE);
        assert_eq!(request.message, "I'm interested in the property at 12 Elm Rd");
        assert_eq!(request.property_id, 9);
    }

    #[test]
    fn tier_and_location_parse_from_cli_text() {
        assert_eq!("premium".parse::<Tier>().unwrap(), Tier::Premium);
        assert!("gold".parse::<Tier>().is_err());
        assert_eq!(
            "property_detail".parse::<DisplayLocation>().unwrap(),
            DisplayLocation::PropertyDetail
        );
    }
}
