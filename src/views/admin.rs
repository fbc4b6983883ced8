use crate::gateway::ListingsGateway;
use crate::models::{Banner, Company, NewBanner, Property, Tier, WhatsAppInquiry};
use crate::views::state::LoadState;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Banners,
    Properties,
    Companies,
    WhatsApp,
}

impl AdminTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Banners => "banners",
            AdminTab::Properties => "properties",
            AdminTab::Companies => "companies",
            AdminTab::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "banners" => Ok(AdminTab::Banners),
            "properties" => Ok(AdminTab::Properties),
            "companies" => Ok(AdminTab::Companies),
            "whatsapp" => Ok(AdminTab::WhatsApp),
            other => Err(format!("unknown admin tab '{}'", other)),
        }
    }
}

/// Outcome banner shown above the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn text(&self) -> &str {
        match self {
            Flash::Success(text) | Flash::Error(text) => text,
        }
    }
}

/// Admin dashboard: one collection per tab plus the last outcome message
pub struct AdminView {
    tab: AdminTab,
    banners: LoadState<Vec<Banner>>,
    properties: LoadState<Vec<Property>>,
    companies: LoadState<Vec<Company>>,
    inquiries: LoadState<Vec<WhatsAppInquiry>>,
    flash: Option<Flash>,
}

impl Default for AdminView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminView {
    pub fn new() -> Self {
        Self {
            tab: AdminTab::default(),
            banners: LoadState::Loading,
            properties: LoadState::Loading,
            companies: LoadState::Loading,
            inquiries: LoadState::Loading,
            flash: None,
        }
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn clear_flash(&mut self) {
        self.flash = None;
    }

    pub fn banners(&self) -> &LoadState<Vec<Banner>> {
        &self.banners
    }

    pub fn properties(&self) -> &LoadState<Vec<Property>> {
        &self.properties
    }

    pub fn companies(&self) -> &LoadState<Vec<Company>> {
        &self.companies
    }

    pub fn inquiries(&self) -> &LoadState<Vec<WhatsAppInquiry>> {
        &self.inquiries
    }

    /// Switch tab and fetch that tab's collection
    pub async fn open_tab(&mut self, tab: AdminTab, gateway: &dyn ListingsGateway) {
        self.tab = tab;
        self.flash = None;
        let failure = format!("Failed to load {} data", tab);

        let ok = match tab {
            AdminTab::Banners => {
                self.banners = Self::fetched(gateway.list_banners(None).await, &failure);
                !matches!(self.banners, LoadState::Failed(_))
            }
            AdminTab::Properties => {
                self.properties = Self::fetched(gateway.list_properties().await, &failure);
                !matches!(self.properties, LoadState::Failed(_))
            }
            AdminTab::Companies => {
                self.companies = Self::fetched(gateway.list_companies().await, &failure);
                !matches!(self.companies, LoadState::Failed(_))
            }
            AdminTab::WhatsApp => {
                self.inquiries = Self::fetched(gateway.list_inquiries().await, &failure);
                !matches!(self.inquiries, LoadState::Failed(_))
            }
        };
        if !ok {
            self.flash = Some(Flash::Error(failure));
        }
    }

    /// Validate and submit a new banner, then refresh the banner table
    pub async fn create_banner(&mut self, form: &NewBanner, gateway: &dyn ListingsGateway) {
        if let Err(reason) = form.validate() {
            self.flash = Some(Flash::Error(reason));
            return;
        }
        match gateway.create_banner(form).await {
            Ok(()) => {
                self.refresh_banners(gateway).await;
                self.flash = Some(Flash::Success("Banner created successfully!".to_string()));
            }
            Err(err) => self.fail("Failed to create banner", err),
        }
    }

    pub async fn delete_banner(&mut self, id: i64, gateway: &dyn ListingsGateway) {
        match gateway.delete_banner(id).await {
            Ok(()) => {
                self.refresh_banners(gateway).await;
                self.flash = Some(Flash::Success("Banner deleted successfully!".to_string()));
            }
            Err(err) => self.fail("Failed to delete banner", err),
        }
    }

    /// Move a listing to another tier. Picking the tier it already has does nothing.
    pub async fn set_tier(&mut self, id: i64, tier: Tier, gateway: &dyn ListingsGateway) {
        let current = self
            .properties
            .loaded()
            .and_then(|list| list.iter().find(|p| p.id == id))
            .map(|p| p.tier);
        if current == Some(tier) {
            info!("Property {} is already {}", id, tier);
            return;
        }

        match gateway.update_property_tier(id, tier).await {
            Ok(()) => {
                self.properties = Self::fetched(gateway.list_properties().await, "Failed to load properties data");
                self.flash = Some(Flash::Success("Property tier updated successfully!".to_string()));
            }
            Err(err) => self.fail("Failed to update property tier", err),
        }
    }

    /// Ask the backend for suspected duplicate listings
    pub async fn check_duplicates(&mut self, gateway: &dyn ListingsGateway) -> Option<Vec<serde_json::Value>> {
        match gateway.duplicate_check().await {
            Ok(found) => {
                self.flash = Some(Flash::Success(format!(
                    "Found {} potential duplicate properties.",
                    found.len()
                )));
                Some(found)
            }
            Err(err) => {
                self.fail("Failed to check for duplicates", err);
                None
            }
        }
    }

    async fn refresh_banners(&mut self, gateway: &dyn ListingsGateway) {
        self.banners = Self::fetched(gateway.list_banners(None).await, "Failed to load banners data");
    }

    fn fail(&mut self, message: &str, err: impl fmt::Display) {
        warn!("{}: {}", message, err);
        self.flash = Some(Flash::Error(message.to_string()));
    }

    fn fetched<T, E: fmt::Display>(result: Result<T, E>, failure: &str) -> LoadState<T> {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => {
                warn!("{}: {}", failure, err);
                LoadState::Failed(failure.to_string())
            }
        }
    }
}
