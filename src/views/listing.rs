use crate::filters::{apply_filters, FilterCriteria, FilterField};
use crate::gateway::ListingsGateway;
use crate::models::{Company, Property};
use crate::views::state::{LoadState, ResultSlot};
use tracing::debug;

pub const NO_MATCHES_MESSAGE: &str = "No properties found matching your criteria.";

/// State of the property listing page.
///
/// The full list is fetched once and narrowed locally. Picking a company
/// re-filters right away; every other field waits for [`apply`](Self::apply).
pub struct ListingView {
    properties: ResultSlot<Vec<Property>>,
    companies: ResultSlot<Vec<Company>>,
    criteria: FilterCriteria,
    filtered: Vec<Property>,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    pub fn new() -> Self {
        Self {
            properties: ResultSlot::new("Failed to load properties"),
            companies: ResultSlot::new("Failed to load companies"),
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
        }
    }

    /// Fetch properties and the company dropdown
    pub async fn load(&mut self, gateway: &dyn ListingsGateway) {
        let token = self.properties.begin();
        let result = gateway.list_properties().await;
        if self.properties.complete(token, result) {
            self.filtered = self.all().to_vec();
        }

        let token = self.companies.begin();
        let result = gateway.list_companies().await;
        self.companies.complete(token, result);
    }

    /// Company selection re-applies the whole criteria immediately
    pub fn set_company(&mut self, company_id: Option<String>) {
        self.criteria.company_id = company_id;
        self.apply();
    }

    /// Edit a field without re-filtering, except for the company field
    pub fn set_field(&mut self, field: FilterField, value: impl Into<String>) {
        match field {
            FilterField::CompanyId => self.set_company(Some(value.into())),
            _ => self.criteria.set(field, value),
        }
    }

    pub fn apply(&mut self) {
        self.filtered = apply_filters(self.all(), &self.criteria);
        debug!("{} properties shown", self.filtered.len());
    }

    /// Clear every field and show the full list again
    pub fn reset(&mut self) {
        self.criteria.clear();
        self.filtered = self.all().to_vec();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Property] {
        &self.filtered
    }

    pub fn all(&self) -> &[Property] {
        self.properties.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn properties_state(&self) -> &LoadState<Vec<Property>> {
        self.properties.state()
    }

    pub fn companies(&self) -> &LoadState<Vec<Company>> {
        self.companies.state()
    }

    /// Inline message to show instead of cards, if any
    pub fn message(&self) -> Option<&str> {
        match self.properties.state() {
            LoadState::Loading => Some("Loading properties..."),
            LoadState::Failed(message) => Some(message),
            LoadState::Loaded(_) if self.filtered.is_empty() => Some(NO_MATCHES_MESSAGE),
            LoadState::Loaded(_) => None,
        }
    }
}
