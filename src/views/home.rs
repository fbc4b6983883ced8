use crate::gateway::ListingsGateway;
use crate::models::Property;
use crate::views::state::{LoadState, ResultSlot};

/// Number of promoted listings shown on the home page
pub const FEATURED_LIMIT: usize = 6;

/// First `limit` Premium or Featured listings, in backend order
pub fn featured_properties(all: &[Property], limit: usize) -> Vec<Property> {
    all.iter()
        .filter(|p| p.tier.is_promoted())
        .take(limit)
        .cloned()
        .collect()
}

pub struct HomeView {
    featured: ResultSlot<Vec<Property>>,
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeView {
    pub fn new() -> Self {
        Self {
            featured: ResultSlot::new("Failed to load featured properties"),
        }
    }

    pub async fn load(&mut self, gateway: &dyn ListingsGateway) {
        let token = self.featured.begin();
        let result = gateway
            .list_properties()
            .await
            .map(|all| featured_properties(&all, FEATURED_LIMIT));
        self.featured.complete(token, result);
    }

    pub fn featured(&self) -> &LoadState<Vec<Property>> {
        self.featured.state()
    }
}
