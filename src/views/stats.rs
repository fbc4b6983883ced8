use crate::gateway::ListingsGateway;
use crate::models::WhatsAppStats;
use crate::views::state::{LoadState, ResultSlot};

/// Colour class for an agent's average response time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseBadge {
    Success,
    Warning,
    Danger,
}

impl ResponseBadge {
    pub fn for_minutes(minutes: f64) -> Self {
        if minutes <= 15.0 {
            ResponseBadge::Success
        } else if minutes <= 60.0 {
            ResponseBadge::Warning
        } else {
            ResponseBadge::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseBadge::Success => "success",
            ResponseBadge::Warning => "warning",
            ResponseBadge::Danger => "danger",
        }
    }
}

/// WhatsApp response statistics panel for one agent
pub struct StatsView {
    agent_phone: Option<String>,
    stats: ResultSlot<WhatsAppStats>,
}

impl StatsView {
    pub fn new(agent_phone: Option<String>) -> Self {
        Self {
            agent_phone: agent_phone.filter(|p| !p.trim().is_empty()),
            stats: ResultSlot::new("Failed to load WhatsApp statistics"),
        }
    }

    /// Without an agent phone there is nothing to fetch
    pub async fn load(&mut self, gateway: &dyn ListingsGateway) {
        let Some(phone) = self.agent_phone.clone() else {
            return;
        };
        let token = self.stats.begin();
        let result = gateway.whatsapp_stats(&phone).await;
        self.stats.complete(token, result);
    }

    pub fn agent_phone(&self) -> Option<&str> {
        self.agent_phone.as_deref()
    }

    /// `None` when the panel should not be shown at all
    pub fn state(&self) -> Option<&LoadState<WhatsAppStats>> {
        self.agent_phone.as_ref().map(|_| self.stats.state())
    }
}
