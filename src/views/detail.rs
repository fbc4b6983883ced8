use crate::gateway::ListingsGateway;
use crate::models::{InquiryRequest, Property, DEFAULT_CUSTOMER_NAME, DEFAULT_CUSTOMER_PHONE};
use crate::views::state::{LoadState, ResultSlot};
use crate::views::stats::StatsView;
use tracing::{info, warn};

pub const NOT_FOUND_MESSAGE: &str = "Property not found";
pub const INQUIRY_SENT_MESSAGE: &str = "WhatsApp inquiry sent successfully!";
pub const INQUIRY_FAILED_MESSAGE: &str = "Failed to send WhatsApp inquiry. Please try again.";

/// State of a single listing's page
pub struct DetailView {
    id: i64,
    property: ResultSlot<Option<Property>>,
    stats: Option<StatsView>,
}

impl DetailView {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            property: ResultSlot::new("Failed to load property details"),
            stats: None,
        }
    }

    /// Fetch the listing, then the agent's WhatsApp stats when the company has a phone
    pub async fn load(&mut self, gateway: &dyn ListingsGateway) {
        let token = self.property.begin();
        let result = gateway.get_property(self.id).await;
        if !self.property.complete(token, result) {
            return;
        }

        let phone = self.property().and_then(Property::agent_phone).map(str::to_string);
        self.stats = match phone {
            Some(phone) => {
                let mut stats = StatsView::new(Some(phone));
                stats.load(gateway).await;
                Some(stats)
            }
            None => None,
        };
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn property(&self) -> Option<&Property> {
        self.property.loaded().and_then(Option::as_ref)
    }

    pub fn stats(&self) -> Option<&StatsView> {
        self.stats.as_ref()
    }

    /// Inline message to show instead of the listing, if any
    pub fn message(&self) -> Option<&str> {
        match self.property.state() {
            LoadState::Loading => Some("Loading property details..."),
            LoadState::Failed(message) => Some(message),
            LoadState::Loaded(None) => Some(NOT_FOUND_MESSAGE),
            LoadState::Loaded(Some(_)) => None,
        }
    }

    /// Webhook payload for asking about this listing
    pub fn inquiry(&self, customer_name: Option<&str>, customer_phone: Option<&str>) -> Option<InquiryRequest> {
        self.property().map(|p| {
            InquiryRequest::for_property(
                p,
                customer_name.unwrap_or(DEFAULT_CUSTOMER_NAME),
                customer_phone.unwrap_or(DEFAULT_CUSTOMER_PHONE),
            )
        })
    }

    /// Send the inquiry and return the message to show the user
    pub async fn send_inquiry(
        &self,
        gateway: &dyn ListingsGateway,
        customer_name: Option<&str>,
        customer_phone: Option<&str>,
    ) -> Result<&'static str, &'static str> {
        let Some(request) = self.inquiry(customer_name, customer_phone) else {
            return Err(NOT_FOUND_MESSAGE);
        };
        match gateway.send_inquiry(&request).await {
            Ok(()) => {
                info!("Inquiry about property {} sent to {}", request.property_id, request.agent_phone);
                Ok(INQUIRY_SENT_MESSAGE)
            }
            Err(err) => {
                warn!("Error sending WhatsApp inquiry: {}", err);
                Err(INQUIRY_FAILED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WhatsAppStats;
    use crate::views::testing::{company, property, FakeGateway};

    fn gateway_with_agent() -> FakeGateway {
        let mut listed = property(5, 420000.0, "Austin", 1);
        listed.company = Some(company(1, "Acme Realty", Some("+15550001")));
        FakeGateway {
            properties: vec![listed, property(6, 1.0, "Waco", 2)],
            stats: Some(WhatsAppStats {
                total_inquiries: 3,
                response_rate: 100.0,
                avg_response_time: 5.0,
            }),
            ..FakeGateway::default()
        }
    }

    #[tokio::test]
    async fn loads_listing_and_agent_stats() {
        let gateway = gateway_with_agent();
        let mut view = DetailView::new(5);
        view.load(&gateway).await;

        assert_eq!(view.message(), None);
        assert_eq!(view.property().map(|p| p.id), Some(5));
        assert_eq!(view.stats().and_then(StatsView::agent_phone), Some("+15550001"));
        assert!(gateway.calls().contains(&"GET /whatsapp/stats/+15550001".to_string()));
    }

    #[tokio::test]
    async fn no_stats_without_company_phone() {
        let gateway = gateway_with_agent();
        let mut view = DetailView::new(6);
        view.load(&gateway).await;
        assert!(view.stats().is_none());
    }

    #[tokio::test]
    async fn missing_listing_is_not_an_error() {
        let mut view = DetailView::new(99);
        view.load(&gateway_with_agent()).await;
        assert_eq!(view.message(), Some(NOT_FOUND_MESSAGE));
        assert!(view.inquiry(None, None).is_none());
    }

    #[tokio::test]
    async fn inquiry_goes_to_company_phone() {
        let gateway = gateway_with_agent();
        let mut view = DetailView::new(5);
        view.load(&gateway).await;

        let request = view.inquiry(None, None).unwrap();
        assert_eq!(request.agent_phone, "+15550001");
        assert_eq!(request.customer_name, DEFAULT_CUSTOMER_NAME);
        assert_eq!(view.send_inquiry(&gateway, None, None).await, Ok(INQUIRY_SENT_MESSAGE));
    }

    #[tokio::test]
    async fn inquiry_failure_message() {
        let mut view = DetailView::new(5);
        view.load(&gateway_with_agent()).await;
        let result = view.send_inquiry(&FakeGateway::failing(), Some("Ana"), None).await;
        assert_eq!(result, Err(INQUIRY_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn load_failure_message() {
        let mut view = DetailView::new(5);
        view.load(&FakeGateway::failing()).await;
        assert_eq!(view.message(), Some("Failed to load property details"));
    }
}
