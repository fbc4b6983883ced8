use crate::banners::{BannerCarousel, BannerRotation, ROTATION_INTERVAL};
use crate::gateway::{GatewayError, ListingsGateway};
use crate::models::{Banner, DisplayLocation};
use crate::views::state::{LoadState, ResultSlot};
use std::time::Duration;
use tokio::sync::watch;

/// Banner slot of one page: fetches the location's banners and rotates them
pub struct BannerView {
    location: DisplayLocation,
    banners: ResultSlot<()>,
    rotation: BannerRotation,
}

impl BannerView {
    /// Must be created inside a tokio runtime
    pub fn new(location: DisplayLocation) -> Self {
        Self::with_period(location, ROTATION_INTERVAL)
    }

    pub fn with_period(location: DisplayLocation, period: Duration) -> Self {
        Self {
            location,
            banners: ResultSlot::new("Failed to load banner ads"),
            rotation: BannerRotation::with_period(Vec::new(), period),
        }
    }

    /// Fetch banners for the current location and restart rotation over them
    pub async fn load(&mut self, gateway: &dyn ListingsGateway) {
        let token = self.banners.begin();
        match gateway.list_banners(Some(self.location)).await {
            Ok(list) => {
                if self.banners.complete(token, Ok::<(), GatewayError>(())) {
                    self.rotation.replace(list);
                }
            }
            Err(err) => {
                self.banners.complete(token, Err::<(), _>(err));
            }
        }
    }

    /// Move the slot to another page context and refetch
    pub async fn set_location(&mut self, location: DisplayLocation, gateway: &dyn ListingsGateway) {
        self.location = location;
        self.load(gateway).await;
    }

    pub fn location(&self) -> DisplayLocation {
        self.location
    }

    pub fn select(&self, index: usize) -> bool {
        self.rotation.select(index)
    }

    pub fn current(&self) -> Option<Banner> {
        self.rotation.current()
    }

    pub fn carousel(&self) -> BannerCarousel {
        self.rotation.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.rotation.subscribe()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_running()
    }

    /// Inline message while loading or after a failure
    pub fn message(&self) -> Option<&str> {
        match self.banners.state() {
            LoadState::Loading => Some("Loading ads..."),
            LoadState::Failed(message) => Some(message),
            LoadState::Loaded(()) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{banner, FakeGateway};

    fn gateway() -> FakeGateway {
        FakeGateway {
            banners: vec![
                banner(1, DisplayLocation::Homepage),
                banner(2, DisplayLocation::All),
                banner(3, DisplayLocation::PropertyDetail),
            ],
            ..FakeGateway::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rotates_banners_for_location() {
        let mut view = BannerView::new(DisplayLocation::Homepage);
        view.load(&gateway()).await;

        assert_eq!(view.message(), None);
        assert_eq!(view.carousel().len(), 2);
        assert!(view.is_rotating());

        let mut rx = view.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(view.current().map(|b| b.id), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn location_change_resets_to_first_banner() {
        let gateway = gateway();
        let mut view = BannerView::new(DisplayLocation::Homepage);
        view.load(&gateway).await;
        view.select(1);

        view.set_location(DisplayLocation::PropertyDetail, &gateway).await;
        assert_eq!(view.carousel().current_index(), 0);
        assert_eq!(view.current().map(|b| b.id), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn single_banner_does_not_rotate() {
        let mut view = BannerView::new(DisplayLocation::PropertyListing);
        view.load(&gateway()).await;
        assert_eq!(view.carousel().len(), 1);
        assert!(!view.is_rotating());
        assert!(view.carousel().indicators().is_empty());
    }

    #[tokio::test]
    async fn failure_message() {
        let mut view = BannerView::new(DisplayLocation::Homepage);
        view.load(&FakeGateway::failing()).await;
        assert_eq!(view.message(), Some("Failed to load banner ads"));
        assert!(view.current().is_none());
    }
}
