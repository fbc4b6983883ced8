pub mod admin;
pub mod banner;
pub mod detail;
pub mod home;
pub mod listing;
pub mod render;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{AdminTab, AdminView, Flash};
pub use banner::BannerView;
pub use detail::DetailView;
pub use home::HomeView;
pub use listing::ListingView;
pub use state::{LoadState, RequestToken, ResultSlot};
pub use stats::{ResponseBadge, StatsView};
