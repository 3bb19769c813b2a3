pub mod api_interfaces;
pub mod cards;
pub mod client;
pub mod constants;
pub mod error;
pub mod images;
pub mod restaurant;
pub mod search;
pub mod site_info;
pub mod towns;
mod util;

pub use client::Client;
pub use restaurant::{Location, Restaurant};
pub use search::{SearchController, SearchState};
pub use site_info::{RatingSite, SiteInfo};
