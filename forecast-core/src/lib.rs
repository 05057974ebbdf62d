//! Core library for the `forecast` city search.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The remote city lookup and its OpenWeatherMap implementation
//! - The city dropdown view-model that reports the user's pick to its owner
//!
//! It is used by `forecast-cli`, but can also back other front ends.

pub mod config;
pub mod dropdown;
pub mod error;
pub mod lookup;
pub mod model;

pub use config::Config;
pub use dropdown::{CityDropdown, DropdownOptions, DropdownView, Message, PendingLookup};
pub use error::LookupError;
pub use lookup::{CityLookup, lookup_from_config};
pub use model::{City, FindResponse};
