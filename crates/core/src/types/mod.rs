//! Core types for the pickup-point service.
//!
//! This module provides type-safe wrappers for the domain's identifiers,
//! closed enumerations and listing parameters.

pub mod city;
pub mod id;
pub mod listing;
pub mod status;

pub use city::{AllowedCities, CityError, DEFAULT_CITIES};
pub use id::*;
pub use listing::{DateRange, ListingError, PageRequest};
pub use status::*;
