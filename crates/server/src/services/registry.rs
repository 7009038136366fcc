//! Pickup-point registry.

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use pvz_core::{AllowedCities, DateRange, Operation, PageRequest, Role};

use super::ServiceError;
use crate::db::{PickupPointRepository, RepositoryError};
use crate::models::{NewPickupPoint, PickupPoint, PickupPointListing};

/// Registers pickup points in whitelisted cities and lists them.
pub struct PvzRegistry<'a> {
    points: PickupPointRepository<'a>,
    cities: &'a AllowedCities,
}

impl<'a> PvzRegistry<'a> {
    /// Create a registry over `pool` that accepts only `cities`.
    #[must_use]
    pub const fn new(pool: &'a PgPool, cities: &'a AllowedCities) -> Self {
        Self {
            points: PickupPointRepository::new(pool),
            cities,
        }
    }

    /// Register a pickup point.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not create points.
    /// Returns `ServiceError::CityNotAllowed` if the city is not whitelisted;
    /// nothing is written in that case.
    /// Returns `ServiceError::PickupPointExists` if the id is taken.
    #[instrument(skip(self, point), fields(pvz_id = %point.id))]
    pub async fn create(
        &self,
        role: Role,
        point: NewPickupPoint,
    ) -> Result<PickupPoint, ServiceError> {
        role.authorize(Operation::CreatePickupPoint)?;

        if self.cities.check(&point.city).is_err() {
            warn!(city = %point.city, "Rejected pickup point in unlisted city");
            return Err(ServiceError::CityNotAllowed(point.city));
        }

        let created = self.points.create(&point).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => ServiceError::PickupPointExists,
            other => ServiceError::Store(other),
        })?;

        info!(city = %created.city, "Pickup point registered");
        Ok(created)
    }

    /// List pickup points with their receptions and products.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not list points.
    /// Returns `ServiceError::Store` if the read fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        role: Role,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Vec<PickupPointListing>, ServiceError> {
        role.authorize(Operation::ListPickupPoints)?;

        Ok(self.points.list(range, page).await?)
    }
}
