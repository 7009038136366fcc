//! Reception lifecycle: `none -> in_progress -> closed`.

use sqlx::PgPool;
use tracing::{debug, info, instrument};

use pvz_core::{Operation, PickupPointId, Role};

use super::ServiceError;
use crate::db::{ReceptionRepository, RepositoryError};
use crate::models::Reception;

/// Opens and closes receptions at pickup points.
pub struct ReceptionManager<'a> {
    receptions: ReceptionRepository<'a>,
}

impl<'a> ReceptionManager<'a> {
    /// Create a new reception manager.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            receptions: ReceptionRepository::new(pool),
        }
    }

    /// Open a reception at a pickup point.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not open receptions.
    /// Returns `ServiceError::PickupPointNotFound` if the point does not exist.
    /// Returns `ServiceError::AlreadyOpen` if a reception is already in progress.
    #[instrument(skip(self), fields(pvz_id = %pvz_id))]
    pub async fn open(
        &self,
        role: Role,
        pvz_id: PickupPointId,
    ) -> Result<Reception, ServiceError> {
        role.authorize(Operation::OpenReception)?;

        let reception = self.receptions.open(pvz_id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::PickupPointNotFound,
            RepositoryError::Conflict(_) => {
                debug!("Reception already in progress");
                ServiceError::AlreadyOpen
            }
            other => ServiceError::Store(other),
        })?;

        info!(reception_id = %reception.id, "Reception opened");
        Ok(reception)
    }

    /// Close the point's reception in progress.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not close receptions.
    /// Returns `ServiceError::NoActiveReception` if nothing is in progress.
    #[instrument(skip(self), fields(pvz_id = %pvz_id))]
    pub async fn close(
        &self,
        role: Role,
        pvz_id: PickupPointId,
    ) -> Result<Reception, ServiceError> {
        role.authorize(Operation::CloseReception)?;

        let Some(reception) = self.receptions.close_latest(pvz_id).await? else {
            debug!("No reception to close");
            return Err(ServiceError::NoActiveReception);
        };

        info!(reception_id = %reception.id, "Reception closed");
        Ok(reception)
    }
}
