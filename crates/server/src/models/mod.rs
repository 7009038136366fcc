//! Domain models stored in and read from `PostgreSQL`.
//!
//! Each struct maps one table row (`sqlx::FromRow`) and serializes to the
//! camelCase JSON shape returned by the API.

pub mod listing;

use chrono::{DateTime, Utc};
use serde::Serialize;

use pvz_core::{PickupPointId, ProductId, ProductType, ReceptionId, ReceptionStatus};

pub use listing::{PickupPointListing, ReceptionWithProducts, assemble_listing};

/// A registered pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PickupPoint {
    pub id: PickupPointId,
    pub registration_date: DateTime<Utc>,
    pub city: String,
}

/// Input for registering a pickup point.
#[derive(Debug, Clone)]
pub struct NewPickupPoint {
    pub id: PickupPointId,
    pub registration_date: DateTime<Utc>,
    pub city: String,
}

/// An intake session at a pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: ReceptionId,
    pub date_time: DateTime<Utc>,
    pub pvz_id: PickupPointId,
    pub status: ReceptionStatus,
}

/// An item recorded against a reception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub product_type: ProductType,
    pub reception_id: ReceptionId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_product_serializes_type_field() {
        let product = Product {
            id: ProductId::new(Uuid::nil()),
            date_time: Utc.with_ymd_and_hms(2025, 4, 21, 15, 0, 0).unwrap(),
            product_type: ProductType::Shoes,
            reception_id: ReceptionId::new(Uuid::nil()),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "shoes");
        assert_eq!(json["dateTime"], "2025-04-21T15:00:00Z");
        assert_eq!(json["receptionId"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_reception_serializes_camel_case() {
        let reception = Reception {
            id: ReceptionId::new(Uuid::nil()),
            date_time: Utc.with_ymd_and_hms(2025, 4, 21, 15, 0, 0).unwrap(),
            pvz_id: PickupPointId::new(Uuid::nil()),
            status: ReceptionStatus::InProgress,
        };

        let json = serde_json::to_value(&reception).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert!(json.get("pvzId").is_some());
    }
}
