//! Nested pickup-point listing.
//!
//! The listing is read as three flat, already-ordered row sets (points,
//! receptions, products) and stitched together here. Input order is kept:
//! points by registration date descending, receptions and products by
//! timestamp ascending.

use std::collections::HashMap;

use serde::Serialize;

use pvz_core::{PickupPointId, ReceptionId};

use super::{PickupPoint, Product, Reception};

/// A reception together with all of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceptionWithProducts {
    pub reception: Reception,
    pub products: Vec<Product>,
}

/// A pickup point together with its receptions in the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickupPointListing {
    pub pvz: PickupPoint,
    pub receptions: Vec<ReceptionWithProducts>,
}

/// Stitch flat row sets into the nested listing.
///
/// Receptions whose point is not in `points`, and products whose reception
/// is not in `receptions`, are dropped.
#[must_use]
pub fn assemble_listing(
    points: Vec<PickupPoint>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
) -> Vec<PickupPointListing> {
    let mut products_by_reception: HashMap<ReceptionId, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    let mut receptions_by_point: HashMap<PickupPointId, Vec<ReceptionWithProducts>> =
        HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_point
            .entry(reception.pvz_id)
            .or_default()
            .push(ReceptionWithProducts {
                reception,
                products,
            });
    }

    points
        .into_iter()
        .map(|pvz| PickupPointListing {
            receptions: receptions_by_point.remove(&pvz.id).unwrap_or_default(),
            pvz,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use pvz_core::{ProductId, ProductType, ReceptionStatus};

    use super::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 21, 12, 0, 0).unwrap()
    }

    fn point(minutes: i64) -> PickupPoint {
        PickupPoint {
            id: PickupPointId::new(Uuid::new_v4()),
            registration_date: base() + Duration::minutes(minutes),
            city: "Казань".to_owned(),
        }
    }

    fn reception(pvz: &PickupPoint, minutes: i64, status: ReceptionStatus) -> Reception {
        Reception {
            id: ReceptionId::new(Uuid::new_v4()),
            date_time: base() + Duration::minutes(minutes),
            pvz_id: pvz.id,
            status,
        }
    }

    fn product(reception: &Reception, seconds: i64) -> Product {
        Product {
            id: ProductId::new(Uuid::new_v4()),
            date_time: reception.date_time + Duration::seconds(seconds),
            product_type: ProductType::Clothing,
            reception_id: reception.id,
        }
    }

    #[test]
    fn test_nests_and_preserves_order() {
        let newer = point(10);
        let older = point(0);

        let r1 = reception(&older, 1, ReceptionStatus::Closed);
        let r2 = reception(&older, 2, ReceptionStatus::InProgress);
        let r3 = reception(&newer, 11, ReceptionStatus::InProgress);

        let p1 = product(&r1, 1);
        let p2 = product(&r1, 2);
        let p3 = product(&r3, 1);

        let listing = assemble_listing(
            vec![newer.clone(), older.clone()],
            vec![r1.clone(), r2.clone(), r3.clone()],
            vec![p1.clone(), p2.clone(), p3.clone()],
        );

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].pvz, newer);
        assert_eq!(listing[1].pvz, older);

        assert_eq!(listing[0].receptions.len(), 1);
        assert_eq!(listing[0].receptions[0].reception, r3);
        assert_eq!(listing[0].receptions[0].products, vec![p3]);

        let older_receptions: Vec<_> = listing[1]
            .receptions
            .iter()
            .map(|r| r.reception.id)
            .collect();
        assert_eq!(older_receptions, vec![r1.id, r2.id]);
        assert_eq!(listing[1].receptions[0].products, vec![p1, p2]);
        assert!(listing[1].receptions[1].products.is_empty());
    }

    #[test]
    fn test_point_without_receptions_is_kept() {
        let lonely = point(0);
        let listing = assemble_listing(vec![lonely.clone()], vec![], vec![]);

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].pvz, lonely);
        assert!(listing[0].receptions.is_empty());
    }

    #[test]
    fn test_orphans_are_dropped() {
        let listed = point(0);
        let unlisted = point(5);
        let orphan = reception(&unlisted, 6, ReceptionStatus::Closed);
        let orphan_product = product(&orphan, 1);

        let listing = assemble_listing(vec![listed], vec![orphan], vec![orphan_product]);

        assert_eq!(listing.len(), 1);
        assert!(listing[0].receptions.is_empty());
    }

    #[test]
    fn test_serializes_nested_shape() {
        let pvz = point(0);
        let r = reception(&pvz, 1, ReceptionStatus::Closed);
        let p = product(&r, 1);

        let listing = assemble_listing(vec![pvz], vec![r], vec![p]);
        let json = serde_json::to_value(&listing).unwrap();

        assert!(json[0]["pvz"]["registrationDate"].is_string());
        assert_eq!(json[0]["receptions"][0]["reception"]["status"], "closed");
        assert_eq!(json[0]["receptions"][0]["products"][0]["type"], "clothing");
    }
}
