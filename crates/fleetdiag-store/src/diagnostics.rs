use crate::error::Result;
use crate::Store;
use fleetdiag_core::domain::{BookingId, VehicleCategory, VehicleId, VehicleType};
use fleetdiag_core::rules::{check_stored_type, StoredTypeCheck};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionCounts {
    pub users: i64,
    pub bikes: i64,
    pub cars: i64,
    pub scooties: i64,
    pub bookings: i64,
}

impl CollectionCounts {
    pub fn vehicles(&self, category: VehicleCategory) -> i64 {
        match category {
            VehicleCategory::Bike => self.bikes,
            VehicleCategory::Car => self.cars,
            VehicleCategory::Scooty => self.scooties,
        }
    }
}

pub fn collection_counts(store: &Store) -> Result<CollectionCounts> {
    let vehicles = store.vehicles();
    Ok(CollectionCounts {
        users: store.users().count()?,
        bikes: vehicles.count(VehicleCategory::Bike)?,
        cars: vehicles.count(VehicleCategory::Car)?,
        scooties: vehicles.count(VehicleCategory::Scooty)?,
        bookings: store.bookings().count()?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditIssue {
    /// A vehicle row whose stored type disagrees with its collection.
    VehicleType {
        id: VehicleId,
        collection: VehicleCategory,
        check: StoredTypeCheck,
    },
    /// A booking whose type cannot be mapped to a collection.
    BookingType {
        id: BookingId,
        vehicle_id: VehicleId,
        raw: Option<String>,
    },
    /// A booking whose vehicle is absent from the collection its type selects.
    MissingVehicle {
        id: BookingId,
        vehicle_id: VehicleId,
        category: VehicleCategory,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub vehicles_checked: usize,
    pub bookings_checked: usize,
    pub issues: Vec<AuditIssue>,
}

pub fn audit_vehicle_types(store: &Store) -> Result<AuditReport> {
    let mut report = AuditReport::default();
    let vehicles = store.vehicles();

    for category in VehicleCategory::ALL {
        for vehicle in vehicles.list(category)? {
            report.vehicles_checked += 1;
            let check = check_stored_type(category, vehicle.vehicle_type.as_deref());
            if check.is_issue() {
                report.issues.push(AuditIssue::VehicleType {
                    id: vehicle.id,
                    collection: category,
                    check,
                });
            }
        }
    }

    for booking in store.bookings().list_all()? {
        report.bookings_checked += 1;
        match booking.normalized_type() {
            Some(VehicleType::Canonical(category)) => {
                if !vehicles.exists(category, booking.vehicle_id)? {
                    report.issues.push(AuditIssue::MissingVehicle {
                        id: booking.id,
                        vehicle_id: booking.vehicle_id,
                        category,
                    });
                }
            }
            Some(VehicleType::Unrecognized(_)) | None => {
                report.issues.push(AuditIssue::BookingType {
                    id: booking.id,
                    vehicle_id: booking.vehicle_id,
                    raw: booking.vehicle_type.clone(),
                });
            }
        }
    }

    tracing::debug!(
        vehicles = report.vehicles_checked,
        bookings = report.bookings_checked,
        issues = report.issues.len(),
        "vehicle type audit finished"
    );
    Ok(report)
}
