use fleetdiag_core::domain::{VehicleCategory, VehicleDraft, VehicleId};
use fleetdiag_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn draft(category: VehicleCategory, name: &str) -> VehicleDraft {
    VehicleDraft::new(category, name)
        .expect("draft")
        .with_brand(Some("Honda"))
        .with_price(45_000)
        .expect("price")
}

#[test]
fn insert_lands_in_category_collection() {
    let store = store();
    let vehicle = store
        .vehicles()
        .insert(1_700_000_000, draft(VehicleCategory::Scooty, "Activa 6G"))
        .expect("insert");
    assert_eq!(vehicle.vehicle_type.as_deref(), Some("scooty"));

    assert_eq!(store.vehicles().count(VehicleCategory::Scooty).expect("count"), 1);
    assert_eq!(store.vehicles().count(VehicleCategory::Bike).expect("count"), 0);

    let fetched = store
        .vehicles()
        .get(VehicleCategory::Scooty, vehicle.id)
        .expect("get")
        .expect("vehicle");
    assert_eq!(fetched, vehicle);
    assert!(store
        .vehicles()
        .get(VehicleCategory::Car, vehicle.id)
        .expect("get")
        .is_none());
}

#[test]
fn find_anywhere_searches_all_collections() {
    let store = store();
    let car = store
        .vehicles()
        .insert(1_700_000_000, draft(VehicleCategory::Car, "City"))
        .expect("insert");

    let hits = store.vehicles().find_anywhere(car.id).expect("find");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, VehicleCategory::Car);

    let misses = store.vehicles().find_anywhere(VehicleId::new()).expect("find");
    assert!(misses.is_empty());
}

#[test]
fn list_orders_by_creation() {
    let store = store();
    store
        .vehicles()
        .insert(200, draft(VehicleCategory::Bike, "Later"))
        .expect("insert");
    store
        .vehicles()
        .insert(100, draft(VehicleCategory::Bike, "Earlier"))
        .expect("insert");

    let names: Vec<String> = store
        .vehicles()
        .list(VehicleCategory::Bike)
        .expect("list")
        .into_iter()
        .map(|vehicle| vehicle.name)
        .collect();
    assert_eq!(names, vec!["Earlier".to_string(), "Later".to_string()]);
}
