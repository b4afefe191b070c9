use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_price, format_timestamp_datetime, now_utc, parse_price, parse_vehicle_id, yes_no,
};
use anyhow::Result;
use clap::Args;
use fleetdiag_core::domain::{
    normalize_vehicle_type_strict, Vehicle, VehicleCategory, VehicleDraft, VehicleId,
};
use fleetdiag_core::rules::{check_stored_type, StoredTypeCheck};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Args)]
pub struct VehicleArgs {
    /// Defaults to diagnostics.vehicle_id from the config file
    #[arg(long)]
    pub id: Option<String>,
    /// Only search the collection this type maps to
    #[arg(long = "type")]
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddVehicleArgs {
    #[arg(long = "type")]
    pub vehicle_type: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    /// Daily rate, e.g. 450 or 450.50
    #[arg(long)]
    pub price_per_day: Option<String>,
    #[arg(long)]
    pub unavailable: bool,
}

#[derive(Debug, Serialize)]
struct VehicleDto {
    id: VehicleId,
    category: VehicleCategory,
    collection: &'static str,
    name: String,
    brand: Option<String>,
    model: Option<String>,
    vehicle_type: Option<String>,
    type_check: StoredTypeCheck,
    price_per_day_cents: i64,
    available: bool,
    created_at: i64,
}

impl From<Vehicle> for VehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        let type_check = check_stored_type(vehicle.category, vehicle.vehicle_type.as_deref());
        Self {
            id: vehicle.id,
            category: vehicle.category,
            collection: vehicle.category.collection(),
            name: vehicle.name,
            brand: vehicle.brand,
            model: vehicle.model,
            vehicle_type: vehicle.vehicle_type,
            type_check,
            price_per_day_cents: vehicle.price_per_day_cents,
            available: vehicle.available,
            created_at: vehicle.created_at,
        }
    }
}

pub fn show_vehicle(ctx: &Context<'_>, args: VehicleArgs) -> Result<()> {
    let id = match (args.id.as_deref(), ctx.config.diagnostics.vehicle_id) {
        (Some(raw), _) => parse_vehicle_id(raw).map_err(|err| invalid_input(err.to_string()))?,
        (None, Some(id)) => id,
        (None, None) => {
            return Err(invalid_input(
                "no vehicle id given: pass --id or set diagnostics.vehicle_id",
            ))
        }
    };

    let found: Vec<Vehicle> = match args.vehicle_type.as_deref() {
        Some(raw) => {
            let category = normalize_vehicle_type_strict(Some(raw))?
                .ok_or_else(|| invalid_input("vehicle type cannot be empty"))?;
            ctx.store.vehicles().get(category, id)?.into_iter().collect()
        }
        None => ctx.store.vehicles().find_anywhere(id)?,
    };
    if found.is_empty() {
        return Err(not_found(format!("vehicle {id}")));
    }
    if found.len() > 1 {
        warn!(vehicle = %id, copies = found.len(), "vehicle id present in several collections");
    }

    let items: Vec<VehicleDto> = found.into_iter().map(VehicleDto::from).collect();
    if ctx.json {
        return print_json(&items);
    }

    for item in &items {
        print_vehicle(item);
    }
    Ok(())
}

pub fn add_vehicle(ctx: &Context<'_>, args: AddVehicleArgs) -> Result<()> {
    let category = normalize_vehicle_type_strict(Some(args.vehicle_type.as_str()))?
        .ok_or_else(|| invalid_input("vehicle type cannot be empty"))?;
    let price = match args.price_per_day.as_deref() {
        Some(raw) => parse_price(raw).map_err(|err| invalid_input(err.to_string()))?,
        None => 0,
    };
    let draft = VehicleDraft::new(category, &args.name)?
        .with_brand(args.brand.as_deref())
        .with_model(args.model.as_deref())
        .with_price(price)?
        .with_available(!args.unavailable);

    let vehicle = ctx.store.vehicles().insert(now_utc(), draft)?;
    let dto = VehicleDto::from(vehicle);
    if ctx.json {
        return print_json(&dto);
    }

    println!("added {} {} to {}", dto.category, dto.id, dto.collection);
    Ok(())
}

fn print_vehicle(item: &VehicleDto) {
    println!("vehicle {}", item.id);
    println!("  collection: {}", item.collection);
    let make: Vec<&str> = [item.brand.as_deref(), item.model.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if make.is_empty() {
        println!("  name: {}", item.name);
    } else {
        println!("  name: {} ({})", item.name, make.join(" "));
    }
    println!(
        "  stored type: {} [{}]",
        item.vehicle_type.as_deref().unwrap_or("-"),
        item.type_check.describe(item.category)
    );
    println!("  price/day: {}", format_price(item.price_per_day_cents));
    println!("  available: {}", yes_no(item.available));
    println!("  created: {}", format_timestamp_datetime(item.created_at));
}
