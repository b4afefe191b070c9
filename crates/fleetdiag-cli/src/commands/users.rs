use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::format_timestamp_datetime;
use anyhow::{Context as _, Result};
use clap::Args;
use fleetdiag_core::domain::{Booking, UserId, VehicleType};
use fleetdiag_store::Store;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct UserArgs {
    /// Defaults to diagnostics.user_email from the config file
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct UserDto {
    id: UserId,
    email: String,
    full_name: String,
    phone: Option<String>,
    created_at: i64,
    bookings: Vec<BookingDto>,
}

#[derive(Debug, Serialize)]
struct BookingDto {
    id: String,
    vehicle_id: String,
    vehicle_type: Option<String>,
    category: Option<String>,
    vehicle_found: Option<bool>,
    status: String,
    start_at: i64,
    end_at: i64,
}

pub fn show_user(ctx: &Context<'_>, args: UserArgs) -> Result<()> {
    let email = args
        .email
        .or_else(|| ctx.config.diagnostics.user_email.clone())
        .ok_or_else(|| invalid_input("no email given: pass --email or set diagnostics.user_email"))?;
    let limit = args.limit.unwrap_or(ctx.config.diagnostics.bookings_limit);
    if limit <= 0 {
        return Err(invalid_input("limit must be positive"));
    }

    let user = ctx
        .store
        .users()
        .find_by_email(&email)
        .with_context(|| format!("look up user {email}"))?
        .ok_or_else(|| not_found(format!("user {email}")))?;
    let bookings = ctx.store.bookings().list_for_user(user.id, limit)?;
    let bookings = bookings
        .into_iter()
        .map(|booking| booking_dto(ctx.store, booking))
        .collect::<Result<Vec<_>>>()?;

    let dto = UserDto {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        phone: user.phone,
        created_at: user.created_at,
        bookings,
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("{} <{}>", dto.full_name, dto.email);
    println!("  id: {}", dto.id);
    if let Some(phone) = &dto.phone {
        println!("  phone: {}", phone);
    }
    println!("  created: {}", format_timestamp_datetime(dto.created_at));

    if dto.bookings.is_empty() {
        println!("no bookings");
        return Ok(());
    }

    println!("bookings ({}):", dto.bookings.len());
    for booking in &dto.bookings {
        let category = booking.category.as_deref().unwrap_or("?");
        let presence = match booking.vehicle_found {
            Some(true) => "vehicle ok",
            Some(false) => "vehicle missing",
            None => "unknown type",
        };
        println!(
            "  {}  {} {} -> {}  {}  [{}]",
            booking.id,
            format_timestamp_datetime(booking.start_at),
            booking.vehicle_type.as_deref().unwrap_or("-"),
            category,
            booking.status,
            presence
        );
    }
    Ok(())
}

fn booking_dto(store: &Store, booking: Booking) -> Result<BookingDto> {
    let (category, vehicle_found) = match booking.normalized_type() {
        Some(VehicleType::Canonical(category)) => {
            let found = store.vehicles().exists(category, booking.vehicle_id)?;
            (Some(category.as_str().to_string()), Some(found))
        }
        Some(VehicleType::Unrecognized(_)) | None => (None, None),
    };
    Ok(BookingDto {
        id: booking.id.to_string(),
        vehicle_id: booking.vehicle_id.to_string(),
        vehicle_type: booking.vehicle_type,
        category,
        vehicle_found,
        status: booking.status,
        start_at: booking.start_at,
        end_at: booking.end_at,
    })
}
