use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use fleetdiag_store::diagnostics::collection_counts;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct CountsArgs {}

#[derive(Debug, Serialize)]
struct CountsDto {
    users: i64,
    bikes: i64,
    cars: i64,
    scooties: i64,
    bookings: i64,
}

pub fn counts(ctx: &Context<'_>, _args: CountsArgs) -> Result<()> {
    let counts = collection_counts(ctx.store)?;
    let dto = CountsDto {
        users: counts.users,
        bikes: counts.bikes,
        cars: counts.cars,
        scooties: counts.scooties,
        bookings: counts.bookings,
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("users     {:>8}", dto.users);
    println!("bikes     {:>8}", dto.bikes);
    println!("cars      {:>8}", dto.cars);
    println!("scooties  {:>8}", dto.scooties);
    println!("bookings  {:>8}", dto.bookings);
    Ok(())
}
