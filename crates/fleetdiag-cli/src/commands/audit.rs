use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use fleetdiag_store::diagnostics::{audit_vehicle_types, AuditIssue};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct AuditArgs {}

#[derive(Debug, Serialize)]
struct AuditDto {
    vehicles_checked: usize,
    bookings_checked: usize,
    issues: Vec<IssueDto>,
}

#[derive(Debug, Serialize)]
struct IssueDto {
    kind: &'static str,
    record: &'static str,
    id: String,
    message: String,
}

impl From<&AuditIssue> for IssueDto {
    fn from(issue: &AuditIssue) -> Self {
        match issue {
            AuditIssue::VehicleType {
                id,
                collection,
                check,
            } => Self {
                kind: "vehicle_type",
                record: collection.collection(),
                id: id.to_string(),
                message: check.describe(*collection),
            },
            AuditIssue::BookingType {
                id,
                vehicle_id,
                raw,
            } => Self {
                kind: "booking_type",
                record: "bookings",
                id: id.to_string(),
                message: match raw.as_deref().map(str::trim) {
                    Some(raw) if !raw.is_empty() => {
                        format!("vehicle {vehicle_id} has unrecognized type {raw:?}")
                    }
                    _ => format!("vehicle {vehicle_id} has no type"),
                },
            },
            AuditIssue::MissingVehicle {
                id,
                vehicle_id,
                category,
            } => Self {
                kind: "missing_vehicle",
                record: "bookings",
                id: id.to_string(),
                message: format!(
                    "vehicle {vehicle_id} not found in {}",
                    category.collection()
                ),
            },
        }
    }
}

pub fn audit(ctx: &Context<'_>, _args: AuditArgs) -> Result<()> {
    let report = audit_vehicle_types(ctx.store)?;
    let dto = AuditDto {
        vehicles_checked: report.vehicles_checked,
        bookings_checked: report.bookings_checked,
        issues: report.issues.iter().map(IssueDto::from).collect(),
    };

    if ctx.json {
        return print_json(&dto);
    }

    for issue in &dto.issues {
        println!("{} {}: {}", issue.record, issue.id, issue.message);
    }
    println!(
        "checked {} vehicles and {} bookings: {} issue(s)",
        dto.vehicles_checked,
        dto.bookings_checked,
        dto.issues.len()
    );
    Ok(())
}
