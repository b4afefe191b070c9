use crate::commands::print_json;
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use fleetdiag_config::AppConfig;
use fleetdiag_core::domain::{
    is_valid_vehicle_type, normalize_vehicle_type, normalize_vehicle_type_strict, VehicleType,
};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,
    /// Fail on tokens that match no known spelling
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedDto {
    input: String,
    result: Option<String>,
    canonical: bool,
}

#[derive(Debug, Serialize)]
struct ValidityDto {
    input: String,
    valid: bool,
}

pub fn normalize(json: bool, config: &AppConfig, args: NormalizeArgs) -> Result<()> {
    let strict = args.strict || config.normalization.strict;
    let mut items = Vec::with_capacity(args.tokens.len());
    for token in args.tokens {
        let result = if strict {
            normalize_vehicle_type_strict(Some(token.as_str()))?.map(VehicleType::Canonical)
        } else {
            normalize_vehicle_type(Some(token.as_str()))
        };
        items.push(NormalizedDto {
            canonical: result.as_ref().is_some_and(VehicleType::is_canonical),
            result: result.map(|value| value.as_str().to_string()),
            input: token,
        });
    }

    if json {
        return print_json(&items);
    }

    for item in items {
        match (&item.result, item.canonical) {
            (None, _) => println!("{:?} -> (none)", item.input),
            (Some(value), true) => println!("{:?} -> {}", item.input, value),
            (Some(value), false) => println!("{:?} -> {} (unrecognized)", item.input, value),
        }
    }
    Ok(())
}

pub fn validate(json: bool, args: ValidateArgs) -> Result<()> {
    let items: Vec<ValidityDto> = args
        .tokens
        .into_iter()
        .map(|token| ValidityDto {
            valid: is_valid_vehicle_type(Some(token.as_str())),
            input: token,
        })
        .collect();
    let invalid = items.iter().filter(|item| !item.valid).count();

    if json {
        print_json(&items)?;
    } else {
        for item in &items {
            let label = if item.valid { "valid" } else { "invalid" };
            println!("{:?}: {}", item.input, label);
        }
    }

    if invalid > 0 {
        return Err(invalid_input(format!(
            "{invalid} of {} vehicle types not recognized",
            items.len()
        )));
    }
    Ok(())
}
