//! Command handlers

use std::path::{Path, PathBuf};
use std::sync::Arc;

use drivesafe_app::app::{analyze_performance, GarageService, ProfileService, RouteService};
use drivesafe_app::config::Config;
use drivesafe_app::repository::{open_profile_repo, open_route_repo, open_vehicle_repo};
use drivesafe_domain::{Clock, FixedClock, SystemClock};
use drivesafe_infra::track_csv::load_track_from_csv;
use drivesafe_types::{Error, OutputFormat, Result, VehicleRecord};

use crate::cli::{Cli, Commands, GarageCommand, ProfileCommand, RouteCommand, VehicleField};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(ref path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    if let Commands::Config {
        show,
        set_near_threshold,
        set_output,
        ref set_store_dir,
        ref set_user,
        set_accel_threshold,
        reset,
    } = cli.command
    {
        return cmd_config(
            &config_path,
            config,
            ConfigUpdate {
                show,
                near_threshold: set_near_threshold,
                output: set_output,
                store_dir: set_store_dir.clone(),
                accel_threshold: set_accel_threshold,
                user: set_user.clone(),
                reset,
            },
        );
    }

    // Override from CLI args
    if cli.store_dir.is_some() {
        config.store_dir = cli.store_dir.clone();
    }
    let format = cli.format.unwrap_or(config.output_format);
    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock::at_midnight(date)),
        None => Arc::new(SystemClock),
    };

    match cli.command {
        Commands::Garage { action } => cmd_garage(&config, clock, format, action),
        Commands::Route { action } => cmd_route(&config, clock, format, action),
        Commands::Drive { csv, threshold } => {
            let threshold = threshold.unwrap_or(config.acceleration_threshold_mps);
            cmd_drive(&csv, threshold, format)
        }
        Commands::Profile { action } => cmd_profile(&config, clock, format, action),
        Commands::Config { .. } => Ok(()),
    }
}

fn cmd_garage(
    config: &Config,
    clock: Arc<dyn Clock>,
    format: OutputFormat,
    action: GarageCommand,
) -> Result<()> {
    let repo = open_vehicle_repo(config)?;
    let garage = GarageService::new(repo, clock, config.calculator());

    match action {
        GarageCommand::Add { brand, model, year } => {
            let id = garage.add_vehicle(&brand, &model, year)?;
            output::print_vehicle_detail(format, &garage.detail(id)?)
        }
        GarageCommand::List => output::print_vehicle_list(format, &garage.overview()?),
        GarageCommand::Show { id } => output::print_vehicle_detail(format, &garage.detail(id)?),
        GarageCommand::Edit {
            id,
            insurance_paid,
            next_inspection,
            odometer,
            registration,
            tax_cost,
            tax_expiration,
            clear,
        } => {
            let mut record = garage.get(id)?;
            for field in clear {
                clear_field(&mut record, field);
            }
            if insurance_paid.is_some() {
                record.insurance_paid_date = insurance_paid;
            }
            if next_inspection.is_some() {
                record.next_inspection_date = next_inspection;
            }
            if odometer.is_some() {
                record.odometer_at_inspection = odometer;
            }
            if registration.is_some() {
                record.registration_date = registration;
            }
            if tax_cost.is_some() {
                record.tax_cost = tax_cost;
            }
            if tax_expiration.is_some() {
                record.tax_expiration_date = tax_expiration;
            }

            garage.save_edit(&record)?;
            output::print_vehicle_detail(format, &garage.detail(id)?)
        }
        GarageCommand::Delete { id } => {
            garage.remove(id)?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Vehicle {} deleted", id);
            }
            Ok(())
        }
    }
}

fn clear_field(record: &mut VehicleRecord, field: VehicleField) {
    match field {
        VehicleField::InsurancePaid => record.insurance_paid_date = None,
        VehicleField::NextInspection => record.next_inspection_date = None,
        VehicleField::Odometer => record.odometer_at_inspection = None,
        VehicleField::Registration => record.registration_date = None,
        VehicleField::TaxCost => record.tax_cost = None,
        VehicleField::TaxExpiration => record.tax_expiration_date = None,
    }
}

fn resolve_user(arg: Option<String>, config: &Config) -> Result<String> {
    arg.or_else(|| config.user_id.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            Error::InvalidInput(
                "no user given; pass --user or set a default with `config --set-user`".to_string(),
            )
        })
}

fn cmd_route(
    config: &Config,
    clock: Arc<dyn Clock>,
    format: OutputFormat,
    action: RouteCommand,
) -> Result<()> {
    let repo = open_route_repo(config)?;
    let routes = RouteService::new(repo, clock);

    match action {
        RouteCommand::Import { csv, user } => {
            let user = resolve_user(user, config)?;
            let samples = load_track_from_csv(&csv)?;
            let route = routes.record_from_samples(&user, &samples)?;
            output::print_route(format, &route)
        }
        RouteCommand::List { user, all, limit } => {
            let user = if all { None } else { Some(resolve_user(user, config)?) };
            let mut list = routes.list(user.as_deref())?;
            list.truncate(limit);
            output::print_route_list(format, &list)
        }
        RouteCommand::Show { id } => output::print_route(format, &routes.get(&id)?),
    }
}

fn cmd_drive(csv: &Path, threshold: f64, format: OutputFormat) -> Result<()> {
    let samples = load_track_from_csv(csv)?;
    let snapshot = analyze_performance(&samples, threshold);
    output::print_performance(format, &snapshot)
}

fn cmd_profile(
    config: &Config,
    clock: Arc<dyn Clock>,
    format: OutputFormat,
    action: ProfileCommand,
) -> Result<()> {
    let repo = open_profile_repo(config)?;
    let profiles = ProfileService::new(repo, clock);

    match action {
        ProfileCommand::Show { user, email } => {
            let uid = resolve_user(user, config)?;
            output::print_profile(format, &profiles.fetch_or_create(&uid, &email)?)
        }
        ProfileCommand::Edit {
            user,
            username,
            favorite_brand,
            place_of_birth,
            address,
            city,
            year_of_birth,
            licenses,
            clear_licenses,
        } => {
            let uid = resolve_user(user, config)?;
            let mut profile = profiles.fetch_or_create(&uid, "")?;
            if let Some(v) = username {
                profile.username = v;
            }
            if let Some(v) = favorite_brand {
                profile.favorite_car_brand = v;
            }
            if let Some(v) = place_of_birth {
                profile.place_of_birth = v;
            }
            if let Some(v) = address {
                profile.street_address = v;
            }
            if let Some(v) = city {
                profile.city_of_residence = v;
            }
            if year_of_birth.is_some() {
                profile.year_of_birth = year_of_birth;
            }
            if clear_licenses {
                profile.licenses.clear();
            } else if !licenses.is_empty() {
                profile.licenses = licenses;
            }

            let saved = profiles.save(&uid, &profile)?;
            output::print_profile(format, &saved)
        }
    }
}

struct ConfigUpdate {
    show: bool,
    near_threshold: Option<i64>,
    output: Option<OutputFormat>,
    store_dir: Option<PathBuf>,
    accel_threshold: Option<f64>,
    user: Option<String>,
    reset: bool,
}

fn cmd_config(path: &Path, mut config: Config, update: ConfigUpdate) -> Result<()> {
    if update.reset {
        config = Config::default();
        config.save_to(path)?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut modified = false;

    if let Some(days) = update.near_threshold {
        config.near_threshold_days = days;
        modified = true;
    }
    if let Some(format) = update.output {
        config.output_format = format;
        modified = true;
    }
    if let Some(dir) = update.store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }
    if let Some(threshold) = update.accel_threshold {
        config.acceleration_threshold_mps = threshold;
        modified = true;
    }
    if let Some(user) = update.user {
        config.user_id = Some(user).filter(|u| !u.trim().is_empty());
        modified = true;
    }

    if modified {
        config.validate().map_err(Error::InvalidInput)?;
        config.save_to(path)?;
        println!("Configuration saved");
    }

    if update.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
