//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use drivesafe_types::{OutputFormat, VehicleId};

#[derive(Parser)]
#[command(name = "drivesafe")]
#[command(version)]
#[command(about = "Track vehicle insurance, inspection and road tax deadlines, and recorded drives")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Data directory override
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Config file override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate deadlines as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage vehicles and their obligations
    Garage {
        #[command(subcommand)]
        action: GarageCommand,
    },

    /// Import and inspect recorded routes
    Route {
        #[command(subcommand)]
        action: RouteCommand,
    },

    /// Replay a GPS track and report speed statistics
    Drive {
        /// CSV file: timestamp, latitude, longitude, [speed_mps]
        csv: PathBuf,

        /// Speed change (m/s) counted as sudden. Uses config value if not specified.
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Show or edit a user profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set days before a deadline at which it is flagged
        #[arg(long, allow_negative_numbers = true)]
        set_near_threshold: Option<i64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set sudden acceleration/braking threshold (m/s)
        #[arg(long, allow_negative_numbers = true)]
        set_accel_threshold: Option<f64>,

        /// Set default user id
        #[arg(long)]
        set_user: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum GarageCommand {
    /// Add a vehicle
    Add {
        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        year: i32,
    },

    /// List vehicles with deadline status
    List,

    /// Show one vehicle with countdowns
    Show { id: VehicleId },

    /// Edit obligation fields of a vehicle
    Edit {
        id: VehicleId,

        /// Date the insurance was paid
        #[arg(long)]
        insurance_paid: Option<NaiveDate>,

        #[arg(long)]
        next_inspection: Option<NaiveDate>,

        /// Odometer (km) at the last inspection
        #[arg(long, allow_negative_numbers = true)]
        odometer: Option<i32>,

        #[arg(long)]
        registration: Option<NaiveDate>,

        #[arg(long, allow_negative_numbers = true)]
        tax_cost: Option<f64>,

        #[arg(long)]
        tax_expiration: Option<NaiveDate>,

        /// Clear a field (repeatable)
        #[arg(long, value_enum)]
        clear: Vec<VehicleField>,
    },

    /// Delete a vehicle
    Delete { id: VehicleId },
}

/// Optional vehicle fields that can be cleared
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VehicleField {
    InsurancePaid,
    NextInspection,
    Odometer,
    Registration,
    TaxCost,
    TaxExpiration,
}

#[derive(Subcommand)]
pub enum RouteCommand {
    /// Record a route from a GPS track CSV
    Import {
        /// CSV file: timestamp, latitude, longitude, [speed_mps]
        csv: PathBuf,

        /// User id. Uses config value if not specified.
        #[arg(long, short = 'u')]
        user: Option<String>,
    },

    /// List routes, newest first
    List {
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Include routes of every user
        #[arg(long)]
        all: bool,

        /// Limit number of entries shown
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },

    /// Show one route
    Show { id: String },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show a profile, creating it on first access
    Show {
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Email recorded if the profile is created
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Update profile fields
    Edit {
        #[arg(long, short = 'u')]
        user: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        favorite_brand: Option<String>,

        #[arg(long)]
        place_of_birth: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        year_of_birth: Option<i32>,

        /// License codes held (replaces the current list; repeatable)
        #[arg(long = "license")]
        licenses: Vec<String>,

        /// Remove all licenses
        #[arg(long, conflicts_with = "licenses")]
        clear_licenses: bool,
    },
}
