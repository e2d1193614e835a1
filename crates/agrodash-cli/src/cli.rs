//! Command-line definitions.

use std::path::PathBuf;

use agrodash_core::models::fertilization::FertilizationStatus;
use agrodash_core::models::irrigation::IrrigationStatus;
use agrodash_core::models::user::Role;
use agrodash_http::{ApiConfig, ExportReport};
use agrodash_session::SessionConfig;
use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "agrodash", version, about = "AgroDash farm-management client")]
pub struct Cli {
    /// Backend base URL (default: http://localhost:8080/api)
    #[arg(long, env = "AGRODASH_API_URL")]
    pub api_url: Option<String>,

    /// File holding the signed-in session
    #[arg(long, env = "AGRODASH_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        config.request_timeout_secs = self.timeout;
        config
    }

    pub fn session_config(&self) -> SessionConfig {
        match &self.session_file {
            Some(path) => SessionConfig {
                storage_path: path.clone(),
            },
            None => SessionConfig::default(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "AGRODASH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        email: String,
        #[arg(long, env = "AGRODASH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "MANAGER")]
        role: Role,
    },
    /// Exchange the stored refresh token for new credentials
    Refresh,
    /// Forget the local session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Resolve a dashboard path through the route guards
    Navigate { path: String },
    /// Summary counts shown on the dashboard home
    Dashboard,
    /// Farm operations
    #[command(subcommand)]
    Farms(FarmCommand),
    /// Parcel operations
    #[command(subcommand)]
    Parcels(ParcelCommand),
    /// Crop operations
    #[command(subcommand)]
    Crops(CropCommand),
    /// Irrigation operations
    #[command(subcommand)]
    Irrigations(IrrigationCommand),
    /// Fertilization operations
    #[command(subcommand)]
    Fertilizations(FertilizationCommand),
    /// User administration
    #[command(subcommand)]
    Users(UserCommand),
    /// Download a spreadsheet report
    Export {
        #[arg(value_enum)]
        report: ReportKind,
        /// Farm or parcel the report is scoped to
        #[arg(long)]
        id: Option<i64>,
        /// Directory the file is saved into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Request bodies are passed as JSON, inline or `@path`.
#[derive(clap::Args, Debug, Clone)]
pub struct Body {
    #[arg(long)]
    pub data: String,
}

#[derive(Subcommand, Debug)]
pub enum FarmCommand {
    List {
        /// Fill in each farm's parcel count
        #[arg(long, default_value_t = false)]
        with_parcel_counts: bool,
    },
    Get { id: i64 },
    Create(Body),
    Update {
        id: i64,
        #[command(flatten)]
        body: Body,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ParcelCommand {
    List,
    Get { id: i64 },
    Create(Body),
    Update {
        id: i64,
        #[command(flatten)]
        body: Body,
    },
    Delete { id: i64 },
    ByFarm { farm_id: i64 },
    ByCrop { crop_id: i64 },
    Weather { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CropCommand {
    List,
    Get { id: i64 },
    Create(Body),
    Update {
        id: i64,
        #[command(flatten)]
        body: Body,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum IrrigationCommand {
    List,
    Get { id: i64 },
    Create(Body),
    Update {
        id: i64,
        #[command(flatten)]
        body: Body,
    },
    Delete { id: i64 },
    ByParcel { parcel_id: i64 },
    ByStatus { status: IrrigationStatus },
    Upcoming,
    SetStatus { id: i64, status: IrrigationStatus },
    /// Start the irrigation now
    Execute { id: i64 },
    Stop { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum FertilizationCommand {
    List,
    Get { id: i64 },
    Create(Body),
    Update {
        id: i64,
        #[command(flatten)]
        body: Body,
    },
    Delete { id: i64 },
    /// Quick-schedule for a parcel, e.g. `2024-05-01T08:00:00`
    Schedule {
        parcel_id: i64,
        scheduled_datetime: NaiveDateTime,
        fertilizer_type: String,
    },
    ByParcel { parcel_id: i64 },
    ByStatus {
        status: FertilizationStatus,
        /// Only the signed-in user's farms
        #[arg(long, default_value_t = false)]
        mine: bool,
    },
    Complete {
        id: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    Cancel {
        id: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    SetStatus { id: i64, status: FertilizationStatus },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,
    Get { id: i64 },
    ToggleEnabled { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// All farms
    Farms,
    /// Irrigations, optionally for one farm (`--id`)
    Irrigations,
    /// Fertilizations, optionally for one farm (`--id`)
    Fertilizations,
    /// Activity of one parcel
    Parcel,
    /// Crop management
    Crops,
    /// Everything about one farm
    Farm,
    /// Weather history of one parcel
    ParcelWeather,
}

impl ReportKind {
    pub fn report(self, id: Option<i64>) -> Result<ExportReport> {
        let required = |id: Option<i64>| match id {
            Some(id) => Ok(id),
            None => bail!("the {self:?} report needs --id"),
        };

        Ok(match self {
            ReportKind::Farms => ExportReport::FarmOverview,
            ReportKind::Irrigations => id.map_or(ExportReport::AllIrrigations, |id| {
                ExportReport::IrrigationsByFarm(id)
            }),
            ReportKind::Fertilizations => id.map_or(ExportReport::AllFertilizations, |id| {
                ExportReport::FertilizationsByFarm(id)
            }),
            ReportKind::Parcel => ExportReport::ParcelActivity(required(id)?),
            ReportKind::Crops => ExportReport::CropManagement,
            ReportKind::Farm => ExportReport::CompleteFarm(required(id)?),
            ReportKind::ParcelWeather => ExportReport::ParcelWeather(required(id)?),
        })
    }
}
