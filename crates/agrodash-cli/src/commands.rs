//! Subcommand execution. Results are printed as pretty JSON on stdout.

use std::fs;

use agrodash_core::client::{
    CropClient, FarmClient, FertilizationClient, IrrigationClient, ParcelClient, UserClient,
};
use agrodash_core::models::fertilization::ScheduleFertilization;
use agrodash_core::models::user::{LoginRequest, RegisterRequest};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::app::App;
use crate::cli::{
    Body, Command, CropCommand, FarmCommand, FertilizationCommand, IrrigationCommand,
    ParcelCommand, UserCommand,
};
use crate::dashboard::{DashboardStats, parcel_counts};

pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let identity = app.session.login(LoginRequest { email, password }).await?;
            print(&identity.user)
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            role,
        } => {
            let identity = app
                .session
                .register(RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    role,
                })
                .await?;
            print(&identity.user)
        }
        Command::Refresh => {
            let identity = app.session.refresh().await?;
            print(&json!({
                "user": identity.user,
                "accessTokenExpiresAt": identity.access_token_expires_at(),
            }))
        }
        Command::Logout => {
            app.session.logout();
            print(&json!({ "loggedOut": true }))
        }
        Command::Whoami => match app.session.current_identity() {
            Some(identity) => print(&json!({
                "user": identity.user,
                "accessTokenExpiresAt": identity.access_token_expires_at(),
            })),
            None => print(&json!({ "user": null })),
        },
        Command::Navigate { path } => {
            let navigation = app.router.navigate(&path)?;
            print(&json!({
                "requested": navigation.requested,
                "location": navigation.location,
                "redirected": navigation.redirected(),
                "params": navigation.params,
            }))
        }
        Command::Dashboard => {
            let api = &app.api;
            let stats = DashboardStats::load(
                &api.farms,
                &api.parcels,
                &api.irrigations,
                &api.fertilizations,
            )
            .await;
            print(&stats)
        }
        Command::Farms(cmd) => farms(app, cmd).await,
        Command::Parcels(cmd) => parcels(app, cmd).await,
        Command::Crops(cmd) => crops(app, cmd).await,
        Command::Irrigations(cmd) => irrigations(app, cmd).await,
        Command::Fertilizations(cmd) => fertilizations(app, cmd).await,
        Command::Users(cmd) => users(app, cmd).await,
        Command::Export { report, id, dir } => {
            let file = app.export.download(report.report(id)?, &dir).await?;
            print(&json!({
                "path": file.path,
                "filename": file.filename,
                "size": file.size,
            }))
        }
    }
}

async fn farms(app: &App, cmd: FarmCommand) -> Result<()> {
    let client = &app.api.farms;
    match cmd {
        FarmCommand::List { with_parcel_counts } => {
            let farms = client.list().await?;
            if with_parcel_counts {
                print(&parcel_counts(&app.api.parcels, farms).await)
            } else {
                print(&farms)
            }
        }
        FarmCommand::Get { id } => print(&client.get_by_id(id).await?),
        FarmCommand::Create(body) => print(&client.create(body.parse()?).await?),
        FarmCommand::Update { id, body } => print(&client.update(id, body.parse()?).await?),
        FarmCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
    }
}

async fn parcels(app: &App, cmd: ParcelCommand) -> Result<()> {
    let client = &app.api.parcels;
    match cmd {
        ParcelCommand::List => print(&client.list().await?),
        ParcelCommand::Get { id } => print(&client.get_by_id(id).await?),
        ParcelCommand::Create(body) => print(&client.create(body.parse()?).await?),
        ParcelCommand::Update { id, body } => print(&client.update(id, body.parse()?).await?),
        ParcelCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
        ParcelCommand::ByFarm { farm_id } => print(&client.list_by_farm(farm_id).await?),
        ParcelCommand::ByCrop { crop_id } => print(&client.list_by_crop(crop_id).await?),
        ParcelCommand::Weather { id } => print(&client.weather(id).await?),
    }
}

async fn crops(app: &App, cmd: CropCommand) -> Result<()> {
    let client = &app.api.crops;
    match cmd {
        CropCommand::List => print(&client.list().await?),
        CropCommand::Get { id } => print(&client.get_by_id(id).await?),
        CropCommand::Create(body) => print(&client.create(body.parse()?).await?),
        CropCommand::Update { id, body } => print(&client.update(id, body.parse()?).await?),
        CropCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
    }
}

async fn irrigations(app: &App, cmd: IrrigationCommand) -> Result<()> {
    let client = &app.api.irrigations;
    match cmd {
        IrrigationCommand::List => print(&client.list().await?),
        IrrigationCommand::Get { id } => print(&client.get_by_id(id).await?),
        IrrigationCommand::Create(body) => print(&client.create(body.parse()?).await?),
        IrrigationCommand::Update { id, body } => {
            print(&client.update(id, body.parse()?).await?)
        }
        IrrigationCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
        IrrigationCommand::ByParcel { parcel_id } => {
            print(&client.list_by_parcel(parcel_id).await?)
        }
        IrrigationCommand::ByStatus { status } => print(&client.list_by_status(status).await?),
        IrrigationCommand::Upcoming => print(&client.list_upcoming().await?),
        IrrigationCommand::SetStatus { id, status } => {
            print(&client.update_status(id, status).await?)
        }
        IrrigationCommand::Execute { id } => {
            print(&json!({ "id": id, "message": client.execute(id).await? }))
        }
        IrrigationCommand::Stop { id } => {
            print(&json!({ "id": id, "message": client.stop(id).await? }))
        }
    }
}

async fn fertilizations(app: &App, cmd: FertilizationCommand) -> Result<()> {
    let client = &app.api.fertilizations;
    match cmd {
        FertilizationCommand::List => print(&client.list().await?),
        FertilizationCommand::Get { id } => print(&client.get_by_id(id).await?),
        FertilizationCommand::Create(body) => print(&client.create(body.parse()?).await?),
        FertilizationCommand::Update { id, body } => {
            print(&client.update(id, body.parse()?).await?)
        }
        FertilizationCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
        FertilizationCommand::Schedule {
            parcel_id,
            scheduled_datetime,
            fertilizer_type,
        } => {
            let input = ScheduleFertilization {
                parcel_id,
                scheduled_datetime,
                fertilizer_type,
            };
            print(&client.schedule(input).await?)
        }
        FertilizationCommand::ByParcel { parcel_id } => {
            print(&client.list_by_parcel(parcel_id).await?)
        }
        FertilizationCommand::ByStatus { status, mine: true } => {
            print(&client.list_by_status_for_user(status).await?)
        }
        FertilizationCommand::ByStatus { status, mine: false } => {
            print(&client.list_by_status(status).await?)
        }
        FertilizationCommand::Complete { id, notes } => {
            print(&client.complete(id, notes).await?)
        }
        FertilizationCommand::Cancel { id, notes } => print(&client.cancel(id, notes).await?),
        FertilizationCommand::SetStatus { id, status } => {
            print(&client.update_status(id, status).await?)
        }
    }
}

async fn users(app: &App, cmd: UserCommand) -> Result<()> {
    let client = &app.api.users;
    match cmd {
        UserCommand::List => print(&client.list().await?),
        UserCommand::Get { id } => print(&client.get_by_id(id).await?),
        UserCommand::ToggleEnabled { id } => print(&client.toggle_enabled(id).await?),
        UserCommand::Delete { id } => {
            client.delete(id).await?;
            print(&json!({ "deleted": id }))
        }
    }
}

impl Body {
    /// Decode `--data`, reading it from a file when prefixed with `@`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = match self.data.strip_prefix('@') {
            Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
            None => self.data.clone(),
        };
        serde_json::from_str(&raw).context("--data is not a valid request body")
    }
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
