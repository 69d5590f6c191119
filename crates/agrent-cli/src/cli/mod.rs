//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use agrent_core::config::{self, Config};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "agrent")]
#[command(version)]
#[command(about = "Terminal client for the Smart Agri Rental marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with username and password
    Login {
        #[arg(short, long)]
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Register a new account
    Register {
        #[arg(short, long)]
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        fullname: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
    },

    /// Choose a role after login/signup (completes the login)
    Role {
        /// "owner" or "renter"
        #[arg(value_name = "ROLE")]
        role: String,
    },

    /// Log out (clear the stored session)
    Logout,

    /// Show the stored session state
    Whoami,

    /// Manage vehicles
    Vehicles {
        #[command(subcommand)]
        command: VehicleCommands,
    },

    /// Manage bookings
    Bookings {
        #[command(subcommand)]
        command: BookingCommands,
    },

    /// Show the account profile
    Profile,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum VehicleCommands {
    /// List vehicles (owner: own fleet, renter: available)
    List,
    /// Show one vehicle
    Show {
        #[arg(value_name = "VEHICLE_ID")]
        id: String,
    },
    /// Register a new vehicle (owner only)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long = "type")]
        kind: String,
        /// Rent price per day
        #[arg(long)]
        price: f64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        image1: Option<String>,
        #[arg(long)]
        image2: Option<String>,
    },
    /// Delete a vehicle (owner only)
    Rm {
        #[arg(value_name = "VEHICLE_ID")]
        id: String,
    },
    /// Mark a vehicle unavailable
    Pause {
        #[arg(value_name = "VEHICLE_ID")]
        id: String,
    },
    /// Mark a vehicle available again
    Activate {
        #[arg(value_name = "VEHICLE_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum BookingCommands {
    /// List bookings (renter: own, owner: for own vehicles)
    List,
    /// Request a booking (renter only)
    Create {
        #[arg(long)]
        vehicle: String,
        /// Start time, e.g. "2026-08-10 09:00"
        #[arg(long)]
        from: String,
        /// End time, e.g. "2026-08-12 18:00"
        #[arg(long)]
        to: String,
    },
    /// Confirm a pending booking (owner only)
    Confirm {
        #[arg(value_name = "BOOKING_ID")]
        id: String,
    },
    /// Cancel a booking
    Cancel {
        #[arg(value_name = "BOOKING_ID")]
        id: String,
    },
    /// Mark a confirmed booking completed (owner only)
    Complete {
        #[arg(value_name = "BOOKING_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Write the default config file (keeps existing values)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("load config")?;
    let interactive = cli.command.is_none();
    let _log_guard = init_tracing(&config, interactive);

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, &config).await })
}

/// Initializes tracing.
///
/// Interactive mode logs to a daily file under `${AGRENT_HOME}/logs` so
/// nothing writes to the terminal while the TUI owns it; command mode logs
/// to stderr. The filter comes from `AGRENT_LOG`, falling back to the
/// configured default.
fn init_tracing(config: &Config, interactive: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_env("AGRENT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if interactive {
        let appender = tracing_appender::rolling::daily(config::paths::logs_dir(), "agrent.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}

async fn dispatch(cli: Cli, config: &Config) -> Result<()> {
    // default to the interactive UI
    let Some(command) = cli.command else {
        return commands::tui::run(config).await;
    };

    match command {
        Commands::Login {
            username,
            password,
        } => commands::auth::login(config, &username, password.as_deref()).await,
        Commands::Register {
            username,
            password,
            fullname,
            phone,
            address,
        } => {
            commands::auth::register(
                config,
                commands::auth::RegisterArgs {
                    username,
                    password,
                    fullname,
                    phone,
                    address,
                },
            )
            .await
        }
        Commands::Role {
            role,
        } => commands::auth::select_role(config, &role).await,
        Commands::Logout => commands::auth::logout(config),
        Commands::Whoami => commands::auth::whoami(),

        Commands::Vehicles {
            command,
        } => match command {
            VehicleCommands::List => commands::vehicles::list(config).await,
            VehicleCommands::Show {
                id,
            } => commands::vehicles::show(config, &id).await,
            VehicleCommands::Add {
                name,
                model,
                kind,
                price,
                location,
                image1,
                image2,
            } => {
                commands::vehicles::add(
                    config,
                    commands::vehicles::AddArgs {
                        name,
                        model,
                        kind,
                        price,
                        location,
                        image1,
                        image2,
                    },
                )
                .await
            }
            VehicleCommands::Rm {
                id,
            } => commands::vehicles::remove(config, &id).await,
            VehicleCommands::Pause {
                id,
            } => commands::vehicles::set_availability(config, &id, false).await,
            VehicleCommands::Activate {
                id,
            } => commands::vehicles::set_availability(config, &id, true).await,
        },

        Commands::Bookings {
            command,
        } => match command {
            BookingCommands::List => commands::bookings::list(config).await,
            BookingCommands::Create {
                vehicle,
                from,
                to,
            } => commands::bookings::create(config, &vehicle, &from, &to).await,
            BookingCommands::Confirm {
                id,
            } => {
                commands::bookings::set_status(config, &id, agrent_core::api::BookingStatus::Confirmed)
                    .await
            }
            BookingCommands::Cancel {
                id,
            } => {
                commands::bookings::set_status(config, &id, agrent_core::api::BookingStatus::Cancelled)
                    .await
            }
            BookingCommands::Complete {
                id,
            } => {
                commands::bookings::set_status(config, &id, agrent_core::api::BookingStatus::Completed)
                    .await
            }
        },

        Commands::Profile => commands::profile::show(config).await,

        Commands::Config {
            command,
        } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
