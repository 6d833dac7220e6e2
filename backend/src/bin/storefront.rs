//! Run storefront API loaders from the command line and print their result
//! envelopes as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::Serialize;
use storefront::config::ClientSettings;
use storefront::domain::ports::{ApiClient, ApiError};
use storefront::domain::{
    DashboardService, Envelope, NotificationId, OrderId, OrdersService, ProfileService,
    ProfileUpdate, SortKey, StatusFilter, UserId, UserStatisticsService,
};
use storefront::outbound::http::HttpApiClient;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `storefront` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storefront",
    about = "Query the storefront API and print result envelopes as JSON",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Load orders with a summary, filtered by status and sorted.
    Orders {
        /// Status to keep (`completed`, `processing`, `shipped`, or `all`).
        #[arg(long, value_name = "status", default_value = "all")]
        status: String,
        /// Sort key (`date` or `total`); anything else keeps API order.
        #[arg(long, value_name = "key", default_value = "date")]
        sort: String,
    },
    /// Load a user's account, transactions, and derived metrics.
    Metrics {
        #[arg(long = "user", value_name = "id")]
        user_id: UserId,
    },
    /// Email the customer a reminder about an order.
    Remind {
        #[arg(long = "order", value_name = "id")]
        order_id: OrderId,
    },
    /// Mark an order as shipped.
    Ship {
        #[arg(long = "order", value_name = "id")]
        order_id: OrderId,
    },
    /// Show the signed-in profile, or update it when a field is given.
    Profile {
        #[arg(long, value_name = "name")]
        name: Option<String>,
        #[arg(long, value_name = "email")]
        email: Option<String>,
    },
    /// Load the admin dashboard overview.
    Overview,
    /// Mark a dashboard notification as read.
    MarkRead {
        #[arg(long = "notification", value_name = "id")]
        notification_id: NotificationId,
    },
}

fn main() -> io::Result<ExitCode> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<ExitCode> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("storefront")])
        .map_err(|error| io::Error::other(format!("load client settings: {error}")))?;
    let client = HttpApiClient::from_settings(&settings)
        .map_err(|error| io::Error::other(format!("create API client: {error}")))?;

    let rendered = run(args.command, Arc::new(client)).await?;
    println!("{}", rendered.json);
    Ok(if rendered.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// A printed envelope and whether it reported success.
struct Rendered {
    json: String,
    success: bool,
}

async fn run<C>(command: Command, client: Arc<C>) -> io::Result<Rendered>
where
    C: ApiClient,
{
    match command {
        Command::Orders { status, sort } => {
            let filter = StatusFilter::parse(&status);
            let sort = SortKey::parse(&sort);
            render(
                &OrdersService::new(client)
                    .load_dashboard(&filter, sort)
                    .await,
            )
        }
        Command::Metrics { user_id } => {
            render(&UserStatisticsService::new(client).load(&user_id).await)
        }
        Command::Remind { order_id } => {
            render(&OrdersService::new(client).send_reminder(&order_id).await)
        }
        Command::Ship { order_id } => render(&ship(OrdersService::new(client), &order_id).await),
        Command::Profile { name, email } => {
            let profiles = ProfileService::new(client);
            if name.is_none() && email.is_none() {
                render(&profiles.get_profile().await)
            } else {
                render(&profiles.update_profile(&ProfileUpdate { name, email }).await)
            }
        }
        Command::Overview => render(&DashboardService::new(client).load_overview().await),
        Command::MarkRead { notification_id } => {
            let dashboard = DashboardService::new(client);
            let notifications = match dashboard.load_notifications().await {
                Envelope::Success(notifications) => notifications,
                Envelope::Failure(error) => {
                    return render(&Envelope::<()>::failure(error));
                }
            };
            render(
                &dashboard
                    .mark_notification_read(&notifications, &notification_id)
                    .await,
            )
        }
    }
}

async fn ship<C>(orders: OrdersService<C>, order_id: &OrderId) -> Envelope<serde_json::Value>
where
    C: ApiClient,
{
    let loaded = match orders.load_orders().await {
        Envelope::Success(loaded) => loaded,
        Envelope::Failure(error) => return Envelope::failure(error),
    };
    match loaded.iter().find(|order| order.id() == order_id) {
        Some(order) => orders.mark_as_shipped(order).await,
        None => {
            warn!(order = %order_id, "order not found in listing");
            Envelope::failure(ApiError::not_found(format!("order {order_id}")).to_string())
        }
    }
}

fn render<T: Serialize>(envelope: &Envelope<T>) -> io::Result<Rendered> {
    let json = serde_json::to_string_pretty(envelope)
        .map_err(|error| io::Error::other(format!("encode envelope: {error}")))?;
    Ok(Rendered {
        json,
        success: envelope.is_success(),
    })
}
