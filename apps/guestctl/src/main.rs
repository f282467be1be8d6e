use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{GuestApi, HttpGuestApi, StatusChange};
use shared::{
    domain::{GuestId, MarkAction},
    outreach::{self, WeddingDetails},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Guest review helper for scripts and terminals")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Record that a guest was contacted (requested) or has no account (not_on_fb).
    Mark { guest_id: GuestId, action: MarkAction },
    /// Store a mailing address; no words clears it.
    SetAddress {
        guest_id: GuestId,
        address: Vec<String>,
    },
    /// Print the messaging link for a guest.
    Link {
        #[arg(long)]
        name: String,
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Print the default outreach message for a guest.
    Message {
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    match args.command {
        Command::Link {
            name,
            profile,
            message,
        } => {
            println!(
                "{}",
                outreach::messenger_link(profile.as_deref(), Some(&name), message.as_deref())
            );
        }
        Command::Message { name } => {
            println!(
                "{}",
                outreach::fallback_message(outreach::first_name(&name), &WeddingDetails::default())
            );
        }
        Command::Mark { guest_id, action } => {
            let api = connect(&args.server_url, args.timeout_secs)?;
            report(api.mark_guest(guest_id, action).await?);
        }
        Command::SetAddress { guest_id, address } => {
            let api = connect(&args.server_url, args.timeout_secs)?;
            let address = address.join(" ").trim().to_string();
            report(api.update_address(guest_id, &address).await?);
        }
    }

    Ok(())
}

fn connect(server_url: &str, timeout_secs: u64) -> Result<HttpGuestApi> {
    Ok(HttpGuestApi::with_timeout(
        server_url,
        Duration::from_secs(timeout_secs.max(1)),
    )?)
}

fn report(change: StatusChange) {
    match change.new_address {
        Some(address) if !address.is_empty() => println!(
            "guest {} is now {} ({address})",
            change.guest_id,
            change.new_status.label()
        ),
        _ => println!("guest {} is now {}", change.guest_id, change.new_status.label()),
    }
}
