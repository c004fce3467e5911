//! barograph - live dashboard client for streamed pressure readings.

use std::io::BufRead;

use clap::Parser;
use time::OffsetDateTime;
use tracing::debug;

use barograph_core::{
    DashboardConfig, DashboardState, InboundEvent, SocketClient, event_channel,
};
use barograph_store::assign_colors;
use barograph_types::{Decoded, Decoder};

mod cli;
mod format;

use cli::{Cli, Command, DecodeArgs, WatchArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("barograph={default_level}").parse()?)
                .add_directive(format!("barograph_core={default_level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Watch(args) => watch(args).await,
        Command::Decode(args) => decode(&args),
    }
}

async fn watch(args: WatchArgs) -> anyhow::Result<()> {
    // Load configuration, then let CLI flags override file values
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_default().unwrap_or_default(),
    };
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(devices) = args.devices {
        config.devices = devices;
    }
    if let Some(offset) = args.offset {
        config.calibration_offset = offset;
    }
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    config.validate()?;

    let devices = config.device_set();
    let decoder = if devices.is_empty() {
        Decoder::single_device()
    } else {
        Decoder::multi_device()
    };

    for (id, color) in assign_colors(&devices) {
        eprintln!("device {id} -> {}", color.hex);
    }

    let mut state = DashboardState::new(config.capacity, devices);
    state.set_calibration_offset(config.calibration_offset);

    let (tx, mut rx) = event_channel(256);
    let client = SocketClient::new(&config.url, decoder)?;
    let client_task = tokio::spawn(client.run(tx));

    while let Some(event) = rx.recv().await {
        let line = match &event {
            InboundEvent::Reading { reading } => Some(format::format_reading(
                reading,
                state.store().calibration_offset(),
            )),
            InboundEvent::ServerError { message } => {
                eprintln!("server error: {message}");
                None
            }
            InboundEvent::Connection { status } => {
                eprintln!("connection {status}");
                None
            }
            _ => None,
        };

        let accepted = state.apply(event);
        if accepted && let Some(line) = line {
            println!("{line}");
        } else if !accepted {
            debug!("event did not change state");
        }
    }

    client_task.await??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }

    Ok(())
}

fn decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let decoder = if args.multi {
        Decoder::multi_device()
    } else {
        Decoder::single_device()
    };

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match decoder.decode(&line, OffsetDateTime::now_utc()) {
            Decoded::Reading(reading) => {
                println!("reading    {}", format::format_reading(&reading, 0.0));
            }
            Decoded::ServerError(notice) => println!("error      {}", notice.message),
            Decoded::Handshake => println!("handshake"),
            Decoded::Ignored => println!("ignored"),
        }
    }

    Ok(())
}
