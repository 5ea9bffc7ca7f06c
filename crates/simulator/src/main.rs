//! MCP4728 power actor simulator
//!
//! Builds a power actor over an in-memory DAC and actor registry, then
//! applies the commands given on the command line in order.
//!
//! ```text
//! cargo run -p simulator -- on=50 power=80 off state
//! cargo run -p simulator -- --reference internal4v096 --actor 3 on off
//! cargo run -p simulator -- --settings actor.json on=25
//! RUST_LOG=debug cargo run -p simulator -- on=100
//! ```

#![allow(missing_docs)]

mod command;
mod host;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use platform::mocks::{MockDac, MockRegistry};
use platform::DacCode;
use power_actor::settings::{PowerControlMode, VoltageReference};
use power_actor::{ActorConfig, PluginSettings, PowerActor};
use tracing_subscriber::EnvFilter;

use command::Command;
use host::LogNotifier;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Reference {
    Vdd,
    Internal2v048,
    Internal4v096,
}

impl From<Reference> for VoltageReference {
    fn from(value: Reference) -> Self {
        match value {
            Reference::Vdd => Self::Vdd,
            Reference::Internal2v048 => Self::Internal2V048,
            Reference::Internal4v096 => Self::Internal4V096,
        }
    }
}

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "Drive a simulated MCP4728 power actor", long_about = None)]
struct Cli {
    /// Settings JSON as stored by the host (overrides the flags below)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Minor DAC address (0-7)
    #[arg(long, default_value_t = 0)]
    address: i64,

    /// DAC channel (0-3)
    #[arg(long, default_value_t = 0)]
    channel: i64,

    /// Voltage reference
    #[arg(long, value_enum, default_value_t = Reference::Vdd)]
    reference: Reference,

    /// Delegate on/off to this actor id instead of zeroing the DAC
    #[arg(long)]
    actor: Option<u32>,

    /// Notification duration in ms (0 disables banners)
    #[arg(long, default_value_t = i64::from(platform::config::DEFAULT_NOTIFICATION_MS))]
    timeout: i64,

    /// Commands: on, on=P, off, power=P, state
    #[arg(required = true)]
    commands: Vec<Command>,
}

impl Cli {
    fn plugin_settings(&self) -> Result<PluginSettings> {
        if let Some(path) = &self.settings {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            return PluginSettings::from_json(&text)
                .with_context(|| format!("parsing settings from {}", path.display()));
        }
        Ok(PluginSettings {
            address: self.address,
            channel: self.channel,
            voltage_ref: self.reference.into(),
            power_control: if self.actor.is_some() {
                PowerControlMode::Actor
            } else {
                PowerControlMode::Dac
            },
            power_actor: self.actor.map(i64::from),
            timeout: self.timeout,
        })
    }
}

type SimActor = PowerActor<MockDac, MockRegistry, LogNotifier>;

/// Output voltage for `code`, when the reference has a fixed full scale.
fn output_mv(actor: &SimActor, code: DacCode) -> Option<u32> {
    let full_scale = u32::from(actor.config().channel.reference.full_scale_mv()?);
    u32::from(code.get())
        .checked_mul(full_scale)
        .and_then(|v| v.checked_div(4096))
}

fn report(actor: &mut SimActor) -> Result<()> {
    let live = actor.read_back().context("reading the DAC channel")?;
    let delegated = actor.delegated_state().context("looking up the power actor")?;
    tracing::info!(
        on = actor.is_on(),
        power = actor.power().get(),
        code = actor.code().get(),
        live = live.get(),
        output_mv = ?output_mv(actor, live),
        delegated = ?delegated,
        "state"
    );
    Ok(())
}

fn apply(actor: &mut SimActor, command: Command) -> Result<()> {
    match command {
        Command::On(power) => actor.on(power)?,
        Command::Off => actor.off()?,
        Command::Power(power) => actor.set_power(power)?,
        Command::State => return report(actor),
    }
    let live = actor.read_back()?;
    tracing::info!(%command, on = actor.is_on(), channel_value = live.get(), "applied");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = cli.plugin_settings()?;
    let config = ActorConfig::try_from(&settings).context("invalid actor settings")?;

    let mut registry = MockRegistry::new();
    if let Some(id) = config.power_control.delegate() {
        registry = registry.with_actor(id);
    }
    tracing::info!(
        plugin = platform::config::PLUGIN_NAME,
        version = platform::config::PLUGIN_VERSION,
        "{}",
        platform::config::PLUGIN_DESCRIPTION
    );
    let dac = MockDac::new().with_address(config.channel.address);
    let mut actor = PowerActor::init(config, dac, registry, LogNotifier::default())
        .context("initialising the power actor")?;

    for command in cli.commands {
        apply(&mut actor, command).with_context(|| format!("command {command}"))?;
    }

    let (dac, _, notifier) = actor.release();
    tracing::info!(
        writes = dac.writes().len(),
        banners = notifier.shown(),
        "simulation finished"
    );
    Ok(())
}
