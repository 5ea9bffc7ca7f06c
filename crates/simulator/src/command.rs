//! Command-line actions applied to the simulated actor.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use platform::PowerPercent;

/// One step of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `on` or `on=P`
    On(Option<PowerPercent>),
    /// `off`
    Off,
    /// `power=P`
    Power(PowerPercent),
    /// `state`
    State,
}

fn parse_percent(text: &str) -> anyhow::Result<PowerPercent> {
    let value: u8 = text
        .trim()
        .parse()
        .with_context(|| format!("power '{text}' is not a number"))?;
    PowerPercent::try_new(value).map_err(|e| anyhow!("power {value}: {e}"))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        match (name.trim().to_ascii_lowercase().as_str(), arg) {
            ("on", None) => Ok(Self::On(None)),
            ("on", Some(p)) => Ok(Self::On(Some(parse_percent(p)?))),
            ("off", None) => Ok(Self::Off),
            ("power", Some(p)) => Ok(Self::Power(parse_percent(p)?)),
            ("state", None) => Ok(Self::State),
            _ => bail!("unknown command '{s}' (expected on[=P], off, power=P or state)"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(None) => write!(f, "on"),
            Self::On(Some(p)) => write!(f, "on={}", p.get()),
            Self::Off => write!(f, "off"),
            Self::Power(p) => write!(f, "power={}", p.get()),
            Self::State => write!(f, "state"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_form() {
        assert_eq!("on".parse::<Command>().unwrap(), Command::On(None));
        assert_eq!(
            "on=75".parse::<Command>().unwrap(),
            Command::On(Some(PowerPercent::new(75)))
        );
        assert_eq!("OFF".parse::<Command>().unwrap(), Command::Off);
        assert_eq!(
            "power=0".parse::<Command>().unwrap(),
            Command::Power(PowerPercent::ZERO)
        );
        assert_eq!("state".parse::<Command>().unwrap(), Command::State);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("power".parse::<Command>().is_err());
        assert!("power=101".parse::<Command>().is_err());
        assert!("on=abc".parse::<Command>().is_err());
        assert!("off=1".parse::<Command>().is_err());
        assert!("toggle".parse::<Command>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for text in ["on", "on=5", "off", "power=100", "state"] {
            assert_eq!(text.parse::<Command>().unwrap().to_string(), text);
        }
    }
}
