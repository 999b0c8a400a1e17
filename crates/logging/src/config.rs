//! crates/logging/src/config.rs
//! Verbosity configuration and its rendering into filter directives.

use super::levels::{DebugFlag, DebugLevels};

/// Verbosity configuration for the debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (the number of `-v`).
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.debug.walk = 1;
            }
            2 => {
                config.debug.walk = 2;
                config.debug.skip = 1;
                config.debug.fs = 1;
            }
            _ => {
                config.debug.set_all(3);
            }
        }

        config
    }

    /// Apply a single debug flag token (e.g., "walk2", "skip").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let flag =
            DebugFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }

    /// Apply a comma-separated list of debug flag tokens (e.g., "walk,skip2").
    ///
    /// The special token `all` sets every flag, honouring an optional level.
    pub fn apply_debug_flags(&mut self, list: &str) -> Result<(), String> {
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (name, level) = parse_flag_token(token)?;
            if name == "all" {
                self.debug.set_all(level);
            } else {
                self.apply_debug_flag(token)?;
            }
        }
        Ok(())
    }

    /// Renders the configuration as an `EnvFilter` directive string.
    ///
    /// Everything outside the workspace targets stays at `warn`.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let mut directives = vec!["warn".to_string()];
        for flag in DebugFlag::ALL {
            if let Some(level) = level_name(self.debug.get(flag)) {
                directives.push(format!("{}={level}", flag.target()));
            }
        }
        directives.join(",")
    }
}

const fn level_name(level: u8) -> Option<&'static str> {
    match level {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Parse a flag token like "walk2" into ("walk", 2) or "skip" into ("skip", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}
