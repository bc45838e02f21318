//! Configuration management for `docroute.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[routes]`  | Routes directory location                       |
//! | `[serve]`   | Development server (interface, port)            |
//! | `[meta]`    | Include/exclude filters for meta requests       |
//! | `[sidebar]` | Include/exclude filters for sidebar requests    |
//!
//! A missing config file is not an error; every section has defaults and
//! unknown keys are tolerated.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};
use crate::routes::FileFilter;
use crate::utils::path::resolve_path;

/// Root configuration structure representing docroute.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root directory, parent of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Log handler failures and other diagnostics.
    pub debug: bool,

    /// Routes directory settings
    pub routes: RoutesConfig,

    /// Development server settings
    pub serve: ServeConfig,

    /// Meta request filters
    pub meta: FilterConfig,

    /// Sidebar request filters
    pub sidebar: FilterConfig,
}

/// `[routes]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Routes directory (relative paths resolve against the project root).
    pub dir: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/routes"),
        }
    }
}

/// `[serve]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
        }
    }
}

/// Regex filter patterns for a request handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Include patterns; empty means the default `.md`/`.svelte` filter.
    pub include: Vec<String>,

    /// Exclude patterns; exclusion always wins.
    pub exclude: Vec<String>,
}

impl FilterConfig {
    pub fn build(&self) -> Result<FileFilter> {
        FileFilter::new(&self.include, &self.exclude).context("invalid filter pattern")
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// A missing config file yields defaults with the current directory as
    /// project root. CLI options override their config counterparts.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current working directory")?;
        let config_path = if cli.config.is_absolute() {
            cli.config.clone()
        } else {
            cwd.join(&cli.config)
        };

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.apply_cli(cli);

        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(routes) = &cli.routes {
            self.routes.dir = routes.clone();
        }
        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    /// Absolute routes directory.
    pub fn routes_dir(&self) -> PathBuf {
        resolve_path(&self.routes.dir, &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = parse("");
        assert!(!config.debug);
        assert_eq!(config.routes.dir, PathBuf::from("src/routes"));
        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.serve.port, 3000);
        assert!(config.meta.include.is_empty());
    }

    #[test]
    fn test_config_sections() {
        let config = parse(
            "debug = true\n\
             [routes]\ndir = \"docs/routes\"\n\
             [serve]\ninterface = \"0.0.0.0\"\nport = 8080\n\
             [meta]\nexclude = [\"^/internal/\"]\n\
             [sidebar]\ninclude = [\"\\\\.md$\"]\n",
        );
        assert!(config.debug);
        assert_eq!(config.routes.dir, PathBuf::from("docs/routes"));
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.meta.exclude, ["^/internal/"]);
        assert_eq!(config.sidebar.include, ["\\.md$"]);
    }

    #[test]
    fn test_filter_config_build() {
        let filter = FilterConfig {
            include: vec![],
            exclude: vec![String::from("^/internal/")],
        }
        .build()
        .unwrap();
        assert!(filter.matches("/docs/intro.md"));
        assert!(!filter.matches("/internal/notes.md"));

        let invalid = FilterConfig {
            include: vec![String::from("(")],
            exclude: vec![],
        };
        assert!(invalid.build().is_err());
    }
}
