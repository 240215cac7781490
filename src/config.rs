use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Bytes taken from a connection in its single read. Anything past this is
/// never seen by the parser.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "DOCROOT_CONFIG";

const DEFAULT_LOG_PATH: &str = "docroot.log";

const ROOT_PREFIX: &str = "-webRoot=";
const ADDRESS_PREFIX: &str = "-webIP=";
const PORT_PREFIX: &str = "-webPort=";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected 3 arguments (-webRoot=, -webIP=, -webPort=), got {0}")]
    ArgumentCount(usize),
    #[error("missing argument {0}")]
    MissingArgument(&'static str),
    #[error("unrecognized or repeated argument '{0}'")]
    UnexpectedArgument(String),
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("web root '{}' is not an existing directory", .0.display())]
    InvalidWebRoot(PathBuf),
    #[error("read buffer size must be greater than zero")]
    InvalidBufferSize,
    #[error("failed to read config file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

/// The immutable triple the server is started with.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Dotted-quad bind address, kept as typed for Host comparison
    pub address: String,
    pub port: u16,
    /// Directory resources are served from
    pub web_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

impl Config {
    /// Loads from the YAML file named by `DOCROOT_CONFIG` if set, otherwise
    /// from the command-line arguments (program name excluded).
    pub fn load<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Self::from_args(args),
        }
    }

    /// Parses `-webRoot=<dir> -webIP=<addr> -webPort=<port>` in any order.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if args.len() != 3 {
            return Err(ConfigError::ArgumentCount(args.len()));
        }

        let mut root = None;
        let mut address = None;
        let mut port = None;

        for arg in &args {
            let (slot, value) = if let Some(v) = arg.strip_prefix(ROOT_PREFIX) {
                (&mut root, v)
            } else if let Some(v) = arg.strip_prefix(ADDRESS_PREFIX) {
                (&mut address, v)
            } else if let Some(v) = arg.strip_prefix(PORT_PREFIX) {
                (&mut port, v)
            } else {
                return Err(ConfigError::UnexpectedArgument(arg.clone()));
            };

            if slot.is_some() {
                return Err(ConfigError::UnexpectedArgument(arg.clone()));
            }
            *slot = Some(value.to_string());
        }

        let root = root.ok_or(ConfigError::MissingArgument(ROOT_PREFIX))?;
        let address = address.ok_or(ConfigError::MissingArgument(ADDRESS_PREFIX))?;
        let port = port.ok_or(ConfigError::MissingArgument(PORT_PREFIX))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;

        let config = Config {
            server: ServerConfig {
                address,
                port,
                web_root: PathBuf::from(root),
            },
            log: LogConfig::default(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_ip()?;
        if !self.server.web_root.is_dir() {
            return Err(ConfigError::InvalidWebRoot(self.server.web_root.clone()));
        }
        if self.read_buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize);
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Parses the address as four decimal octets, each 0-255.
    pub fn bind_ip(&self) -> Result<Ipv4Addr, ConfigError> {
        let invalid = || ConfigError::InvalidAddress(self.address.clone());

        let octets: Vec<u8> = self
            .address
            .split('.')
            .map(|piece| parse_octet(piece).ok_or_else(invalid))
            .collect::<Result<_, _>>()?;

        let [a, b, c, d] = octets[..] else {
            return Err(invalid());
        };
        Ok(Ipv4Addr::new(a, b, c, d))
    }
}

// Leading zeros are accepted ("010" is 10), unlike `Ipv4Addr::from_str`.
fn parse_octet(piece: &str) -> Option<u8> {
    if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    piece.parse::<u8>().ok()
}
