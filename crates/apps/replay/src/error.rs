use waypoints::ConfigError;

use crate::script::ScriptError;

#[derive(Debug)]
pub enum ReplayError {
    Config(ConfigError),
    Script(ScriptError),
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Config(e) => write!(f, "configuration error: {e}"),
            ReplayError::Script(e) => write!(f, "script error: {e}"),
            ReplayError::Io(e) => write!(f, "output error: {e}"),
            ReplayError::Encode(e) => write!(f, "failed to encode snapshot: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Config(e) => Some(e),
            ReplayError::Script(e) => Some(e),
            ReplayError::Io(e) => Some(e),
            ReplayError::Encode(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        ReplayError::Config(e)
    }
}

impl From<ScriptError> for ReplayError {
    fn from(e: ScriptError) -> Self {
        ReplayError::Script(e)
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Encode(e)
    }
}
