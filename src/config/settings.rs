use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for logging and for the registry itself.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log: LogSettings,
    pub registry: RegistrySettings,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
}

/// Configuration settings for the registry.
///
/// `message_capacity` is the number of message slots each new topic
/// preallocates; topics still grow past it on demand.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    pub message_capacity: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub log: Option<PartialLogSettings>,
    pub registry: Option<PartialRegistrySettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRegistrySettings {
    pub message_capacity: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogSettings {
                level: "info".to_string(),
            },
            registry: RegistrySettings {
                message_capacity: 16,
            },
        }
    }
}

impl PartialSettings {
    /// Fill every missing value from `defaults`.
    pub fn merge(self, defaults: Settings) -> Settings {
        Settings {
            log: LogSettings {
                level: self
                    .log
                    .and_then(|l| l.level)
                    .unwrap_or(defaults.log.level),
            },
            registry: RegistrySettings {
                message_capacity: self
                    .registry
                    .and_then(|r| r.message_capacity)
                    .unwrap_or(defaults.registry.message_capacity),
            },
        }
    }
}
