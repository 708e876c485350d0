pub mod browse;
pub mod categories;
pub mod config;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod list;
pub mod open;
pub mod show;
pub mod update;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use storefront_api::HttpProductApi;
use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use storefront_core::{
    ApplicationError, CatalogStore, DetailView, InMemoryProductApi, ListView, ProductApi,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with(command, message, Value::Null)
    }

    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 5);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            correlation_id: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            correlation_id: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps any application failure through the interface error contract.
    pub fn from_error(command: &str, error: impl Into<ApplicationError>) -> Self {
        let interface = error.into().into_interface(Uuid::new_v4().to_string());
        tracing::warn!(
            event_name = "cli.command.failed",
            command,
            correlation_id = interface.correlation_id(),
            error_class = interface.error_class(),
            error = interface.message(),
            "command failed"
        );
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(interface.error_class().to_string()),
            correlation_id: Some(interface.correlation_id().to_string()),
            message: format!("{} ({})", interface.user_message(), interface.message()),
            data: None,
        };
        Self { exit_code: interface.exit_code(), output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "Path to a storefront.toml config file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the product API base URL")]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "Override the list page size")]
    pub page_size: Option<usize>,
    #[arg(long, global = true, help = "Override the API request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Override the log level filter (e.g. debug, info)")]
    pub log_level: Option<String>,
    #[arg(long, global = true, help = "Use the built-in in-memory demo catalog")]
    pub demo: bool,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                api_base_url: self.api_url.clone(),
                api_timeout_secs: self.timeout_secs,
                page_size: self.page_size,
                log_level: self.log_level.clone(),
            },
        }
    }
}

/// One catalog session: config, runtime, and the shared store.
pub struct Session {
    pub config: AppConfig,
    pub runtime: Runtime,
    pub store: Arc<CatalogStore>,
}

impl Session {
    pub fn open(command: &str, args: &GlobalArgs) -> Result<Self, CommandResult> {
        let config = AppConfig::load(args.load_options())
            .map_err(|error| CommandResult::from_error(command, error))?;
        Self::with_config(command, config, args.demo)
    }

    pub fn with_config(command: &str, config: AppConfig, demo: bool) -> Result<Self, CommandResult> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(
            |error| {
                CommandResult::failure(
                    command,
                    "runtime_init",
                    format!("failed to initialize async runtime: {error}"),
                    6,
                )
            },
        )?;

        let api: Arc<dyn ProductApi> = if demo {
            Arc::new(InMemoryProductApi::demo())
        } else {
            Arc::new(
                HttpProductApi::from_config(&config.api)
                    .map_err(|error| CommandResult::from_error(command, error))?,
            )
        };

        Ok(Self { config, runtime, store: Arc::new(CatalogStore::new(api)) })
    }

    pub fn list_view(&self) -> ListView {
        ListView::new(self.store.clone(), self.config.catalog.page_size)
    }

    pub fn detail_view(&self) -> DetailView {
        DetailView::new(self.store.clone())
    }

    /// List view with the catalog already loaded.
    pub fn loaded_list_view(&self, command: &str) -> Result<ListView, CommandResult> {
        let mut view = self.list_view();
        self.runtime
            .block_on(view.load())
            .map_err(|error| CommandResult::from_error(command, error))?;
        Ok(view)
    }
}
