use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storefront_core::config::{resolve_config_path, AppConfig};
use toml::Value;

use super::{CommandResult, GlobalArgs};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    api_mode: &'static str,
    entries: Vec<ConfigEntry>,
}

struct Sources<'a> {
    args: &'a GlobalArgs,
    file_doc: Option<Value>,
    file_path: Option<PathBuf>,
}

pub fn run(args: &GlobalArgs) -> CommandResult {
    let config = match AppConfig::load(args.load_options()) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", error),
    };

    let file_path = resolve_config_path(args.config.as_deref());
    let sources =
        Sources { args, file_doc: load_config_file_doc(file_path.as_deref()), file_path };

    let entries = vec![
        sources.entry(
            "api.base_url",
            config.api.base_url.clone(),
            &["STOREFRONT_API_BASE_URL"],
            args.api_url.as_ref().map(|_| "--api-url"),
        ),
        sources.entry(
            "api.timeout_secs",
            config.api.timeout_secs.to_string(),
            &["STOREFRONT_API_TIMEOUT_SECS"],
            args.timeout_secs.map(|_| "--timeout-secs"),
        ),
        sources.entry(
            "catalog.page_size",
            config.catalog.page_size.to_string(),
            &["STOREFRONT_CATALOG_PAGE_SIZE"],
            args.page_size.map(|_| "--page-size"),
        ),
        sources.entry(
            "logging.level",
            config.logging.level.clone(),
            &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
            args.log_level.as_ref().map(|_| "--log-level"),
        ),
        sources.entry(
            "logging.format",
            config.logging.format.as_str().to_string(),
            &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            None,
        ),
    ];

    let message = entries
        .iter()
        .map(|entry| render_line(entry.key, &entry.value, &entry.source))
        .collect::<Vec<_>>()
        .join("\n");
    let api_mode = if sources.args.demo { "demo (in-memory)" } else { "http" };

    CommandResult::success_with(
        "config",
        format!("effective config (source precedence: cli > env > file > default):\n{message}"),
        ConfigReport { api_mode, entries },
    )
}

impl Sources<'_> {
    fn entry(
        &self,
        key: &'static str,
        value: String,
        env_keys: &[&str],
        cli_flag: Option<&str>,
    ) -> ConfigEntry {
        ConfigEntry { key, value, source: self.field_source(key, env_keys, cli_flag) }
    }

    fn field_source(&self, key_path: &str, env_keys: &[&str], cli_flag: Option<&str>) -> String {
        if let Some(flag) = cli_flag {
            return format!("cli ({flag})");
        }

        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.file_doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .file_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::{contains_path, render_line};

    #[test]
    fn contains_path_walks_nested_tables() {
        let doc: toml::Value = "[api]\nbase_url = \"http://localhost\"\n".parse().expect("toml");

        assert!(contains_path(&doc, "api.base_url"));
        assert!(!contains_path(&doc, "api.timeout_secs"));
        assert!(!contains_path(&doc, "catalog.page_size"));
    }

    #[test]
    fn render_line_names_the_source() {
        assert_eq!(
            render_line("catalog.page_size", "5", "default"),
            "- catalog.page_size = 5 (source: default)"
        );
    }
}
