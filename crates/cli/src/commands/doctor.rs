use std::sync::Arc;

use serde::Serialize;
use storefront_api::HttpProductApi;
use storefront_core::config::AppConfig;
use storefront_core::{InMemoryProductApi, ProductApi};

use super::{CommandResult, GlobalArgs};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(args: &GlobalArgs, json_output: bool) -> CommandResult {
    let report = build_report(args);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 4 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(args: &GlobalArgs) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(args.load_options()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_api_reachability(&config, args.demo));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "api_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_api_reachability(config: &AppConfig, demo: bool) -> DoctorCheck {
    let (api, target): (Arc<dyn ProductApi>, String) = if demo {
        (Arc::new(InMemoryProductApi::demo()), "in-memory demo catalog".to_string())
    } else {
        match HttpProductApi::from_config(&config.api) {
            Ok(api) => {
                let target = format!("`{}`", api.base_url());
                (Arc::new(api), target)
            }
            Err(error) => {
                return DoctorCheck {
                    name: "api_reachability",
                    status: CheckStatus::Fail,
                    details: format!("failed to build HTTP client: {error}"),
                };
            }
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "api_reachability",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    match runtime.block_on(api.list()) {
        Ok(products) => DoctorCheck {
            name: "api_reachability",
            status: CheckStatus::Pass,
            details: format!("listed {} products from {target}", products.len()),
        },
        Err(error) => DoctorCheck {
            name: "api_reachability",
            status: CheckStatus::Fail,
            details: format!("failed to list products from {target}: {error}"),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
