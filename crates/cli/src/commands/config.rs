use std::env;

use glint_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line("database.url", &config.database.url, "GLINT_DATABASE_URL"));
    lines.push(render_line(
        "database.max_connections",
        &config.database.max_connections.to_string(),
        "GLINT_DATABASE_MAX_CONNECTIONS",
    ));
    lines.push(render_line(
        "database.timeout_secs",
        &config.database.timeout_secs.to_string(),
        "GLINT_DATABASE_TIMEOUT_SECS",
    ));
    lines.push(render_line(
        "delivery.residential_endpoint",
        &config.delivery.residential_endpoint,
        "GLINT_DELIVERY_RESIDENTIAL_ENDPOINT",
    ));
    lines.push(render_line(
        "delivery.commercial_endpoint",
        &config.delivery.commercial_endpoint,
        "GLINT_DELIVERY_COMMERCIAL_ENDPOINT",
    ));
    lines.push(render_line(
        "delivery.airbnb_endpoint",
        &config.delivery.airbnb_endpoint,
        "GLINT_DELIVERY_AIRBNB_ENDPOINT",
    ));
    lines.push(render_line(
        "delivery.timeout_secs",
        &config.delivery.timeout_secs.to_string(),
        "GLINT_DELIVERY_TIMEOUT_SECS",
    ));
    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        "GLINT_SERVER_BIND_ADDRESS",
    ));
    lines.push(render_line("server.port", &config.server.port.to_string(), "GLINT_SERVER_PORT"));
    lines.push(render_line("logging.level", &config.logging.level, "GLINT_LOG_LEVEL"));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        "GLINT_LOG_FORMAT",
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, env_var: &str) -> String {
    let source = if env::var(env_var).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        format!("env:{env_var}")
    } else {
        "file-or-default".to_string()
    };
    format!("  {key} = {value}  ({source})")
}
