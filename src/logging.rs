use crate::utils::truncate_str;
use crate::SocialUrl;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: true,
        }
    }
}

const CARD_WIDTH: usize = 70;
const CONTENT_WIDTH: usize = CARD_WIDTH - 14;

// Pads by display width, not char count.
fn card_line(label: &str, value: &str) -> String {
    let value = truncate_str(value, CONTENT_WIDTH);
    let padding = CONTENT_WIDTH.saturating_sub(value.width());
    format!("║ {:<10}{}{} ║", label, value, " ".repeat(padding))
}

fn format_social_card(parsed: &SocialUrl) -> String {
    let horizontal_line = "═".repeat(CARD_WIDTH - 2);
    let mut lines = vec![
        format!("╔{horizontal_line}╗"),
        card_line("URL:", parsed.url().as_str()),
        card_line("Service:", parsed.service().as_str()),
        card_line("Type:", parsed.kind()),
        card_line("ID:", parsed.id()),
    ];
    for (name, value) in parsed.attributes() {
        lines.push(card_line(&format!("{name}:"), value));
    }
    lines.push(format!("╚{horizontal_line}╝"));
    lines.join("\n")
}

pub fn log_social_card(parsed: &SocialUrl) {
    info!("\n{}", format_social_card(parsed));
}

pub fn log_error_card<E: std::error::Error>(url: &str, error: &E) {
    let top_bottom = "═".repeat(CARD_WIDTH - 2);
    let middle = "─".repeat(CARD_WIDTH - 2);

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (caused by: {source})");
    }

    error!(
        "\n╔{}╗\n{}\n║{}║\n{}\n╚{}╝",
        top_bottom,
        card_line("URL:", url),
        middle,
        card_line("Error:", &error_details),
        top_bottom,
    );
}

pub fn setup_logging(config: LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "slinky.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .expect("Failed to set global default subscriber");

    debug!("Logging system initialized with config: {:?}", config);
}

/// Routes events to a scoped subscriber at `level` until dropped.
pub struct LogLevelGuard {
    _guard: tracing::dispatcher::DefaultGuard,
}

impl LogLevelGuard {
    pub fn set_level(level: &str) -> Self {
        let filter = EnvFilter::new(level);
        let subscriber = tracing_subscriber::registry()
            .with(subscriber_fmt::layer().with_test_writer())
            .with(filter);

        LogLevelGuard {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_card_lists_attributes() {
        let parsed = crate::parse("https://floss.social/@alice").unwrap();
        let card = format_social_card(&parsed);
        assert!(card.contains("FLOSSSocial"));
        assert!(card.contains("platform:"));
        assert!(card.contains("Mastodon"));
        assert!(card.contains("username:"));
        assert_eq!(card.lines().count(), 8);
    }

    #[test]
    fn test_card_lines_align_with_wide_characters() {
        let ascii = card_line("ID:", "alice");
        let long = "界".repeat(40);
        for value in ["你好，世界", "ｆｕｌｌｗｉｄｔｈ", long.as_str()] {
            assert_eq!(card_line("ID:", value).width(), ascii.width(), "{value}");
        }
        assert_eq!(ascii.width(), CARD_WIDTH);
    }

    #[test]
    fn test_cards_log_under_guard() {
        let _guard = LogLevelGuard::set_level("debug");
        let parsed = crate::parse("https://github.com/alice").unwrap();
        log_social_card(&parsed);

        let err = crate::parse("https://github.com/").unwrap_err();
        err.log();
        log_error_card("https://github.com/", &err);
    }
}
