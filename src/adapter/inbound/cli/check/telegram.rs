use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::output;
use crate::error::Result;

/// Test Telegram notification by sending a test message.
#[cfg(feature = "telegram")]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    use crate::adapter::outbound::notifier::telegram::notifier::{send_test_message, TelegramConfig};
    use crate::error::Error;

    let config = prepare(config_path.as_ref())?;
    let tg_config = TelegramConfig::from_env().ok_or_else(|| {
        Error::Notification("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set".to_string())
    })?;
    if !config.telegram.enabled {
        output::warning("telegram is disabled in config; watch will not send alerts");
    }

    let masked_token = mask_token(&tg_config.bot_token);
    let pb = output::spinner("Sending Telegram test message...");
    let text = format!(
        "stockscanner {} test message. Alerts for new listings will arrive here.",
        env!("CARGO_PKG_VERSION")
    );
    if let Err(e) = send_test_message(&tg_config, &text).await {
        output::spinner_fail(&pb, "Telegram test message failed");
        return Err(e);
    }
    output::spinner_success(&pb, "Telegram test message sent");

    if output::is_json() {
        output::json_output(json!({
            "command": "check.telegram",
            "masked_token": masked_token,
            "chat_id": tg_config.chat_id,
            "status": "sent",
        }));
        return Ok(());
    }

    output::section("Telegram Check");
    output::field("Bot token", masked_token);
    output::field("Chat ID", tg_config.chat_id);
    output::hint("check Telegram for the message");

    Ok(())
}

/// Telegram support is compiled out.
#[cfg(not(feature = "telegram"))]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let _config = prepare(config_path.as_ref())?;
    if output::is_json() {
        output::json_output(json!({
            "command": "check.telegram",
            "status": "unavailable",
        }));
    }
    Err(crate::error::Error::Notification(
        "built without the telegram feature".to_string(),
    ))
}

/// Keep the bot id and the last four characters of the secret.
#[cfg_attr(not(feature = "telegram"), allow(dead_code))]
fn mask_token(token: &str) -> String {
    let (id, secret) = token.split_once(':').unwrap_or(("", token));
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if id.is_empty() {
        format!("****{tail}")
    } else {
        format!("{id}:****{tail}")
    }
}
