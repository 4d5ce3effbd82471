//! Message formatting for Telegram notifications.

use crate::port::outbound::notifier::{Event, NewListingsEvent, ScanEvent};

use super::notifier::TelegramConfig;

/// Format an event into a Telegram message, or None if the event should be skipped.
pub fn format_event_message(event: &Event, config: &TelegramConfig) -> Option<String> {
    match event {
        Event::NewListings(e) => Some(format_new_listings(e)),
        Event::ScanCompleted(e) if config.notify_scans => Some(format_scan(e)),
        Event::ScanCompleted(_) => None,
    }
}

fn format_new_listings(e: &NewListingsEvent) -> String {
    let exchange = e.exchange.as_deref().unwrap_or("all exchanges");
    let mut msg = format!(
        "🆕 *{}*\n\
        \n\
        🏛️ Exchange: `{}`\n\
        📋 Visible: `{}`\n",
        escape_markdown(&e.title()),
        escape_markdown(exchange),
        e.total
    );

    if !e.symbols.is_empty() {
        msg.push('\n');
        for symbol in &e.symbols {
            msg.push_str(&format!("• `{}`\n", escape_markdown(&truncate(symbol, 16))));
        }
    }

    msg
}

fn format_scan(e: &ScanEvent) -> String {
    let exchange = e.exchange.as_deref().unwrap_or("all exchanges");
    let result = match e.new_listings {
        Some(count) => format!("`{count}` new"),
        None => "no new listings".to_string(),
    };

    format!(
        "🔍 *Scan Completed*\n\
        \n\
        🏛️ Exchange: `{}`\n\
        📈 Result: {}\n\
        📝 {}",
        escape_markdown(exchange),
        result,
        escape_markdown(&truncate(&e.message, 120))
    )
}

/// Truncate a string to a maximum number of characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::notifier::DetectionSource;
    use crate::testkit::domain::listings;

    fn config(notify_scans: bool) -> TelegramConfig {
        TelegramConfig {
            bot_token: "token".into(),
            chat_id: 1,
            notify_scans,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("BRK.B"), "BRK\\.B");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("0700-HK"), "0700\\-HK");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer symbol", 8), "a longer...");
    }

    #[test]
    fn new_listings_message_lists_symbols() {
        let event = Event::NewListings(NewListingsEvent::new(
            2,
            &listings(3),
            "NASDAQ",
            DetectionSource::Poll,
        ));

        let msg = format_event_message(&event, &config(false)).unwrap();
        assert!(msg.contains("2 new listings"));
        assert!(msg.contains("`NASDAQ`"));
        assert_eq!(msg.matches('•').count(), 2);
    }

    #[test]
    fn scan_messages_follow_config() {
        let event = Event::ScanCompleted(ScanEvent {
            exchange: Some("HKEX".into()),
            new_listings: Some(1),
            message: "Scan triggered successfully for HKEX".into(),
        });

        assert!(format_event_message(&event, &config(false)).is_none());
        let msg = format_event_message(&event, &config(true)).unwrap();
        assert!(msg.contains("Scan Completed"));
        assert!(msg.contains("`1` new"));
    }
}
