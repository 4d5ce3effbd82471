//! Listing filter from command-line flags.

use crate::adapter::inbound::cli::command::FilterArgs;
use crate::application::state::{reduce, Action, AppState};
use crate::domain::DATE_FORMAT;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Actions that move a fresh state onto the command-line filter.
#[allow(clippy::result_large_err)]
pub(crate) fn filter_actions(filter: &FilterArgs) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    if let Some(code) = &filter.exchange {
        actions.push(Action::SetSelectedExchange(code.trim().to_string()));
    }
    if let Some(days) = filter.days {
        actions.push(Action::SetDays(days));
    }
    if let Some(range) = filter.range()? {
        actions.push(Action::SetDateRange {
            start: range.start(),
            end: range.end(),
        });
    }
    Ok(actions)
}

/// Configured initial state with the command-line filter applied.
#[allow(clippy::result_large_err)]
pub(crate) fn initial_state(config: &Config, filter: &FilterArgs) -> Result<AppState> {
    let state = filter_actions(filter)?
        .into_iter()
        .fold(config.initial_state(), |state, action| reduce(&state, action));
    Ok(state)
}

/// Human description of the active filter, e.g. "last 30 days, All exchanges".
pub(crate) fn describe_filter(state: &AppState) -> String {
    let window = match (state.is_pagination_mode, state.start_date, state.end_date) {
        (true, Some(start), Some(end)) => format!(
            "{} .. {}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        ),
        _ => format!("last {} days", state.days),
    };
    format!("{window}, {}", state.exchange_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        toml::from_str("[filter]\ndays = 14\nexchange = \"HKEX\"").unwrap()
    }

    #[test]
    fn initial_state_without_flags_follows_config() {
        let state = initial_state(&config(), &FilterArgs::default()).unwrap();
        assert_eq!(state.days, 14);
        assert_eq!(state.selected_exchange, "HKEX");
        assert_eq!(describe_filter(&state), "last 14 days, HKEX");
    }

    #[test]
    fn range_flag_enters_pagination_mode() {
        let filter = FilterArgs {
            from: Some("2024-01-01".into()),
            to: Some("2024-01-31".into()),
            exchange: Some(String::new()),
            ..Default::default()
        };

        let state = initial_state(&config(), &filter).unwrap();

        assert!(state.is_pagination_mode);
        assert!(state.filter_mode_consistent());
        assert_eq!(
            describe_filter(&state),
            "2024-01-01 .. 2024-01-31, All exchanges"
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let filter = FilterArgs {
            from: Some("2024-02-01".into()),
            to: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(initial_state(&config(), &filter).is_err());
    }
}
