//! Per-invocation application context.

use tanker_core::storage::{JsonFileStore, Role, User};
use tanker_core::{Clock, TankerStore};

use crate::cli::{Cli, SessionArgs};
use crate::config::TankerConfig;
use crate::ui::{UiContext, UiFlags};

use super::resolver::{parse_today, resolve_data_dir};

pub type Store = TankerStore<JsonFileStore>;

/// CLI args bundled with the loaded config, the clock and output settings,
/// so handlers take one parameter.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: TankerConfig,
    clock: Box<dyn Clock>,
    ui: UiContext,
}

impl<'a> AppContext<'a> {
    pub fn with_config(cli: &'a Cli, config: TankerConfig) -> anyhow::Result<Self> {
        let clock = parse_today(cli.today.as_deref())?;
        let ui = UiContext::from_env(
            UiFlags {
                json: cli.json,
                format: cli.format.as_deref(),
                no_color: cli.no_color,
                ascii: cli.ascii,
            },
            config.ui.color,
        );
        Ok(Self {
            cli,
            config,
            clock,
            ui,
        })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Open the JSON store in the resolved data directory.
    pub fn open_store(&self) -> anyhow::Result<Store> {
        let dir = resolve_data_dir(self.cli.data_dir.as_ref(), &self.config)?;
        log::debug!("Using data directory {}", dir.display());
        Ok(TankerStore::new(JsonFileStore::open(dir)?))
    }
}

/// Sign in with optional customer credentials.
pub fn session_user(store: &Store, session: &SessionArgs) -> anyhow::Result<Option<User>> {
    match (session.phone.as_deref(), session.password.as_deref()) {
        (Some(phone), Some(password)) => Ok(Some(store.authenticate(
            Role::Customer,
            &normalize_phone(phone),
            password,
        )?)),
        _ => Ok(None),
    }
}

/// Phone numbers are stored as ten bare digits.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+91 98765-43210"), "919876543210");
        assert_eq!(normalize_phone("98765 43210"), "9876543210");
    }
}
