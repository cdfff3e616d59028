//! Terminal detection for output decisions.

use std::io::IsTerminal;

use super::mode::OutputMode;
use crate::config::ColorSetting;

#[derive(Debug, Clone)]
pub struct UiContext {
    pub color: bool,
    pub unicode: bool,
    pub mode: OutputMode,
}

/// Output flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags<'a> {
    pub json: bool,
    pub format: Option<&'a str>,
    pub no_color: bool,
    pub ascii: bool,
}

impl UiContext {
    /// Build from flags, the config's color setting and the environment.
    ///
    /// `--no-color`, `NO_COLOR` and `TERM=dumb` always disable color;
    /// `color = "always"` enables it off a TTY.
    pub fn from_env(flags: UiFlags<'_>, color_setting: ColorSetting) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").is_ok_and(|v| v == "dumb");
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        let color = !flags.no_color
            && !no_color_env
            && !term_is_dumb
            && match color_setting {
                ColorSetting::Always => true,
                ColorSetting::Never => false,
                ColorSetting::Auto => is_tty,
            };

        Self {
            color,
            unicode: !flags.ascii,
            mode: OutputMode::resolve(flags.json, flags.format, is_tty, term_is_dumb),
        }
    }
}
