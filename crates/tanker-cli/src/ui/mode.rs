//! Output mode routing.

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One JSON document per command
    Json,
    /// `key=value` lines and space-separated rows, stable for scripts
    #[default]
    Plain,
    /// Tables, badges and colors for a terminal
    Pretty,
}

impl OutputMode {
    /// Resolve from flags and the terminal.
    ///
    /// `--json` beats everything, then `--format plain`, then `TERM=dumb`.
    /// Otherwise a TTY gets pretty output and anything else gets plain.
    pub fn resolve(json: bool, format: Option<&str>, is_tty: bool, term_is_dumb: bool) -> Self {
        if json {
            return Self::Json;
        }
        if format.is_some_and(|f| f.eq_ignore_ascii_case("plain")) || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
