//! Badges, colors and status styling.

use owo_colors::{OwoColorize, Style};

use tanker_core::storage::OrderStatus;

/// Status marker printed before a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[!]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, true) => "[i]",
            (Self::Info, false) => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Warn => styles::warning(),
            Self::Err => styles::error(),
            Self::Info => styles::info(),
        }
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn success() -> Style {
        Style::new().green()
    }

    pub fn warning() -> Style {
        Style::new().yellow()
    }

    pub fn error() -> Style {
        Style::new().red()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }

    pub fn accent() -> Style {
        Style::new().blue().bold()
    }
}

/// Apply `style` when color is on.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Color of an order status, matching the status chips in the app.
pub fn status_style(status: OrderStatus) -> Style {
    match status {
        OrderStatus::Delivered => styles::success(),
        OrderStatus::Cancelled => styles::error(),
        OrderStatus::Pending => styles::warning(),
        OrderStatus::Confirmed => styles::accent(),
        OrderStatus::InTransit => styles::info(),
    }
}
