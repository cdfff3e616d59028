//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, ContentArrangement, Table};

use tanker_core::forms::FormErrors;

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Header line for a command.
///
/// Pretty: `Tanker · orders (June 2025)`. Plain: `tanker orders`.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Tanker", styles::bold(), ctx.color);
            let dot = if ctx.unicode { "\u{00B7}" } else { "-" };
            match context {
                Some(c) => format!("{} {} {} ({})", title, dot, command, c),
                None => format!("{} {} {}", title, dot, command),
            }
        }
        OutputMode::Plain => format!("tanker {}", command),
        OutputMode::Json => String::new(),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        marker
    } else {
        format!("{} {}", marker, message)
    }
}

/// Pretty: `Key: value` with a dim key. Plain: `key=value`.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", label, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary block after a change: a badge and indented fields, or
/// `status=ok` and `key=value` lines.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        lines.extend(items.iter().map(|(k, v)| format!("  {}", kv(ctx, k, v))));
    } else {
        lines.push("status=ok".to_string());
        lines.extend(items.iter().map(|(k, v)| kv(ctx, k, v)));
    }
    lines.join("\n")
}

/// Bordered table in pretty mode; space-separated rows without a header
/// otherwise.
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.iter().map(|h| Cell::new(*h)));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Amount in rupees, without trailing zeros.
pub fn rupees(ctx: &UiContext, amount: f64) -> String {
    let symbol = if ctx.unicode { "\u{20B9}" } else { "Rs " };
    format!("{}{}", symbol, amount)
}

/// Print unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() && !message.is_empty() {
        println!("{}", message);
    }
}

pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Error text with an optional hint and one line per failing form field.
pub fn error_message(
    ctx: &UiContext,
    message: &str,
    fields: Option<&FormErrors>,
    error_hint: Option<&str>,
) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        for field in fields.into_iter().flat_map(FormErrors::iter) {
            let name = styled(field.field, styles::dim(), ctx.color);
            lines.push(format!("  {}: {}", name, field.message));
        }
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        for field in fields.into_iter().flat_map(FormErrors::iter) {
            lines.push(format!("field.{}={}", field.field, field.message));
        }
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

/// Write an error to stderr. JSON mode gets a JSON object.
pub fn print_error(
    ctx: &UiContext,
    message: &str,
    fields: Option<&FormErrors>,
    error_hint: Option<&str>,
) {
    if ctx.mode.is_json() {
        let value = serde_json::json!({
            "error": message,
            "fields": fields,
            "hint": error_hint,
        });
        eprintln!("{}", value);
    } else {
        eprintln!("{}", error_message(ctx, message, fields, error_hint));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&plain_ctx(), "orders", Some("June 2025")), "tanker orders");
        let pretty = header(&pretty_ctx(), "orders", Some("June 2025"));
        assert!(pretty.starts_with("Tanker"));
        assert!(pretty.contains("(June 2025)"));
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain_ctx(), "Booking ID", "BK-1A2B3C4D"), "booking_id=BK-1A2B3C4D");
        assert_eq!(kv(&pretty_ctx(), "Status", "Pending"), "Status: Pending");
    }

    #[test]
    fn test_receipt_plain() {
        let r = receipt(&plain_ctx(), "Order placed", &[("Amount", "600".into())]);
        assert_eq!(r, "status=ok\namount=600");
    }

    #[test]
    fn test_table_plain_has_no_header() {
        let rows = vec![vec!["BK-1".to_string(), "pending".to_string()]];
        assert_eq!(table(&plain_ctx(), &["Booking", "Status"], &rows), "BK-1 pending");
    }

    #[test]
    fn test_table_pretty_has_header() {
        let rows = vec![vec!["BK-1".to_string(), "pending".to_string()]];
        let t = table(&pretty_ctx(), &["Booking", "Status"], &rows);
        assert!(t.contains("Booking"));
        assert!(t.contains("BK-1"));
    }

    #[test]
    fn test_rupees() {
        assert_eq!(rupees(&plain_ctx(), 1200.0), "Rs 1200");
        assert_eq!(rupees(&pretty_ctx(), 92.5), "\u{20B9}92.5");
    }

    #[test]
    fn test_error_message_lists_fields() {
        let mut errors = FormErrors::new();
        errors.push("date", "Date cannot be in the past");
        let plain = error_message(&plain_ctx(), "Validation failed", Some(&errors), Some("fix it"));
        assert_eq!(
            plain,
            "error=Validation failed\nfield.date=Date cannot be in the past\nhint=fix it"
        );
        let pretty = error_message(&pretty_ctx(), "Validation failed", Some(&errors), None);
        assert!(pretty.contains("[\u{2717}] Validation failed"));
        assert!(pretty.contains("  date: Date cannot be in the past"));
    }
}
