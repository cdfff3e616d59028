use serde_json::json;

use tanker_core::{Navigation, Screen};

use crate::app::AppContext;
use crate::cli::NavigateArgs;
use crate::ui::{header, print, print_json, table};

/// Apply each event in turn, recording the screen after every step.
pub fn handle_navigate(ctx: &AppContext, args: &NavigateArgs) -> anyhow::Result<()> {
    let start: Screen = args.from.parse()?;
    let events = args
        .events
        .iter()
        .map(|raw| raw.parse::<Navigation>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut steps = Vec::with_capacity(events.len());
    let mut current = start;
    for event in events {
        let next = current.navigate(event);
        if next == current {
            log::debug!("{} has no {} action", current, event);
        }
        steps.push((event, next));
        current = next;
    }

    let ui = ctx.ui();
    if ui.mode.is_json() {
        let path: Vec<_> = steps
            .iter()
            .map(|(event, screen)| json!({ "event": event.to_string(), "screen": screen }))
            .collect();
        return print_json(&json!({
            "start": start,
            "steps": path,
            "screen": current,
            "title": current.title(),
        }));
    }

    print(ui, &header(ui, "navigate", Some(start.title())));
    if ui.mode.is_pretty() {
        let rows: Vec<Vec<String>> = steps
            .iter()
            .map(|(event, screen)| vec![event.to_string(), screen.title().to_string()])
            .collect();
        if !rows.is_empty() {
            print(ui, &table(ui, &["Event", "Screen"], &rows));
        }
        print(ui, &format!("Now on: {}", current.title()));
    } else {
        for (event, screen) in &steps {
            println!("{} {}", event, screen);
        }
        println!("screen={}", current);
    }
    Ok(())
}
