//! Command handlers, one module per area.

mod account;
mod bank;
mod date;
mod expense;
mod fleet;
mod misc;
mod navigate;
mod orders;

use tanker_core::TankerError;

use crate::app::AppContext;
use crate::cli::Commands;

pub fn dispatch(ctx: &AppContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Mask { command } => date::handle_mask(ctx, command),
        Commands::CheckDate(args) => date::handle_check_date(ctx, args),
        Commands::Register(args) => account::handle_register(ctx, args),
        Commands::Login(args) => account::handle_login(ctx, args),
        Commands::Profile { command } => account::handle_profile(ctx, command),
        Commands::Driver { command } => fleet::handle_driver(ctx, command),
        Commands::Vehicle { command } => fleet::handle_vehicle(ctx, command),
        Commands::Book(args) => orders::handle_book(ctx, args),
        Commands::Orders { command } => orders::handle_orders(ctx, command),
        Commands::Expense { command } => expense::handle_expense(ctx, command),
        Commands::Bank { command } => bank::handle_bank(ctx, command),
        Commands::Navigate(args) => navigate::handle_navigate(ctx, args),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}

/// Form failures become `TankerError::Validation` so the error report can
/// list the fields.
fn validated<T>(result: Result<T, tanker_core::forms::FormErrors>) -> anyhow::Result<T> {
    result.map_err(|errors| TankerError::Validation(errors).into())
}

/// Write an export file into `dir`, creating the directory if needed.
fn write_export(
    dir: &std::path::Path,
    file_name: &str,
    contents: &str,
) -> anyhow::Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir).map_err(TankerError::from)?;
    let path = dir.join(file_name);
    tanker_core::fs::write_atomic(&path, contents.as_bytes()).map_err(TankerError::from)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
