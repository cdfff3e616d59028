use serde_json::json;

use tanker_core::date_input::format_digits_as_date;
use tanker_core::forms::{DriverForm, VehicleForm};

use crate::app::AppContext;
use crate::cli::{DriverAddArgs, DriverCommand, VehicleAddArgs, VehicleCommand};
use crate::output::{driver_row, vehicle_row, DRIVER_HEADERS, VEHICLE_HEADERS};
use crate::ui::{header, hint, print, print_json, receipt, table};

use super::validated;

pub fn handle_driver(ctx: &AppContext, command: &DriverCommand) -> anyhow::Result<()> {
    match command {
        DriverCommand::Add(args) => add_driver(ctx, args),
        DriverCommand::List => list_drivers(ctx),
        DriverCommand::Remove { id } => {
            let mut store = ctx.open_store()?;
            let driver = store.remove_driver(id)?;
            log::info!("Removed driver {}", driver.id);
            let ui = ctx.ui();
            if ui.mode.is_json() {
                return print_json(&json!({ "removed": driver }));
            }
            if !ctx.quiet() {
                print(ui, &receipt(ui, "Driver removed", &[("Name", driver.name)]));
            }
            Ok(())
        }
    }
}

fn add_driver(ctx: &AppContext, args: &DriverAddArgs) -> anyhow::Result<()> {
    let form = DriverForm {
        name: args.name.clone(),
        phone_number: args.phone.clone(),
        license_number: args.license_number.clone(),
        license_expiry_date: format_digits_as_date(&args.license_expiry),
        address: args.address.clone(),
        emergency_contact_name: args.emergency_name.clone(),
        emergency_contact_phone: args.emergency_phone.clone(),
        joining_date: format_digits_as_date(&args.joining_date),
        monthly_salary: args.salary.clone(),
    };
    let new_driver = validated(form.validate(ctx.clock()))?;

    let mut store = ctx.open_store()?;
    let driver = store.add_driver(new_driver, ctx.clock())?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::to_value(&driver)?);
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Driver added",
                &[
                    ("ID", driver.id.to_string()),
                    ("Name", driver.name.clone()),
                    ("License Expires", driver.license_expiry_date.to_mask()),
                ],
            ),
        );
    }
    Ok(())
}

fn list_drivers(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let drivers = store.drivers()?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::to_value(&drivers)?);
    }
    print(ui, &header(ui, "drivers", Some(&format!("{} total", drivers.len()))));
    if drivers.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No drivers yet. Add one with `tanker driver add`."));
        }
        return Ok(());
    }
    let rows: Vec<Vec<String>> = drivers.iter().map(driver_row).collect();
    print(ui, &table(ui, &DRIVER_HEADERS, &rows));
    Ok(())
}

pub fn handle_vehicle(ctx: &AppContext, command: &VehicleCommand) -> anyhow::Result<()> {
    match command {
        VehicleCommand::Add(args) => add_vehicle(ctx, args),
        VehicleCommand::List => list_vehicles(ctx),
        VehicleCommand::Remove { number } => {
            let mut store = ctx.open_store()?;
            let vehicle = store.remove_vehicle(number)?;
            log::info!("Removed vehicle {}", vehicle.vehicle_number);
            let ui = ctx.ui();
            if ui.mode.is_json() {
                return print_json(&json!({ "removed": vehicle }));
            }
            if !ctx.quiet() {
                print(
                    ui,
                    &receipt(ui, "Vehicle removed", &[("Number", vehicle.vehicle_number)]),
                );
            }
            Ok(())
        }
    }
}

fn add_vehicle(ctx: &AppContext, args: &VehicleAddArgs) -> anyhow::Result<()> {
    let form = VehicleForm {
        vehicle_number: args.number.clone(),
        capacity: args.capacity.clone(),
        last_service_date: format_digits_as_date(&args.last_service),
        next_service_date: format_digits_as_date(&args.next_service),
        insurance_expiry_date: format_digits_as_date(&args.insurance_expiry),
    };
    let new_vehicle = validated(form.validate(ctx.clock()))?;

    let mut store = ctx.open_store()?;
    let vehicle = store.add_vehicle(new_vehicle, ctx.clock())?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::to_value(&vehicle)?);
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Vehicle added",
                &[
                    ("Number", vehicle.vehicle_number.clone()),
                    ("Capacity", format!("{} L", vehicle.capacity_liters)),
                    ("Next Service", vehicle.next_service_date.to_mask()),
                ],
            ),
        );
    }
    Ok(())
}

fn list_vehicles(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let vehicles = store.vehicles()?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::to_value(&vehicles)?);
    }
    print(ui, &header(ui, "fleet", Some(&format!("{} vehicles", vehicles.len()))));
    if vehicles.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No vehicles yet. Add one with `tanker vehicle add`."));
        }
        return Ok(());
    }
    let rows: Vec<Vec<String>> = vehicles.iter().map(vehicle_row).collect();
    print(ui, &table(ui, &VEHICLE_HEADERS, &rows));
    Ok(())
}
