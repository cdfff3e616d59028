use serde_json::json;

use tanker_core::forms::{LoginForm, ProfileForm, RegistrationForm};
use tanker_core::storage::{OrderStatus, Role, User};
use tanker_core::{Screen, TankerError};

use crate::app::{normalize_phone, AppContext, Store};
use crate::cli::{LoginArgs, ProfileCommand, RegisterArgs};
use crate::output::user_json;
use crate::ui::{header, kv, print, print_json, receipt};

use super::validated;

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    if args.role == Role::Driver {
        return Err(TankerError::InvalidInput(
            "Driver accounts are added by an admin with `tanker driver add`".to_string(),
        )
        .into());
    }

    let form = RegistrationForm {
        role: args.role,
        full_name: args.name.clone(),
        phone_number: args.phone.clone(),
        password: args.password.clone(),
        confirm_password: args
            .confirm_password
            .clone()
            .unwrap_or_else(|| args.password.clone()),
        address: args.address.clone(),
    };
    let new_user = validated(form.validate())?;

    let mut store = ctx.open_store()?;
    let user = store.register(new_user, ctx.clock())?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&user_json(&user));
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Account created",
                &[
                    ("Name", user.name.clone()),
                    ("Role", user.role.to_string()),
                    ("Next", Screen::login(user.role).to_string()),
                ],
            ),
        );
    }
    Ok(())
}

fn sign_in(store: &Store, args: &LoginArgs) -> anyhow::Result<User> {
    let form = LoginForm {
        phone_number: args.phone.clone(),
        password: args.password.clone(),
    };
    let phone_number = validated(form.validate())?;
    Ok(store.authenticate(args.role, &phone_number, &args.password)?)
}

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let user = sign_in(&store, args)?;
    let next = Screen::dashboard(user.role);
    log::info!("{} signed in as {}", user.id, user.role);

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&json!({
            "user": user_json(&user),
            "screen": next,
        }));
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                &format!("Welcome, {}", user.name),
                &[("Role", user.role.to_string()), ("Screen", next.to_string())],
            ),
        );
    }
    Ok(())
}

pub fn handle_profile(ctx: &AppContext, command: &ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Show(login) => show_profile(ctx, login),
        ProfileCommand::Update {
            login,
            name,
            new_phone,
            address,
        } => update_profile(ctx, login, name.as_deref(), new_phone.as_deref(), address.as_deref()),
    }
}

fn show_profile(ctx: &AppContext, login: &LoginArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let user = sign_in(&store, login)?;
    let orders = store.orders_for_user(user.id)?;
    let delivered = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Delivered)
        .count();

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&json!({
            "user": user_json(&user),
            "totalOrders": orders.len(),
            "deliveredOrders": delivered,
        }));
    }

    print(ui, &header(ui, "profile", Some(&user.name)));
    let lines = [
        kv(ui, "Name", &user.name),
        kv(ui, "Phone", &user.phone_number),
        kv(ui, "Role", user.role.as_str()),
        kv(ui, "Address", user.address.as_deref().unwrap_or("-")),
        kv(ui, "Total Orders", &orders.len().to_string()),
        kv(ui, "Delivered", &delivered.to_string()),
    ];
    for line in lines {
        print(ui, &line);
    }
    Ok(())
}

fn update_profile(
    ctx: &AppContext,
    login: &LoginArgs,
    name: Option<&str>,
    new_phone: Option<&str>,
    address: Option<&str>,
) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let user = sign_in(&store, login)?;

    let form = ProfileForm {
        full_name: name.unwrap_or(&user.name).to_string(),
        phone_number: new_phone
            .map(normalize_phone)
            .unwrap_or_else(|| user.phone_number.clone()),
        address: address
            .or(user.address.as_deref())
            .unwrap_or_default()
            .to_string(),
    };
    let update = validated(form.validate())?;
    let updated = store.update_profile(user.id, update)?;
    log::info!("Updated profile {}", updated.id);

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&user_json(&updated));
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Profile updated",
                &[
                    ("Name", updated.name.clone()),
                    ("Phone", updated.phone_number.clone()),
                    ("Address", updated.address.clone().unwrap_or_default()),
                ],
            ),
        );
    }
    Ok(())
}
