use std::env;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use mycar::backend::domain::currency::format_clp;
use mycar::backend::domain::summary::monthly_summary;
use mycar::backend::domain::validation::{email_error, password_error, PasswordPolicy};
use mycar::logging::init_logging;
use mycar::{initialize_backend, AppConfig};

const EMAIL_KEY: &str = "MYCAR_EMAIL";
const PASSWORD_KEY: &str = "MYCAR_PASSWORD";

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_filter);
    info!("Starting mycar in {:?} mode", config.mode);

    let email = env::var(EMAIL_KEY).with_context(|| format!("{} is not set", EMAIL_KEY))?;
    let password = env::var(PASSWORD_KEY).with_context(|| format!("{} is not set", PASSWORD_KEY))?;
    if let Some(message) = email_error(&email).or_else(|| password_error(&password, PasswordPolicy::simple())) {
        bail!(message);
    }

    let mut state = initialize_backend(&config).await?;
    if !state.login(&email, &password).await {
        bail!("Could not log in as {}", email.trim());
    }
    println!("Hola, {}", state.session().display_name());

    state.load_alerts().await;
    if !state.load_vehicles().await {
        bail!("Could not load vehicles");
    }

    let mut expenses = Vec::new();
    let mut maintenance = Vec::new();
    let vehicles = state.vehicles().to_vec();
    for vehicle in &vehicles {
        println!(
            "{} {} {} ({}) - {} km",
            vehicle.plate, vehicle.brand, vehicle.model, vehicle.year, vehicle.km
        );

        if state.load_maintenance(vehicle.id).await {
            maintenance.extend_from_slice(state.maintenance());
        } else {
            warn!("Skipping maintenance for {}", vehicle.plate);
        }
        if state.load_expenses(vehicle.id).await {
            expenses.extend_from_slice(state.expenses());
        } else {
            warn!("Skipping expenses for {}", vehicle.plate);
        }
    }

    println!("\nAlertas ({})", state.alerts().len());
    for alert in state.alerts() {
        println!("  [{}] {}: {}", alert.date, alert.title, alert.message);
    }

    let summary = monthly_summary(&expenses, &maintenance, state.clock().today());
    println!(
        "\nResumen {:02}/{}: {} en {} gastos, {} mantenciones",
        summary.month,
        summary.year,
        format_clp(summary.total_spent),
        summary.expense_count,
        summary.maintenance_count
    );

    state.logout();
    Ok(())
}
