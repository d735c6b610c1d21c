use anyhow::{anyhow, Result};
use tracing::debug;

use shared::models::music::QueryFilters;
use shared::models::navigation::Transition;
use shared::screens::Dashboard;
use shared::services::errors::music_service_errors::MusicServiceError;

use crate::app::App;
use crate::render;

fn failure(error: &Option<String>, fallback: &str) -> anyhow::Error {
    anyhow!(error.clone().unwrap_or_else(|| fallback.to_string()))
}

/// Enters the dashboard and prints it. Fails when the dashboard sends the user back to login.
async fn open_dashboard(app: &App) -> Result<Dashboard> {
    let mut dashboard = app.dashboard();
    if let Transition::Redirect(screen) = dashboard.enter().await {
        debug!("Dashboard redirected to {:?}", screen);
        return Err(failure(&dashboard.error, "Please log in first."));
    }
    show(&dashboard);
    Ok(dashboard)
}

fn show(dashboard: &Dashboard) {
    if let Some(user_name) = &dashboard.user_name {
        render::greeting(user_name);
    }
    render::subscriptions(&dashboard.subscriptions.subscriptions);
    if let Some(message) = &dashboard.subscriptions.error {
        render::error(message);
    }
}

pub async fn login(app: &App, email: String, password: String) -> Result<()> {
    let mut screen = app.login_screen();
    screen.email = email;
    screen.password = password;

    let outcome = screen
        .submit()
        .await
        .ok_or_else(|| failure(&screen.error, "Login failed."))?;
    render::notice("Login successful");

    tokio::time::sleep(outcome.redirect_delay).await;
    open_dashboard(app).await?;
    Ok(())
}

pub async fn register(app: &App, email: String, user_name: String, password: String) -> Result<()> {
    let mut screen = app.register_screen();
    screen.email = email;
    screen.user_name = user_name;
    screen.password = password;

    let outcome = screen
        .submit()
        .await
        .ok_or_else(|| failure(&screen.error, "Registration failed."))?;
    render::notice(&outcome.message);
    Ok(())
}

pub async fn profile(app: &App) -> Result<()> {
    open_dashboard(app).await?;
    Ok(())
}

async fn run_query(dashboard: &mut Dashboard, filters: QueryFilters) -> Result<()> {
    dashboard.query.filters = filters;
    dashboard.query.submit().await;
    if let Some(message) = &dashboard.query.error {
        return Err(anyhow!(message.clone()));
    }
    render::results(&dashboard.query.results);
    Ok(())
}

pub async fn query(app: &App, filters: QueryFilters) -> Result<()> {
    let mut dashboard = app.dashboard();
    run_query(&mut dashboard, filters).await
}

/// Runs the query, then subscribes to result number `result` (1-based).
pub async fn subscribe(app: &App, filters: QueryFilters, result: usize) -> Result<()> {
    let mut dashboard = app.dashboard();
    run_query(&mut dashboard, filters).await?;

    let transition = dashboard.subscribe(result.saturating_sub(1)).await;
    if let Some(message) = &dashboard.query.notice {
        render::notice(message);
    }
    if let Some(message) = &dashboard.query.error {
        return Err(anyhow!(message.clone()));
    }
    if transition != Transition::Stay {
        return Err(failure(&dashboard.error, "Please log in again."));
    }
    show(&dashboard);
    Ok(())
}

pub async fn subscriptions(app: &App) -> Result<()> {
    let mut dashboard = app.dashboard();
    dashboard.subscriptions.refresh().await;
    render::subscriptions(&dashboard.subscriptions.subscriptions);
    match &dashboard.subscriptions.error {
        Some(message) if *message == MusicServiceError::NoSubscriptions.to_string() => {
            render::error(message);
            Ok(())
        }
        Some(message) => Err(anyhow!(message.clone())),
        None => Ok(()),
    }
}

pub async fn unsubscribe(app: &App, uuid: String) -> Result<()> {
    let mut dashboard = app.dashboard();
    dashboard.subscriptions.remove(&uuid).await;
    if let Some(message) = &dashboard.subscriptions.error {
        return Err(anyhow!(message.clone()));
    }
    render::notice(&format!("Removed subscription {}", uuid));
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    let mut dashboard = app.dashboard();
    dashboard.logout().await;
    render::notice("Logged out");
    Ok(())
}
