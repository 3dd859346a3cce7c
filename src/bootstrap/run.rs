//! Command execution against a wired [`App`].

use std::io::Write;

use anyhow::Context;
use bc_app::usecases::FeedLoad;
use bc_app::App;
use bc_core::error::{ApiError, ErrorMessages};
use bc_core::ids::OngId;
use bc_core::models::{AdoptionProcess, AnimalSummary, DonationCampaign};
use tracing::{info_span, warn, Instrument};

use crate::cli::Command;

/// Run one command, rendering results to `out`.
///
/// Backend failures are rendered with their user-facing message; only
/// output errors are returned.
pub async fn run_command(app: &App, command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
    let span = info_span!("cli.command", command = ?command);
    let result = execute(app, &command, out).instrument(span).await;
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            warn!(error = %err, "command failed");
            writeln!(out, "{}", ErrorMessages::default().message_for(&err))
                .context("write command output")
        }
        Err(err) => Err(err),
    }
}

async fn execute(
    app: &App,
    command: &Command,
    out: &mut dyn Write,
) -> anyhow::Result<Result<(), ApiError>> {
    match command {
        Command::Feed { pages, .. } => {
            let query = command.feed_query().unwrap_or_default();
            app.feed.reset(query).await;
            for _ in 0..(*pages).max(1) {
                match app.feed.load_more().await {
                    Ok(FeedLoad::Appended(_)) => {}
                    Ok(FeedLoad::Exhausted | FeedLoad::Busy) => break,
                    Err(err) => return Ok(Err(err)),
                }
            }
            let snapshot = app.feed.snapshot().await;
            if snapshot.items.is_empty() {
                writeln!(out, "Nenhum animal encontrado.")?;
            }
            for animal in &snapshot.items {
                writeln!(out, "{}", animal_line(animal))?;
            }
            if snapshot.has_more {
                writeln!(out, "… há mais animais, use --pages para ver mais.")?;
            }
        }
        Command::Donations { all } => {
            let campaigns = if *all {
                app.donations.list().await
            } else {
                app.donations
                    .open_on(chrono::Local::now().date_naive())
                    .await
            };
            let campaigns = match campaigns {
                Ok(campaigns) => campaigns,
                Err(err) => return Ok(Err(err)),
            };
            for campaign in &campaigns {
                writeln!(out, "{}", campaign_line(campaign))?;
            }
        }
        Command::Session => match app.session.restore().await {
            Ok(Some(user)) => writeln!(out, "{} <{}> ({:?})", user.name, user.email, user.kind)?,
            Ok(None) => writeln!(out, "Nenhuma sessão ativa.")?,
            Err(err) => return Ok(Err(err)),
        },
        Command::Ong { id } => {
            let id = OngId::from_str(id);
            let page = match app.profiles.ong_page(&id).await {
                Ok(page) => page,
                Err(err) => return Ok(Err(err)),
            };
            writeln!(
                out,
                "{} ({}/{})",
                page.profile.name, page.profile.address.city, page.profile.address.state
            )?;
            if let Some(description) = &page.profile.description {
                writeln!(out, "{description}")?;
            }
            for animal in &page.animals {
                writeln!(out, "  {}", animal_line(animal))?;
            }
        }
        Command::Adoptions => {
            if let Err(err) = app.session.restore().await {
                return Ok(Err(err));
            }
            let processes = match app.adoptions.list().await {
                Ok(processes) => processes,
                Err(err) => return Ok(Err(err)),
            };
            if processes.is_empty() {
                writeln!(out, "Nenhum processo de adoção.")?;
            }
            for process in &processes {
                writeln!(out, "{}", adoption_line(process))?;
            }
        }
    }
    Ok(Ok(()))
}

fn animal_line(animal: &AnimalSummary) -> String {
    let place = match (&animal.city, &animal.state) {
        (Some(city), Some(state)) => format!(" em {city}/{state}"),
        (Some(city), None) => format!(" em {city}"),
        _ => String::new(),
    };
    format!(
        "[{}] {} ({}, {} anos){} por {}",
        animal.id,
        animal.name,
        animal.species.label(),
        animal.age_years,
        place,
        animal.ong_name
    )
}

fn campaign_line(campaign: &DonationCampaign) -> String {
    format!(
        "{} ({}): {}% de R$ {},{:02}",
        campaign.title,
        campaign.ong_name,
        campaign.progress_percent(),
        campaign.goal_cents / 100,
        campaign.goal_cents % 100
    )
}

fn adoption_line(process: &AdoptionProcess) -> String {
    format!(
        "{} ({}): {}",
        process.animal_name,
        process.ong_name,
        process.stage.label()
    )
}
