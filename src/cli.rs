//! Command line surface of the `bicho-capiba` binary.

use std::path::PathBuf;

use bc_core::models::{AnimalQuery, Size, Species};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bicho-capiba")]
#[command(about = "Cliente de linha de comando do Bicho Capiba", long_about = None)]
pub struct Cli {
    /// Config file; overrides BICHO_CAPIBA_CONFIG and the platform default
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Browse animals available for adoption
    Feed {
        #[arg(long, value_parser = parse_species)]
        species: Option<Species>,
        #[arg(long, value_parser = parse_size)]
        size: Option<Size>,
        #[arg(long)]
        city: Option<String>,
        /// Pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Donation campaigns
    Donations {
        /// Include funded and closed campaigns
        #[arg(long)]
        all: bool,
    },
    /// Show the account of the stored session
    Session,
    /// Shelter profile and its animals
    Ong { id: String },
    /// Adoption processes of the current account
    Adoptions,
}

impl Command {
    pub fn feed_query(&self) -> Option<AnimalQuery> {
        match self {
            Command::Feed {
                species,
                size,
                city,
                ..
            } => Some(AnimalQuery {
                species: *species,
                size: *size,
                city: city.clone(),
            }),
            _ => None,
        }
    }
}

fn parse_species(raw: &str) -> Result<Species, String> {
    Species::parse(raw).ok_or_else(|| format!("espécie inválida: {raw} (use dog ou cat)"))
}

fn parse_size(raw: &str) -> Result<Size, String> {
    Size::parse(raw).ok_or_else(|| format!("porte inválido: {raw} (use small, medium ou large)"))
}
