pub mod export;
pub mod focus;
pub mod init;
pub mod log;
pub mod migrations;
pub mod plan;
pub mod quest;
pub mod sessions;

use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Run an interactive focus session")]
    Focus(focus::FocusArgs),
    #[command(about = "List focus sessions for a date")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Show the monthly focus activity log")]
    Log(log::LogArgs),
    #[command(about = "Edit the daily plan")]
    Plan(plan::PlanArgs),
    #[command(about = "Manage quarterly quests")]
    Quest(quest::QuestArgs),
    #[command(about = "Export focus sessions")]
    Export(export::ExportArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<(), Box<dyn Error>> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => Ok(init::cmd(args)?),
            Commands::Focus(args) => Ok(focus::cmd(args).await?),
            Commands::Sessions(args) => Ok(sessions::cmd(args).await?),
            Commands::Log(args) => Ok(log::cmd(args).await?),
            Commands::Plan(args) => Ok(plan::cmd(args).await?),
            Commands::Quest(args) => Ok(quest::cmd(args).await?),
            Commands::Export(args) => Ok(export::cmd(args).await?),
            Commands::Migrations(args) => Ok(migrations::cmd(args)?),
        }
    }
}
