//! Application configuration initialization command.
//!
//! Interactive wizard covering focus phase lengths and the autosave
//! debounce. Safe to re-run; existing values become the prompt defaults.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Reset to default configuration without prompting
    #[arg(short, long)]
    defaults: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.defaults {
        Config::default().save()?;
        msg_success!(Message::ConfigSaved);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
