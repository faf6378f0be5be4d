#![allow(clippy::unwrap_used)]

use clap::{Parser, Subcommand};

mod openapi;

#[derive(Debug, Parser)]
pub struct Xtask {
    #[command(subcommand)]
    command: Command,
}

impl Xtask {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::GenerateOpenapi(command) => command.run(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    GenerateOpenapi(openapi::Generate),
}

fn main() -> anyhow::Result<()> {
    Xtask::parse().run()
}
