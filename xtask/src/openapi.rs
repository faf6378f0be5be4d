use anyhow::Context;
use clap::Parser;
use std::{fs, path::PathBuf};
use vocero_server::openapi::openapi;

/// Generate the openapi.yaml file from the endpoint annotations.
#[derive(Debug, Parser)]
pub struct Generate {
    /// Where to write the spec
    #[arg(short, long, default_value = "openapi.yaml")]
    output: PathBuf,
}

impl Generate {
    pub fn run(self) -> anyhow::Result<()> {
        let doc = openapi()
            .to_yaml()
            .context("Failed to convert openapi spec to yaml")?;

        fs::write(&self.output, doc).context("Failed to write openapi spec")?;
        println!("Wrote openapi spec to {:?}", self.output);

        Ok(())
    }
}
