use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gdc_transfer::plan;

#[derive(Args, Clone, Debug)]
pub struct PlanArg {
    /// Destination file to inspect
    pub dest: PathBuf,
}

pub async fn run(arg: PlanArg) -> Result<()> {
    let plan = plan(&arg.dest).await?;
    println!("{}: {} from byte {}", arg.dest.display(), plan.mode, plan.offset);
    Ok(())
}
