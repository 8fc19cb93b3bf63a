use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use gdc_labels::{Subtype, SubtypeTable};

#[derive(Args, Clone, Debug)]
pub struct SubtypesArg {
    /// Classification CSV with `PATIENT ID` and `Subtype` columns
    #[arg(long)]
    pub table: PathBuf,

    /// Split one subtype against all the others
    #[arg(long)]
    pub binary: Option<Subtype>,
}

pub fn run(arg: SubtypesArg) -> Result<()> {
    let table = SubtypeTable::from_path(&arg.table)
        .with_context(|| format!("failed to read subtype table {}", arg.table.display()))?;

    match arg.binary {
        Some(target) => {
            let split = table.binary(target);
            println!("{target}: {}", split.target.len());
            println!("others: {}", split.others.len());
        }
        None => {
            let division = table.division();
            for subtype in Subtype::ALL {
                println!("{subtype}: {}", division.get(subtype).len());
            }
        }
    }
    Ok(())
}
