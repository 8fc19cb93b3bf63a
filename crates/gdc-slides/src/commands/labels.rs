use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use gdc_labels::{
    DEFAULT_MIN_OBJECT_SIZE, LabelOptions, ObjectListing, Subtype, SubtypeTable, build_labels,
    read_id_list, write_labels_to_path,
};

#[derive(Args, Clone, Debug)]
pub struct LabelsArg {
    /// Object listing as JSON with a `Contents` array of `Key`/`Size`
    #[arg(long)]
    pub listing: PathBuf,

    /// Cohort patient ids, one per line
    #[arg(long)]
    pub ids: PathBuf,

    /// Classification CSV with `PATIENT ID` and `Subtype` columns
    #[arg(long)]
    pub subtypes: PathBuf,

    #[arg(long, default_value = "label_file.csv")]
    pub out: PathBuf,

    /// Objects must be larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MIN_OBJECT_SIZE)]
    pub min_size: u64,

    /// Also emit `pole` rows
    #[arg(long)]
    pub include_pole: bool,
}

impl LabelsArg {
    fn options(&self) -> LabelOptions {
        let mut options = LabelOptions {
            min_object_size: self.min_size,
            ..LabelOptions::default()
        };
        if self.include_pole {
            options.classes.push(Subtype::Pole);
        }
        options
    }
}

pub fn run(arg: LabelsArg) -> Result<()> {
    let listing = ObjectListing::from_path(&arg.listing)
        .with_context(|| format!("failed to read listing {}", arg.listing.display()))?;
    let cohort = read_id_list(&arg.ids)
        .with_context(|| format!("failed to read id list {}", arg.ids.display()))?;
    let table = SubtypeTable::from_path(&arg.subtypes)
        .with_context(|| format!("failed to read subtype table {}", arg.subtypes.display()))?;

    let records = build_labels(&listing, &cohort, &table.division(), &arg.options());
    write_labels_to_path(&arg.out, &records)?;

    println!("{} labels written to {}", records.len(), arg.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_labels_end_to_end() {
        let dir = TempDir::new().unwrap();
        let listing = dir.path().join("listing.json");
        let ids = dir.path().join("ids.txt");
        let subtypes = dir.path().join("stad.csv");
        let out = dir.path().join("label_file.csv");

        fs::write(
            &listing,
            r#"{"Contents": [
                {"Key": "tcga-stad/ds/TCGA-BR-4253-01A-01-TS1.svs", "Size": 2000000},
                {"Key": "tcga-stad/ds/TCGA-VQ-A8P2-01A-01-TS1.svs", "Size": 2000000}
            ]}"#,
        )
        .unwrap();
        fs::write(&ids, "TCGA-BR-4253\nTCGA-VQ-A8P2\n").unwrap();
        fs::write(
            &subtypes,
            "PATIENT ID,Subtype\nTCGA-BR-4253,STAD_EBV\nTCGA-VQ-A8P2,STAD_POLE\n",
        )
        .unwrap();

        let arg = LabelsArg {
            listing,
            ids,
            subtypes,
            out: out.clone(),
            min_size: DEFAULT_MIN_OBJECT_SIZE,
            include_pole: false,
        };
        run(arg.clone()).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "image_path,label\ntcga-stad/ds/TCGA-BR-4253-01A-01-TS1.svs,ebv\n"
        );

        run(LabelsArg {
            include_pole: true,
            ..arg
        })
        .unwrap();
        assert!(fs::read_to_string(&out).unwrap().ends_with("TCGA-VQ-A8P2-01A-01-TS1.svs,pole\n"));
    }
}
