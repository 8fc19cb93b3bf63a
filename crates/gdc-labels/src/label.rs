use std::fs::File;
use std::io;
use std::path::Path;

use tracing::info;

use crate::error::{LabelError, Result};
use crate::listing::ObjectListing;
use crate::lists::filter_containing;
use crate::subtype::{Subtype, SubtypeDivision};

/// Objects at or below this size are not considered slides.
pub const DEFAULT_MIN_OBJECT_SIZE: u64 = 1_000_000;

/// Filters applied while building a label file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOptions {
    /// Objects must be strictly larger than this many bytes.
    pub min_object_size: u64,

    /// Sample type and vial expected in the key, `01A` for the first primary tumour vial.
    pub sample_code: String,

    /// Byte offset of the sample code inside the object key.
    pub sample_code_offset: usize,

    /// Classes emitted, in this order. POLE is too rare to train on and is
    /// left out by default.
    pub classes: Vec<Subtype>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            min_object_size: DEFAULT_MIN_OBJECT_SIZE,
            sample_code: "01A".to_string(),
            sample_code_offset: 26,
            classes: vec![Subtype::Cin, Subtype::Ebv, Subtype::Gs, Subtype::Msi],
        }
    }
}

/// One row of a label file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    pub image_path: String,
    pub label: String,
}

/// Whether `key` carries the configured sample code at the configured offset.
pub fn sample_code_matches(key: &str, options: &LabelOptions) -> bool {
    let start = options.sample_code_offset;
    let end = start + options.sample_code.len();
    key.get(start..end) == Some(options.sample_code.as_str())
}

/// Join a listing, a cohort and a subtype division into label rows.
///
/// Keys are kept if they are large enough, mention a cohort id and carry the
/// sample code; each kept key then gets one row per class whose patient ids
/// it mentions.
pub fn build_labels(
    listing: &ObjectListing,
    cohort: &[String],
    division: &SubtypeDivision,
    options: &LabelOptions,
) -> Vec<LabelRecord> {
    let keys = listing.keys_larger_than(options.min_object_size);
    let in_cohort = filter_containing(&keys, cohort);
    let primary: Vec<String> = in_cohort
        .into_iter()
        .filter(|key| sample_code_matches(key, options))
        .collect();

    info!(
        listed = listing.contents.len(),
        large_enough = keys.len(),
        primary = primary.len(),
        "filtered listing"
    );

    let mut records = Vec::new();
    for &class in &options.classes {
        let matched = filter_containing(&primary, division.get(class));
        info!(class = class.label(), files = matched.len(), "labelled");
        records.extend(matched.into_iter().map(|image_path| LabelRecord {
            image_path,
            label: class.label().to_string(),
        }));
    }
    records
}

/// Write `records` as CSV with an `image_path,label` header.
///
/// The header is written even when there are no records.
pub fn write_labels<W: io::Write>(writer: W, records: &[LabelRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["image_path", "label"])?;
    for record in records {
        wtr.write_record([record.image_path.as_str(), record.label.as_str()])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_labels_to_path(path: &Path, records: &[LabelRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| LabelError::io(path, e))?;
    write_labels(file, records)?;
    info!(path = %path.display(), rows = records.len(), "label file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ObjectEntry;
    use tempfile::TempDir;

    // "tcga-stad/ds/" + "TCGA-XX-XXXX-" puts the sample code at byte 26.
    fn key(case: &str, sample: &str) -> String {
        format!("tcga-stad/ds/{case}-{sample}-01-TS1.svs")
    }

    fn entry(case: &str, sample: &str, size: u64) -> ObjectEntry {
        ObjectEntry {
            key: key(case, sample),
            size,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sample_code_offset() {
        let options = LabelOptions::default();
        assert!(sample_code_matches(&key("TCGA-BR-4253", "01A"), &options));
        assert!(!sample_code_matches(&key("TCGA-BR-4253", "11A"), &options));
        assert!(!sample_code_matches("short.svs", &options));
    }

    #[test]
    fn test_build_labels() {
        let listing = ObjectListing {
            contents: vec![
                entry("TCGA-BR-4253", "01A", 5_000_000),
                entry("TCGA-BR-4253", "11A", 5_000_000),
                entry("TCGA-CG-4300", "01A", 900_000),
                entry("TCGA-CG-4301", "01A", 3_000_000),
                entry("TCGA-HU-A4G2", "01A", 3_000_000),
                entry("TCGA-VQ-A8P2", "01A", 3_000_000),
            ],
        };
        let cohort = strings(&["TCGA-BR-4253", "TCGA-CG-4300", "TCGA-CG-4301", "TCGA-VQ-A8P2"]);
        let division = SubtypeDivision {
            cin: strings(&["TCGA-BR-4253"]),
            msi: strings(&["TCGA-CG-4301", "TCGA-CG-4300"]),
            pole: strings(&["TCGA-VQ-A8P2"]),
            ..SubtypeDivision::default()
        };

        let records = build_labels(&listing, &cohort, &division, &LabelOptions::default());
        assert_eq!(
            records,
            vec![
                LabelRecord {
                    image_path: key("TCGA-BR-4253", "01A"),
                    label: "cin".into(),
                },
                LabelRecord {
                    image_path: key("TCGA-CG-4301", "01A"),
                    label: "msi".into(),
                },
            ]
        );
    }

    #[test]
    fn test_pole_can_be_requested() {
        let listing = ObjectListing {
            contents: vec![entry("TCGA-VQ-A8P2", "01A", 3_000_000)],
        };
        let cohort = strings(&["TCGA-VQ-A8P2"]);
        let division = SubtypeDivision {
            pole: strings(&["TCGA-VQ-A8P2"]),
            ..SubtypeDivision::default()
        };
        let options = LabelOptions {
            classes: Subtype::ALL.to_vec(),
            ..LabelOptions::default()
        };

        let records = build_labels(&listing, &cohort, &division, &options);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "pole");
    }

    #[test]
    fn test_write_labels() {
        let records = vec![
            LabelRecord {
                image_path: "a/x.svs".into(),
                label: "cin".into(),
            },
            LabelRecord {
                image_path: "a/y, z.svs".into(),
                label: "msi".into(),
            },
        ];
        let mut out = Vec::new();
        write_labels(&mut out, &records).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "image_path,label\na/x.svs,cin\n\"a/y, z.svs\",msi\n"
        );
    }

    #[test]
    fn test_write_empty_labels_keeps_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("label_file.csv");
        write_labels_to_path(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "image_path,label\n");
    }
}
