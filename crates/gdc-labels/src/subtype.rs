use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::{LabelError, Result};

/// Molecular subtypes of stomach adenocarcinoma (TCGA STAD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtype {
    /// Chromosomal instability.
    Cin,
    /// Epstein-Barr virus positive.
    Ebv,
    /// Genomically stable.
    Gs,
    /// Microsatellite instability.
    Msi,
    /// Polymerase epsilon mutated.
    Pole,
}

impl Subtype {
    pub const ALL: [Subtype; 5] = [
        Subtype::Cin,
        Subtype::Ebv,
        Subtype::Gs,
        Subtype::Msi,
        Subtype::Pole,
    ];

    /// Value used in the `Subtype` column of the classification table.
    pub fn code(self) -> &'static str {
        match self {
            Subtype::Cin => "STAD_CIN",
            Subtype::Ebv => "STAD_EBV",
            Subtype::Gs => "STAD_GS",
            Subtype::Msi => "STAD_MSI",
            Subtype::Pole => "STAD_POLE",
        }
    }

    /// Value written to the `label` column of a label file.
    pub fn label(self) -> &'static str {
        match self {
            Subtype::Cin => "cin",
            Subtype::Ebv => "ebv",
            Subtype::Gs => "gs",
            Subtype::Msi => "msi",
            Subtype::Pole => "pole",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Subtype {
    type Err = LabelError;

    /// Accepts `STAD_CIN`, `CIN` and `cin` alike.
    fn from_str(s: &str) -> Result<Self> {
        let bare = s.trim();
        let bare = bare.strip_prefix("STAD_").unwrap_or(bare);
        Subtype::ALL
            .into_iter()
            .find(|subtype| subtype.label().eq_ignore_ascii_case(bare))
            .ok_or_else(|| LabelError::UnknownSubtype(s.to_string()))
    }
}

/// A patient with a defined subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeRecord {
    pub patient_id: String,
    /// Raw table value, e.g. `STAD_CIN`.
    pub subtype: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "PATIENT ID")]
    patient_id: String,
    #[serde(rename = "Subtype")]
    subtype: Option<String>,
}

fn is_missing(value: &str) -> bool {
    matches!(value, "" | "NA" | "NaN" | "nan")
}

/// Patient ids per subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtypeDivision {
    pub cin: Vec<String>,
    pub ebv: Vec<String>,
    pub gs: Vec<String>,
    pub msi: Vec<String>,
    pub pole: Vec<String>,
}

impl SubtypeDivision {
    pub fn get(&self, subtype: Subtype) -> &[String] {
        match subtype {
            Subtype::Cin => &self.cin,
            Subtype::Ebv => &self.ebv,
            Subtype::Gs => &self.gs,
            Subtype::Msi => &self.msi,
            Subtype::Pole => &self.pole,
        }
    }

    fn get_mut(&mut self, subtype: Subtype) -> &mut Vec<String> {
        match subtype {
            Subtype::Cin => &mut self.cin,
            Subtype::Ebv => &mut self.ebv,
            Subtype::Gs => &mut self.gs,
            Subtype::Msi => &mut self.msi,
            Subtype::Pole => &mut self.pole,
        }
    }
}

/// One subtype against all the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinarySplit {
    pub target: Vec<String>,
    pub others: Vec<String>,
}

/// Classification table with `PATIENT ID` and `Subtype` columns.
///
/// Other columns are ignored. Rows whose subtype is missing are dropped on
/// load; rows with a subtype outside [`Subtype`] are kept and only ever land
/// in [`BinarySplit::others`].
#[derive(Debug, Clone, Default)]
pub struct SubtypeTable {
    records: Vec<SubtypeRecord>,
}

impl SubtypeTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| LabelError::io(path, e))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for row in rdr.deserialize::<Row>() {
            let row = row?;
            let Some(subtype) = row.subtype.map(|s| s.trim().to_string()) else {
                continue;
            };
            if is_missing(&subtype) {
                continue;
            }
            records.push(SubtypeRecord {
                patient_id: row.patient_id.trim().to_string(),
                subtype,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SubtypeRecord] {
        &self.records
    }

    /// Patient ids for every subtype, in table order.
    pub fn division(&self) -> SubtypeDivision {
        let mut division = SubtypeDivision::default();
        for record in &self.records {
            if let Some(subtype) = Subtype::ALL
                .into_iter()
                .find(|s| s.code() == record.subtype)
            {
                division.get_mut(subtype).push(record.patient_id.clone());
            }
        }

        for subtype in Subtype::ALL {
            info!(%subtype, cases = division.get(subtype).len(), "subtype cases");
        }
        division
    }

    /// Patients of `target` versus every other patient with a defined subtype.
    pub fn binary(&self, target: Subtype) -> BinarySplit {
        let (target_records, other_records): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .partition(|record| record.subtype == target.code());

        let split = BinarySplit {
            target: target_records.into_iter().map(|r| r.patient_id.clone()).collect(),
            others: other_records.into_iter().map(|r| r.patient_id.clone()).collect(),
        };
        info!(
            %target,
            target_cases = split.target.len(),
            other_cases = split.others.len(),
            "binary split"
        );
        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
PATIENT ID,Subtype,Cancer Type
TCGA-BR-4253,STAD_CIN,STAD
TCGA-CG-4301,STAD_MSI,STAD
TCGA-HU-A4G2,,STAD
TCGA-VQ-A8P2,STAD_POLE,STAD
TCGA-BR-8058,NA,STAD
TCGA-D7-5577,STAD_EBV,STAD
TCGA-BR-6455,STAD_GS,STAD
TCGA-BR-7703,STAD_CIN,STAD
";

    #[test]
    fn test_missing_subtypes_are_dropped() {
        let table = SubtypeTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.records().len(), 6);
        assert!(table.records().iter().all(|r| r.patient_id != "TCGA-HU-A4G2"));
        assert!(table.records().iter().all(|r| r.patient_id != "TCGA-BR-8058"));
    }

    #[test]
    fn test_division() {
        let division = SubtypeTable::from_reader(TABLE.as_bytes()).unwrap().division();
        assert_eq!(division.cin, vec!["TCGA-BR-4253", "TCGA-BR-7703"]);
        assert_eq!(division.ebv, vec!["TCGA-D7-5577"]);
        assert_eq!(division.gs, vec!["TCGA-BR-6455"]);
        assert_eq!(division.msi, vec!["TCGA-CG-4301"]);
        assert_eq!(division.pole, vec!["TCGA-VQ-A8P2"]);
    }

    #[test]
    fn test_binary_split() {
        let split = SubtypeTable::from_reader(TABLE.as_bytes())
            .unwrap()
            .binary(Subtype::Msi);
        assert_eq!(split.target, vec!["TCGA-CG-4301"]);
        assert_eq!(split.others.len(), 5);
        assert!(!split.others.contains(&"TCGA-CG-4301".to_string()));
    }

    #[test]
    fn test_parse_subtype() {
        assert_eq!("STAD_GS".parse::<Subtype>().unwrap(), Subtype::Gs);
        assert_eq!("msi".parse::<Subtype>().unwrap(), Subtype::Msi);
        assert_eq!("POLE".parse::<Subtype>().unwrap(), Subtype::Pole);
        assert!(matches!(
            "STAD_XYZ".parse::<Subtype>(),
            Err(LabelError::UnknownSubtype(_))
        ));
    }

    #[test]
    fn test_table_without_patient_column() {
        let csv = "ID,Subtype\nTCGA-BR-4253,STAD_CIN\n";
        assert!(matches!(
            SubtypeTable::from_reader(csv.as_bytes()),
            Err(LabelError::Csv(_))
        ));
    }
}
