use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LabelError, Result};

/// One id per line, surrounding whitespace trimmed, blank lines dropped.
///
/// Blank lines are dropped because an empty id would match every key in
/// [`filter_containing`].
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| LabelError::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Items containing at least one of `needles` as a substring, in input order.
///
/// # Examples
///
/// ```
/// use gdc_labels::filter_containing;
///
/// let keys = ["a/TCGA-BR-4253-01A.svs", "a/TCGA-CG-4300-01A.svs"];
/// assert_eq!(
///     filter_containing(&keys, &["TCGA-CG-4300"]),
///     vec!["a/TCGA-CG-4300-01A.svs".to_string()]
/// );
/// ```
pub fn filter_containing<S, N>(items: &[S], needles: &[N]) -> Vec<String>
where
    S: AsRef<str>,
    N: AsRef<str>,
{
    let mut kept = Vec::new();
    for item in items {
        let item: &str = item.as_ref();
        let hit = needles.iter().any(|needle| {
            let needle: &str = needle.as_ref();
            item.contains(needle)
        });
        if hit {
            kept.push(item.to_owned());
        }
    }
    kept
}

#[derive(Debug, Deserialize)]
struct ImageRow {
    #[serde(rename = "Image")]
    image: String,
}

/// Slide names from the `Image` column of a CSV file.
pub fn read_image_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| LabelError::io(path, e))?;
    read_image_list_from(file)
}

pub fn read_image_list_from<R: io::Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut images = Vec::new();
    for row in rdr.deserialize::<ImageRow>() {
        let image = row?.image.trim().to_string();
        if !image.is_empty() {
            images.push(image);
        }
    }
    Ok(images)
}
