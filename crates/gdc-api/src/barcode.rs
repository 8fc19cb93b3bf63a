use std::collections::BTreeSet;

/// Length of the case part of a TCGA barcode (`TCGA-BR-4253`).
pub const CASE_CODE_LEN: usize = 12;

/// Case barcode an image name belongs to, or `None` if the name is too short.
///
/// # Examples
///
/// ```
/// use gdc_api::case_code;
///
/// assert_eq!(
///     case_code("TCGA-BR-4253-01A-01-TS1.7f2c.svs"),
///     Some("TCGA-BR-4253")
/// );
/// assert_eq!(case_code("short"), None);
/// ```
pub fn case_code(image_name: &str) -> Option<&str> {
    image_name.get(..CASE_CODE_LEN)
}

/// Distinct case barcodes of a list of image names, sorted.
pub fn unique_case_codes<'a, I>(image_names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    image_names
        .into_iter()
        .filter_map(case_code)
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_case_codes() {
        let images = [
            "TCGA-BR-4253-01A-01-TS1.svs",
            "TCGA-BR-4253-01A-02-BS2.svs",
            "TCGA-CG-4300-01A-01-TS1.svs",
            "tiny",
        ];
        assert_eq!(
            unique_case_codes(images),
            vec!["TCGA-BR-4253".to_string(), "TCGA-CG-4300".to_string()]
        );
    }

    #[test]
    fn test_case_code_multibyte_boundary() {
        assert_eq!(case_code("TCGA-BR-425é-01A"), None);
    }
}
