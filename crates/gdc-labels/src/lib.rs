//! Label files for slide classification.
//!
//! Joins three inputs into an `image_path,label` CSV:
//! - an object-storage listing of uploaded slides ([`ObjectListing`]),
//! - the cohort of patient ids to keep ([`read_id_list`]),
//! - a molecular subtype table ([`SubtypeTable`]).

mod error;
mod label;
mod listing;
mod lists;
mod subtype;

pub use error::{LabelError, Result};
pub use label::{
    build_labels, sample_code_matches, write_labels, write_labels_to_path, LabelOptions,
    LabelRecord, DEFAULT_MIN_OBJECT_SIZE,
};
pub use listing::{ObjectEntry, ObjectListing};
pub use lists::{filter_containing, read_id_list, read_image_list, read_image_list_from};
pub use subtype::{BinarySplit, Subtype, SubtypeDivision, SubtypeRecord, SubtypeTable};
