mod tracker;

pub use tracker::{ProgressTracker, ProgressTrackerConfig, Tracker};
