pub mod reconcile;

pub use reconcile::{detect_counter_drift, reconcile_roster};
