pub mod analysis_helpers;
pub mod dashboard_helpers;
