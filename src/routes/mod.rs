pub mod activities;

pub mod scores;

pub mod enrollments;

pub mod rankings;

pub mod maintenance;

pub use activities::configure_activities_routes;
pub use enrollments::configure_enrollments_routes;
pub use maintenance::configure_maintenance_routes;
pub use rankings::configure_rankings_routes;
pub use scores::configure_scores_routes;
