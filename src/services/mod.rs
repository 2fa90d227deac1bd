pub mod activities;
pub mod enrollments;
pub mod maintenance;
pub mod rankings;
pub mod rosters;
pub mod scoring;

pub use activities::ActivityService;
pub use enrollments::EnrollmentService;
pub use maintenance::MaintenanceService;
pub use rankings::RankingService;
pub use scoring::ScoringService;
