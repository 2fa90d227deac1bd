use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::RankingEntry;
use crate::models::PaginationInfo;

// Leaderboard paginado
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingListResponse {
    pub scope: String,
    pub items: Vec<RankingEntry>,
    pub pagination: PaginationInfo,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    // true quando servido do cache após falha do storage
    pub stale: bool,
}
