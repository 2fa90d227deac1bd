use serde::Deserialize;
use ts_rs::TS;

use super::entities::RankingSort;
use crate::models::common::pagination::PaginationQuery;

// Consulta de ranking (HTTP)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    // ausente = ranking global
    pub class_id: Option<String>,
    pub sort: Option<RankingSort>,
}
