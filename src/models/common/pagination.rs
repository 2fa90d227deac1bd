use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Parâmetros de paginação
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// Informações de paginação na resposta
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// Lista paginada
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// Aceita tanto inteiro quanto string com inteiro na query
// (query strings chegam sempre como string; JSON chega como número)
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Str(raw) => raw
            .parse()
            .map_err(|_| Error::custom(format!("invalid integer: {raw}"))),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Wrapper {
        #[serde(flatten)]
        pagination: PaginationQuery,
    }

    #[test]
    fn test_pagination_accepts_string_values() {
        let w: Wrapper = serde_json::from_str(r#"{"page": "3", "size": "25"}"#).unwrap();
        assert_eq!(w.pagination.page, 3);
        assert_eq!(w.pagination.size, 25);
    }

    #[test]
    fn test_pagination_defaults() {
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(w.pagination.page, 1);
        assert_eq!(w.pagination.size, 10);
    }
}
