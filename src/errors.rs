//! Módulo unificado de tratamento de erros
//!
//! Usa macro para gerar o tipo de erro, com código estável e nome do tipo.

use std::fmt;

/// Macro de definição dos tipos de erro
///
/// Gera automaticamente:
/// - a definição do enum
/// - método code() - código do erro
/// - método error_type() - nome do tipo de erro
/// - método message() - detalhe do erro
/// - construtores de conveniência em snake_case
macro_rules! define_avalianutri_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AvaliaNutriError {
            $($variant(String),)*
        }

        impl AvaliaNutriError {
            /// Código do erro
            pub fn code(&self) -> &'static str {
                match self {
                    $(AvaliaNutriError::$variant(_) => $code,)*
                }
            }

            /// Nome do tipo de erro
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AvaliaNutriError::$variant(_) => $type_name,)*
                }
            }

            /// Detalhe do erro
            pub fn message(&self) -> &str {
                match self {
                    $(AvaliaNutriError::$variant(msg) => msg,)*
                }
            }
        }

        // Construtores de conveniência
        paste::paste! {
            impl AvaliaNutriError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AvaliaNutriError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_avalianutri_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    InvalidRecord("E006", "Invalid Activity Record"),
    Aggregation("E007", "Score Aggregation Error"),
    Validation("E008", "Validation Error"),
    NotFound("E009", "Resource Not Found"),
    Serialization("E010", "Serialization Error"),
    StoragePluginNotFound("E011", "Storage Plugin Not Found"),
    DateParse("E012", "Date Parse Error"),
}

impl AvaliaNutriError {
    /// Saída colorida (ambiente de desenvolvimento)
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// Saída compacta
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AvaliaNutriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AvaliaNutriError {}

// From para os tipos de erro mais comuns
impl From<sea_orm::DbErr> for AvaliaNutriError {
    fn from(err: sea_orm::DbErr) -> Self {
        AvaliaNutriError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AvaliaNutriError {
    fn from(err: std::io::Error) -> Self {
        AvaliaNutriError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AvaliaNutriError {
    fn from(err: serde_json::Error) -> Self {
        AvaliaNutriError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AvaliaNutriError {
    fn from(err: chrono::ParseError) -> Self {
        AvaliaNutriError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AvaliaNutriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AvaliaNutriError::cache_connection("test").code(), "E001");
        assert_eq!(AvaliaNutriError::invalid_record("test").code(), "E006");
        assert_eq!(AvaliaNutriError::aggregation("test").code(), "E007");
        assert_eq!(AvaliaNutriError::validation("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AvaliaNutriError::invalid_record("test").error_type(),
            "Invalid Activity Record"
        );
        assert_eq!(
            AvaliaNutriError::aggregation("test").error_type(),
            "Score Aggregation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AvaliaNutriError::invalid_record("maxScore ausente");
        assert_eq!(err.message(), "maxScore ausente");
    }

    #[test]
    fn test_format_simple() {
        let err = AvaliaNutriError::validation("Invalid student id");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid student id"));
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AvaliaNutriError = json_err.into();
        assert_eq!(err.code(), "E010");
    }
}
