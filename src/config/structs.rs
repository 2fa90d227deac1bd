use serde::{Deserialize, Serialize};

/// Estrutura de configuração da aplicação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub scoring: ScoringConfig,
    pub maintenance: MaintenanceConfig,
}

/// Configurações gerais
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// Configuração do servidor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// Timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// Limites de requisição
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// Configuração do banco de dados
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // URL de conexão (tipo inferido pelo scheme)
    pub pool_size: u32, // tamanho do pool
    pub timeout: u64,   // timeout de conexão (s)
}

/// Configuração de cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

/// Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

/// Cache em memória
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Configuração de pontuação
///
/// `passing_threshold` e `module_max_score` são os padrões globais; cada
/// módulo do curso pode sobrescrever o threshold na própria entrada.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub passing_threshold: f64, // nota mínima para módulo concluído (0-100)
    pub module_max_score: f64,  // pontuação máxima normalizada por módulo
    #[serde(default)]
    pub modules: Vec<CourseModuleConfig>,
}

/// Entrada de módulo do curso (semeada em course_modules na inicialização)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModuleConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub passing_threshold: Option<f64>,
}

/// Configuração dos jobs de reconciliação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    pub max_retries: u32,     // tentativas por entidade
    pub backoff_base_ms: u64, // base do backoff exponencial
}
