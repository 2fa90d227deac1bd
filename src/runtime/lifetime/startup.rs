use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::scores::entities::CourseModule;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

// O fallback em memória segura o servidor de pé quando o Redis configurado
// não sobe; o custo é perder o cache compartilhado entre instâncias.
async fn create_fallback_cache() -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin("moka")?;
    match constructor().await {
        Ok(cache) => {
            warn!("Using moka (in-memory) cache as fallback");
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Fallback moka cache also failed: {}", e);
            None
        }
    }
}

/// Cria a instância de cache conforme a configuração
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    match get_object_cache_plugin(cache_type) {
        Some(constructor) => match constructor().await {
            Ok(cache) => {
                warn!("Cache backend '{}' initialized", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Cache backend '{}' failed: {}", cache_type, e);
                if cache_type == "redis" {
                    if let Some(cache) = create_fallback_cache().await {
                        return Ok(cache);
                    }
                }
            }
        },
        None => {
            warn!("Cache backend '{}' not registered", cache_type);
            if cache_type != "moka" {
                if let Some(cache) = create_fallback_cache().await {
                    return Ok(cache);
                }
            }
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// Semeia a tabela course_modules a partir da configuração
///
/// Os módulos do curso mudam com releases, não em runtime; a configuração
/// é a fonte e o banco é a cópia consultada pelo agregador.
async fn seed_course_modules(storage: &Arc<dyn Storage>) {
    let config = AppConfig::get();

    if config.scoring.modules.is_empty() {
        debug!("No course modules configured, aggregator will use attempted modules");
        return;
    }

    for entry in &config.scoring.modules {
        let module = CourseModule {
            module_id: entry.id.clone(),
            title: entry.title.clone(),
            max_score: config.scoring.module_max_score,
            passing_threshold: entry.passing_threshold,
        };
        match storage.upsert_course_module(&module).await {
            Ok(_) => debug!("Course module seeded: {}", entry.id),
            Err(e) => warn!("Failed to seed course module {}: {}", entry.id, e),
        }
    }

    info!(
        "Course module catalog synchronized ({} modules)",
        config.scoring.modules.len()
    );
}

/// Prepara o contexto de inicialização do servidor
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // sincroniza o catálogo de módulos do curso
    seed_course_modules(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
