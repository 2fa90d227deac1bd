//! AvaliaNutri Core - núcleo de pontuação e ranking
//!
//! Backend de pontuação unificada da plataforma de educação nutricional,
//! construído sobre Actix Web.
//!
//! # Arquitetura
//! - `cache`: camada de cache (Moka/Redis)
//! - `config`: gestão de configuração
//! - `entity`: entidades SeaORM do banco
//! - `errors`: tratamento unificado de erros
//! - `models`: modelos de dados
//! - `routes`: camada de rotas da API
//! - `runtime`: ciclo de vida do processo
//! - `services`: lógica de negócio (normalização, redução, agregação,
//!   reconciliação e ranking)
//! - `storage`: camada de persistência (SeaORM)
//! - `utils`: funções utilitárias

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
