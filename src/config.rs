// src/config.rs

use crate::{
    db::{DashboardRepository, MedicationRepository, RequestRepository, UserRepository},
    services::{DashboardService, MedicationService, RequestService, UserService},
};
use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::{env, str::FromStr, time::Duration};

// Configuração explícita do processo. Lida uma única vez na inicialização
// e repassada para quem precisa; não existe valor padrão global mutável.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl Config {
    /// Lê a configuração do ambiente (e do `.env`, se existir).
    /// Falha na hora se `DATABASE_URL` não estiver definida.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .context("DATABASE_URL deve ser definida")?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;
        let acquire_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3u64)?;
        let statement_ms = parse_or(&lookup, "DB_STATEMENT_TIMEOUT_MS", 5_000u64)?;

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
            statement_timeout: Duration::from_millis(statement_ms),
        })
    }

    /// Opções de conexão com `statement_timeout` aplicado em toda sessão.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let options = PgConnectOptions::from_str(&self.database_url)
            .context("DATABASE_URL inválida")?
            .options([(
                "statement_timeout",
                self.statement_timeout.as_millis().to_string(),
            )]);
        Ok(options)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} inválida: '{raw}'")),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub medication_service: MedicationService,
    pub request_service: RequestService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options()?)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool) -> Self {
        let medication_repo = MedicationRepository::new(db_pool.clone());
        let request_repo = RequestRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        Self {
            medication_service: MedicationService::new(
                medication_repo,
                request_repo.clone(),
                db_pool.clone(),
            ),
            request_service: RequestService::new(request_repo, db_pool.clone()),
            user_service: UserService::new(user_repo, db_pool.clone()),
            dashboard_service: DashboardService::new(dashboard_repo),
            db_pool,
        }
    }
}
