// src/services/user_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{UserUpsert, UserView},
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

/// Resultado do upsert: o usuário salvo e se ele foi criado agora.
#[derive(Debug, Clone)]
pub struct SavedUser {
    pub user: UserView,
    pub created: bool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<UserView>, AppError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// Cria ou atualiza pelo CPF. A senha nunca é tocada.
    pub async fn upsert(&self, input: &UserUpsert) -> Result<SavedUser, AppError> {
        let mut tx = self.pool.begin().await?;
        let (user, created) = self.user_repo.upsert(&mut *tx, input).await?;
        tx.commit().await?;

        tracing::info!(created, role = input.role.code(), "👤 Usuário salvo");
        Ok(SavedUser {
            user: user.into(),
            created,
        })
    }
}
