// src/db/user_repo.rs

use sqlx::{Executor, FromRow, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::user::{User, UserUpsert},
};

// A coluna password_hash nunca aparece aqui: nem lida, nem escrita no upsert.
const USER_COLUMNS: &str = "trim(cpf) AS cpf, name, email, role, active";

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY name ASC");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    // UPSERT (Insert or Update). Novo usuário entra ativo e sem senha;
    // existente só troca nome, e-mail e papel.
    // Devolve também se a linha nasceu neste comando (xmax = 0 só no INSERT).
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        input: &UserUpsert,
    ) -> Result<(User, bool), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO users (cpf, name, email, role, active, password_hash)
            VALUES ($1, $2, $3, $4, TRUE, NULL)
            ON CONFLICT (cpf)
            DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                role = EXCLUDED.role
            RETURNING {USER_COLUMNS}, (xmax = 0) AS inserted
            "#
        );
        let row = sqlx::query_as::<_, UpsertedUser>(&sql)
            .bind(&input.cpf)
            .bind(&input.name)
            .bind(input.email.as_deref())
            .bind(input.role.code())
            .fetch_one(executor)
            .await?;
        Ok((row.user, row.inserted))
    }
}

#[derive(FromRow)]
struct UpsertedUser {
    #[sqlx(flatten)]
    user: User,
    inserted: bool,
}
