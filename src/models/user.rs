// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::serde_utils::trimmed;

// Papéis guardados como código de uma letra
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Citizen,
    Analyst,
    Manager,
    Employee,
}

impl UserRole {
    /// Código desconhecido cai em Cidadão, como nas telas de gestão.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" => UserRole::Analyst,
            "G" => UserRole::Manager,
            "F" => UserRole::Employee,
            _ => UserRole::Citizen,
        }
    }

    // Estrito: só para entrada de dados
    pub fn parse_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "C" => Some(UserRole::Citizen),
            "A" => Some(UserRole::Analyst),
            "G" => Some(UserRole::Manager),
            "F" => Some(UserRole::Employee),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            UserRole::Citizen => "C",
            UserRole::Analyst => "A",
            UserRole::Manager => "G",
            UserRole::Employee => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserRole::Citizen => "Cidadão",
            UserRole::Analyst => "Analista",
            UserRole::Manager => "Gestor",
            UserRole::Employee => "Funcionário",
        }
    }
}

// Linha de 'users' sem a credencial (ela nunca é selecionada)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub cpf: String,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub active: bool,
}

// Projeção da listagem de usuários
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    #[schema(example = "12345678901")]
    pub cpf: String,
    pub nome: String,
    pub email: Option<String>,
    /// Código bruto (C, A, G, F...)
    #[schema(example = "A")]
    pub papel: String,
    #[schema(example = "Analista")]
    pub papel_nome: String,
    pub ativo: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        let label = UserRole::from_code(&user.role).label();
        Self {
            cpf: user.cpf.trim().to_string(),
            nome: user.name,
            email: user.email,
            papel: user.role.trim().to_string(),
            papel_nome: label.to_string(),
            ativo: user.active,
        }
    }
}

fn invalid_role() -> ValidationErrors {
    let mut err = ValidationError::new("papel");
    err.message = Some("O papel deve ser C, A, G ou F.".into());

    let mut errors = ValidationErrors::new();
    errors.add("papel", err);
    errors
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertUserPayload {
    #[serde(alias = "codUsuarioCPF")]
    #[validate(
        required(message = "O CPF é obrigatório."),
        length(min = 1, max = 11, message = "O CPF é obrigatório (até 11 caracteres).")
    )]
    #[schema(example = "12345678901")]
    pub cpf: Option<String>,

    #[serde(alias = "nomUsuario")]
    #[validate(
        required(message = "O nome é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    #[schema(example = "Maria da Silva")]
    pub nome: Option<String>,

    #[serde(alias = "desEmail")]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@exemplo.com")]
    pub email: Option<String>,

    #[serde(alias = "idtPapel")]
    #[validate(required(message = "O papel é obrigatório."))]
    #[schema(example = "C")]
    pub papel: Option<String>,
}

/// Dados já validados para o upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpsert {
    pub cpf: String,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

impl UpsertUserPayload {
    pub fn into_upsert(self) -> Result<UserUpsert, ValidationErrors> {
        let payload = Self {
            cpf: trimmed(self.cpf),
            nome: trimmed(self.nome),
            email: trimmed(self.email),
            papel: trimmed(self.papel),
        };
        payload.validate()?;

        let role = payload
            .papel
            .as_deref()
            .and_then(UserRole::parse_code)
            .ok_or_else(invalid_role)?;

        Ok(UserUpsert {
            cpf: payload.cpf.unwrap_or_default(),
            name: payload.nome.unwrap_or_default(),
            email: payload.email,
            role,
        })
    }
}
