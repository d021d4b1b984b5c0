// src/models/medication.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::{
    error::AppError,
    serde_utils::{trimmed, IntOrText},
};

// Linha completa da tabela 'medications' (visão administrativa)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Medication {
    #[schema(example = 7)]
    pub id: i32,

    #[serde(rename = "nome")]
    #[schema(example = "Losartana")]
    pub name: String,

    #[serde(rename = "dosagem")]
    #[schema(example = "50mg")]
    pub dosage: Option<String>,

    #[serde(rename = "ativo")]
    pub active: bool,
}

// O que o cidadão vê ao escolher um medicamento (só ativos)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MedicationOption {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dosagem")]
    pub dosage: Option<String>,
}

/// Resultado da exclusão: física quando nunca usado, lógica quando já existe solicitação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Deactivated,
}

impl DeleteOutcome {
    pub fn message(self) -> &'static str {
        match self {
            DeleteOutcome::Removed => "Medicamento excluído!",
            DeleteOutcome::Deactivated => "Medicamento inativado (já possui uso).",
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MedicationListQuery {
    /// `true` lista também os inativos (telas de gestão)
    pub todos: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMedicationPayload {
    #[serde(alias = "nomMedicamento", alias = "nomCargo")]
    #[validate(
        required(message = "O nome do medicamento é obrigatório."),
        length(min = 1, message = "O nome do medicamento é obrigatório.")
    )]
    #[schema(example = "Losartana")]
    pub nome: Option<String>,

    #[serde(alias = "desDosagem")]
    #[schema(example = "50mg")]
    pub dosagem: Option<String>,
}

impl CreateMedicationPayload {
    pub fn normalized(self) -> Self {
        Self {
            nome: trimmed(self.nome),
            dosagem: trimmed(self.dosagem),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMedicationPayload {
    #[serde(alias = "codMedicamento", alias = "idMedicamento", alias = "codCargo")]
    #[validate(required(message = "O id do medicamento é obrigatório."))]
    #[schema(value_type = Option<i32>, example = 7)]
    pub id: Option<IntOrText>,

    #[serde(alias = "nomMedicamento", alias = "nomCargo")]
    #[validate(
        required(message = "O nome do medicamento é obrigatório."),
        length(min = 1, message = "O nome do medicamento é obrigatório.")
    )]
    pub nome: Option<String>,

    #[serde(alias = "desDosagem")]
    pub dosagem: Option<String>,
}

impl UpdateMedicationPayload {
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            nome: trimmed(self.nome),
            dosagem: trimmed(self.dosagem),
        }
    }

    /// Id já validado como presente; aqui só se confere que é inteiro > 0.
    pub fn medication_id(&self) -> Result<i32, AppError> {
        self.id
            .as_ref()
            .and_then(IntOrText::as_positive_i32)
            .ok_or_else(|| AppError::Validation("O id do medicamento é inválido.".into()))
    }
}
