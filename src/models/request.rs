// src/models/request.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::{
    error::AppError,
    serde_utils::{double_option, trimmed, IntOrText},
};

// --- Status ---
pub const STATUS_EM_ANALISE: &str = "EM ANALISE";
pub const STATUS_DEFERIDO: &str = "DEFERIDO";
pub const STATUS_INDEFERIDO: &str = "INDEFERIDO";
// Sinônimos usados pelas telas antigas
pub const STATUS_APROVADO: &str = "APROVADO";
pub const STATUS_REJEITADO: &str = "REJEITADO";

/// Status sempre gravado em maiúsculas; vazio não é status.
pub fn normalize_status(raw: &str) -> Option<String> {
    let status = raw.trim().to_uppercase();
    (!status.is_empty()).then_some(status)
}

// Únicos resultados aceitos na avaliação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Deferido,
    Indeferido,
}

impl ReviewDecision {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_status(raw)?.as_str() {
            STATUS_DEFERIDO => Some(ReviewDecision::Deferido),
            STATUS_INDEFERIDO => Some(ReviewDecision::Indeferido),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Deferido => STATUS_DEFERIDO,
            ReviewDecision::Indeferido => STATUS_INDEFERIDO,
        }
    }
}

// --- Linhas ---

// A solicitação completa, como está na tabela
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MedicationRequest {
    #[serde(rename = "idSolicitacao")]
    pub id: i32,
    #[serde(rename = "codUsuarioCPF")]
    pub user_cpf: String,
    #[serde(rename = "idMedicamento")]
    pub medication_id: i32,
    #[serde(rename = "observacao")]
    pub comment: Option<String>,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    pub status: String,
    #[serde(rename = "dataCriacao")]
    pub created_at: DateTime<Utc>,
}

// Linha "legível" das listagens (JOIN com usuário e medicamento)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RequestSummary {
    #[serde(rename = "protocolo")]
    pub id: i32,
    #[serde(rename = "cidadao")]
    pub requester_name: String,
    #[serde(rename = "cpf")]
    pub user_cpf: String,
    #[serde(rename = "medicamento")]
    pub medication_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    /// DD/MM/YYYY
    #[serde(rename = "data")]
    #[schema(example = "19/10/2026")]
    pub created_on: String,
    pub status: String,
}

// --- Criação ---

#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub user_cpf: String,
    pub medication_id: i32,
    pub comment: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequestPayload {
    #[serde(rename = "codUsuarioCPF", alias = "cpfSolicitante")]
    #[validate(
        required(message = "O CPF do solicitante é obrigatório."),
        length(min = 1, max = 11, message = "O CPF do solicitante é obrigatório (até 11 caracteres).")
    )]
    #[schema(example = "12345678901")]
    pub cpf: Option<String>,

    // O <select> da tela de solicitação manda o id como texto ("7")
    #[serde(rename = "idMedicamento", alias = "codMedicamento", alias = "codCargo")]
    #[validate(required(message = "O medicamento é obrigatório."))]
    #[schema(value_type = Option<i32>, example = 7)]
    pub medication_id: Option<IntOrText>,

    #[serde(rename = "observacao", alias = "comentario")]
    pub comment: Option<String>,

    #[serde(rename = "quantidade")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub quantity: Option<IntOrText>,
}

impl CreateRequestPayload {
    pub fn into_new_request(self) -> Result<NewRequest, AppError> {
        let payload = Self {
            cpf: trimmed(self.cpf),
            ..self
        };
        payload.validate()?;

        let medication_id = payload
            .medication_id
            .as_ref()
            .and_then(IntOrText::as_positive_i32)
            .ok_or_else(|| AppError::Validation("O medicamento é inválido.".into()))?;

        let quantity = match &payload.quantity {
            None => 1,
            Some(raw) => parse_quantity(raw)?,
        };

        Ok(NewRequest {
            // validado acima
            user_cpf: payload.cpf.unwrap_or_default(),
            medication_id,
            comment: payload.comment,
            quantity,
        })
    }
}

fn parse_quantity(raw: &IntOrText) -> Result<i32, AppError> {
    raw.as_positive_i32()
        .ok_or_else(|| AppError::Validation("'quantidade' inválida. Deve ser inteiro > 0.".into()))
}

// --- Avaliação (deferir/indeferir) ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewPayload {
    #[serde(rename = "idSolicitacao")]
    #[schema(example = 15)]
    pub id: Option<i32>,
    #[schema(example = "DEFERIDO")]
    pub status: Option<String>,
}

impl ReviewPayload {
    pub fn into_decision(self) -> Result<(i32, ReviewDecision), AppError> {
        let id = self.id.filter(|id| *id > 0);
        let decision = self.status.as_deref().and_then(ReviewDecision::parse);

        match (id, decision) {
            (Some(id), Some(decision)) => Ok((id, decision)),
            _ => Err(AppError::Validation(
                "Dados inválidos: informe 'idSolicitacao' e status DEFERIDO ou INDEFERIDO.".into(),
            )),
        }
    }
}

// --- Troca só do status (livre, em maiúsculas) ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusPayload {
    #[schema(example = "APROVADO")]
    pub status: Option<String>,
}

impl StatusPayload {
    pub fn into_status(self) -> Result<String, AppError> {
        self.status
            .as_deref()
            .and_then(normalize_status)
            .ok_or_else(|| AppError::Validation("O campo 'status' é obrigatório.".into()))
    }
}

// --- Atualização parcial ---

/// Conjunto tipado de campos opcionais; cada um já validado.
/// `comment: Some(None)` limpa a observação.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPatch {
    pub status: Option<String>,
    pub quantity: Option<i32>,
    pub comment: Option<Option<String>>,
}

impl RequestPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.quantity.is_none() && self.comment.is_none()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRequestPayload {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "APROVADO")]
    pub status: Option<Option<String>>,

    #[serde(rename = "quantidade", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, example = 3)]
    pub quantity: Option<Option<IntOrText>>,

    #[serde(
        rename = "observacao",
        alias = "comentario",
        default,
        deserialize_with = "double_option"
    )]
    #[schema(value_type = Option<String>, example = "Alterar quantidade")]
    pub comment: Option<Option<String>>,
}

impl TryFrom<UpdateRequestPayload> for RequestPatch {
    type Error = AppError;

    fn try_from(payload: UpdateRequestPayload) -> Result<Self, Self::Error> {
        let status = match payload.status {
            None => None,
            Some(raw) => Some(
                raw.as_deref()
                    .and_then(normalize_status)
                    .ok_or_else(|| AppError::Validation("Campo 'status' vazio.".into()))?,
            ),
        };

        let quantity = match payload.quantity {
            None => None,
            Some(None) => {
                return Err(AppError::Validation("'quantidade' inválida.".into()));
            }
            Some(Some(raw)) => Some(parse_quantity(&raw)?),
        };

        let patch = RequestPatch {
            status,
            quantity,
            comment: payload.comment,
        };

        if patch.is_empty() {
            return Err(AppError::Validation(
                "Nenhum campo para atualizar foi fornecido.".into(),
            ));
        }

        Ok(patch)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestListQuery {
    /// Filtra pelas solicitações de um cidadão
    pub cpf: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(json: &str) -> Result<RequestPatch, AppError> {
        serde_json::from_str::<UpdateRequestPayload>(json)
            .unwrap()
            .try_into()
    }

    #[test]
    fn create_defaults_quantity_to_one() {
        let payload: CreateRequestPayload =
            serde_json::from_str(r#"{"codUsuarioCPF":"123","idMedicamento":7}"#).unwrap();
        let new = payload.into_new_request().unwrap();
        assert_eq!(
            new,
            NewRequest {
                user_cpf: "123".into(),
                medication_id: 7,
                comment: None,
                quantity: 1,
            }
        );
    }

    #[test]
    fn create_accepts_legacy_names_and_text_quantity() {
        let payload: CreateRequestPayload = serde_json::from_str(
            r#"{"cpfSolicitante":" 123 ","codMedicamento":2,"comentario":"urgente","quantidade":"3"}"#,
        )
        .unwrap();
        let new = payload.into_new_request().unwrap();
        assert_eq!(new.user_cpf, "123");
        assert_eq!(new.medication_id, 2);
        assert_eq!(new.comment.as_deref(), Some("urgente"));
        assert_eq!(new.quantity, 3);
    }

    #[test]
    fn create_rejects_missing_fields_and_bad_quantity() {
        let missing: CreateRequestPayload =
            serde_json::from_str(r#"{"idMedicamento":7}"#).unwrap();
        assert!(matches!(
            missing.into_new_request(),
            Err(AppError::ValidationError(_))
        ));

        let zero: CreateRequestPayload =
            serde_json::from_str(r#"{"codUsuarioCPF":"1","idMedicamento":7,"quantidade":0}"#)
                .unwrap();
        assert!(matches!(zero.into_new_request(), Err(AppError::Validation(_))));
    }

    #[test]
    fn create_accepts_medication_id_sent_as_text() {
        let payload: CreateRequestPayload = serde_json::from_str(
            r#"{"codUsuarioCPF":"123","idMedicamento":"7","observacao":""}"#,
        )
        .unwrap();
        let new = payload.into_new_request().unwrap();
        assert_eq!(new.medication_id, 7);
        assert_eq!(new.quantity, 1);

        for bad in [r#""sete""#, r#""0""#, "-1"] {
            let json = format!(r#"{{"codUsuarioCPF":"123","idMedicamento":{bad}}}"#);
            let payload: CreateRequestPayload = serde_json::from_str(&json).unwrap();
            assert!(
                matches!(payload.into_new_request(), Err(AppError::Validation(_))),
                "idMedicamento {bad}"
            );
        }
    }

    #[test]
    fn review_accepts_only_the_two_decisions() {
        assert_eq!(ReviewDecision::parse(" deferido "), Some(ReviewDecision::Deferido));
        assert_eq!(ReviewDecision::parse("INDEFERIDO"), Some(ReviewDecision::Indeferido));
        assert_eq!(ReviewDecision::parse("APROVADO"), None);
        assert_eq!(ReviewDecision::parse("EM ANALISE"), None);
        assert_eq!(ReviewDecision::parse(""), None);

        let no_id = ReviewPayload {
            id: None,
            status: Some("DEFERIDO".into()),
        };
        assert!(no_id.into_decision().is_err());
    }

    #[test]
    fn status_is_upper_cased() {
        let payload = StatusPayload {
            status: Some("  aprovado ".into()),
        };
        assert_eq!(payload.into_status().unwrap(), "APROVADO");

        let blank = StatusPayload {
            status: Some("   ".into()),
        };
        assert!(blank.into_status().is_err());
    }

    #[test]
    fn patch_needs_at_least_one_field() {
        assert!(matches!(patch("{}"), Err(AppError::Validation(_))));
        assert!(matches!(patch(r#"{"outro": 1}"#), Err(AppError::Validation(_))));
    }

    #[test]
    fn patch_validates_each_field() {
        assert!(patch(r#"{"status": ""}"#).is_err());
        assert!(patch(r#"{"status": null}"#).is_err());
        assert!(patch(r#"{"quantidade": -1}"#).is_err());
        assert!(patch(r#"{"quantidade": "abc"}"#).is_err());
        assert!(patch(r#"{"quantidade": null}"#).is_err());
    }

    #[test]
    fn patch_keeps_only_supplied_fields() {
        let p = patch(r#"{"status": "aprovado", "comentario": ""}"#).unwrap();
        assert_eq!(
            p,
            RequestPatch {
                status: Some("APROVADO".into()),
                quantity: None,
                comment: Some(Some(String::new())),
            }
        );

        let p = patch(r#"{"observacao": null, "quantidade": 2}"#).unwrap();
        assert_eq!(p.quantity, Some(2));
        assert_eq!(p.comment, Some(None));
        assert_eq!(p.status, None);
    }
}
