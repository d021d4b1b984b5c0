// src/common/envelope.rs

use serde::Serialize;

const SUCESSO: &str = "SUCESSO";

/// Envelope padrão das respostas de escrita:
/// `{"tipo":"SUCESSO","mensagem":...,"item":...,"protocolo":...}`.
#[derive(Debug, Serialize)]
pub struct Sucesso<T: Serialize> {
    pub tipo: &'static str,
    pub mensagem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocolo: Option<i32>,
}

impl Sucesso<()> {
    pub fn mensagem(mensagem: impl Into<String>) -> Self {
        Self {
            tipo: SUCESSO,
            mensagem: mensagem.into(),
            item: None,
            protocolo: None,
        }
    }

    pub fn protocolo(mensagem: impl Into<String>, protocolo: i32) -> Self {
        Self {
            protocolo: Some(protocolo),
            ..Self::mensagem(mensagem)
        }
    }
}

impl<T: Serialize> Sucesso<T> {
    pub fn com_item(mensagem: impl Into<String>, item: T) -> Self {
        Self {
            tipo: SUCESSO,
            mensagem: mensagem.into(),
            item: Some(item),
            protocolo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn protocolo_envelope_omits_item() {
        let body = serde_json::to_value(Sucesso::protocolo("ok", 42)).unwrap();
        assert_eq!(body, json!({"tipo": "SUCESSO", "mensagem": "ok", "protocolo": 42}));
    }

    #[test]
    fn item_envelope_omits_protocolo() {
        let body = serde_json::to_value(Sucesso::com_item("ok", json!({"id": 1}))).unwrap();
        assert_eq!(body, json!({"tipo": "SUCESSO", "mensagem": "ok", "item": {"id": 1}}));
    }
}
