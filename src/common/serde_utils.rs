// src/common/serde_utils.rs

use serde::{Deserialize, Deserializer, Serialize};

/// Distingue campo ausente (`None`) de campo enviado como `null` (`Some(None)`).
/// Usar junto com `#[serde(default)]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Remove espaços das pontas; string vazia vira `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Telas antigas mandam números como texto ("3"), as novas como inteiro.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum IntOrText {
    Int(i64),
    Text(String),
}

impl IntOrText {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            IntOrText::Int(n) => Some(*n),
            IntOrText::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Inteiro > 0 que cabe numa coluna INTEGER (ids e quantidades).
    pub fn as_positive_i32(&self) -> Option<i32> {
        self.as_i64()
            .filter(|n| *n > 0)
            .and_then(|n| i32::try_from(n).ok())
    }
}
