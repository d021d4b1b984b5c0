// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::request::{
    STATUS_APROVADO, STATUS_DEFERIDO, STATUS_EM_ANALISE, STATUS_INDEFERIDO, STATUS_REJEITADO,
};

// Uma linha do GROUP BY status
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

// Os cards do topo do painel do gestor
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total: i64,
    pub em_analise: i64,
    /// DEFERIDO + APROVADO
    pub deferidos: i64,
    /// INDEFERIDO + REJEITADO
    pub indeferidos: i64,
    /// Contagem de todos os status, inclusive os fora dos três cards
    pub por_status: BTreeMap<String, i64>,
}

impl DashboardSummary {
    pub fn from_counts(counts: Vec<StatusCount>) -> Self {
        let mut summary = Self::default();

        for StatusCount { status, count } in counts {
            summary.total += count;
            match status.as_str() {
                STATUS_EM_ANALISE => summary.em_analise += count,
                STATUS_DEFERIDO | STATUS_APROVADO => summary.deferidos += count,
                STATUS_INDEFERIDO | STATUS_REJEITADO => summary.indeferidos += count,
                _ => {}
            }
            *summary.por_status.entry(status).or_insert(0) += count;
        }

        summary
    }
}
