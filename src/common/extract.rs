// src/common/extract.rs

// Extratores do axum com a rejeição convertida em `AppError`,
// para que corpo/rota/consulta malformados virem 400 no envelope padrão.

use axum::{
    extract::{Path, Query},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::common::error::AppError;

pub type JsonBody<T> = WithRejection<Json<T>, AppError>;
pub type PathParam<T> = WithRejection<Path<T>, AppError>;
pub type QueryParams<T> = WithRejection<Query<T>, AppError>;
