use serde::{Deserialize, Serialize};

use super::finance::Transaction;
use crate::session::Plan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "super::id_from_any")]
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub plano: Option<String>,
    #[serde(default)]
    pub criado_em: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub movimentacoes: Vec<Transaction>,
}

impl User {
    pub fn plan(&self) -> Option<Plan> {
        self.plano.as_deref().and_then(Plan::parse)
    }

    pub fn is_premium(&self) -> bool {
        self.plan() == Some(Plan::Premium)
    }
}

/// Payload of `GET /api/admin/dashboard/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub premium_users: u64,
    #[serde(default)]
    pub total_groups: u64,
    #[serde(default)]
    pub total_transactions: u64,
}
