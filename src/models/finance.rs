use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Gasto,
    Ganho,
    Investimento,
    #[serde(other)]
    Outro,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Gasto => "Gasto",
            TransactionKind::Ganho => "Ganho",
            TransactionKind::Investimento => "Investimento",
            TransactionKind::Outro => "Outro",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub descricao: String,
    pub tipo: TransactionKind,
    pub valor: Decimal,
    #[serde(default)]
    pub data_transacao: Option<String>,
    #[serde(default)]
    pub responsavel_nome: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub titulo: String,
    pub valor_meta: Decimal,
    #[serde(default)]
    pub valor_atual: Decimal,
    #[serde(default)]
    pub data_limite: Option<String>,
}

impl Goal {
    /// `round(valor_atual / valor_meta * 100)`, 0 for a non-positive target.
    ///
    /// Saturates at `i64::MAX`/`i64::MIN` when the ratio leaves `Decimal` range.
    pub fn progress_percent(&self) -> i64 {
        if self.valor_meta <= Decimal::ZERO {
            return 0;
        }
        let saturated = if self.valor_atual.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        self.valor_atual
            .checked_div(self.valor_meta)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|pct| {
                pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .unwrap_or(saturated)
    }
}

/// Body of `POST /groups/{id}/goals`
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub titulo: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_meta: Decimal,
    pub data_limite: Option<NaiveDate>,
}

/// Payload of `GET /groups/{id}/dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub nome_grupo: String,
    #[serde(default)]
    pub plano: Option<String>,
    #[serde(default)]
    pub saldo_total: Decimal,
    #[serde(default)]
    pub total_ganhos: Decimal,
    #[serde(default)]
    pub total_gastos: Decimal,
    #[serde(default)]
    pub total_investimentos: Decimal,
    #[serde(default)]
    pub movimentacoes: Vec<Transaction>,
    #[serde(default)]
    pub meta_ativa: Option<Goal>,
}

/// One member's totals for a calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStats {
    pub member_name: String,
    #[serde(default)]
    pub ganhos: Decimal,
    #[serde(default)]
    pub gastos: Decimal,
    #[serde(default)]
    pub investimentos: Decimal,
}
