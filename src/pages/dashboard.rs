use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{PageContext, View};
use crate::busy::Control;
use crate::error::{ClientError, ClientResult};
use crate::models::{Dashboard, NewGoal};
use crate::render::views;
use crate::session::{Plan, Requirement, Session};
use crate::types::required;

pub const SAVING_LABEL: &str = "Salvando...";

/// Raw goal form input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub titulo: String,
    pub valor_meta: String,
    pub data_limite: Option<String>,
}

impl GoalForm {
    pub fn validate(&self) -> ClientResult<NewGoal> {
        let titulo = required("título", &self.titulo)?;
        let valor_meta = parse_amount(&self.valor_meta)?;
        if valor_meta <= Decimal::ZERO {
            return Err(ClientError::validation("O valor da meta deve ser maior que zero."));
        }
        let data_limite = match self.data_limite.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ClientError::validation(format!("Data limite inválida: {} (use AAAA-MM-DD)", raw))
            })?),
        };

        Ok(NewGoal {
            titulo,
            valor_meta,
            data_limite,
        })
    }
}

/// Accepts `1000`, `1000.50`, `1.000,50` and `1000,50`.
pub fn parse_amount(raw: &str) -> ClientResult<Decimal> {
    let raw = raw.trim().trim_start_matches("R$").trim();
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    Decimal::from_str(&normalized)
        .map_err(|_| ClientError::validation(format!("Valor inválido: {}", raw)))
}

pub struct DashboardPage {
    ctx: Arc<PageContext>,
    session: Session,
    dashboard: Option<Dashboard>,
    submit: Control,
    view: View,
}

impl DashboardPage {
    /// Session guard only; nothing is fetched yet.
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        let session = ctx.guard(Requirement::Group)?;
        Ok(Self {
            ctx,
            session,
            dashboard: None,
            submit: Control::new("Criar meta"),
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn submit_control(&self) -> &Control {
        &self.submit
    }

    pub fn plan(&self) -> Option<Plan> {
        self.session.user_plan
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let group_id = self.session.group_id()?.to_string();
        match self.ctx.api.dashboard(&group_id).await {
            Ok(dashboard) => {
                self.view.render(views::dashboard(&dashboard));
                self.dashboard = Some(dashboard);
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    /// Validate locally, create the goal, then re-read the dashboard.
    pub async fn create_goal(&mut self, form: &GoalForm) -> ClientResult<()> {
        let goal = form.validate().map_err(|e| self.view.fail(e))?;
        let group_id = self.session.group_id()?.to_string();

        let result = {
            let _busy = self.submit.busy(SAVING_LABEL).map_err(|e| self.view.fail(e))?;
            self.ctx.api.create_goal(&group_id, &goal).await
        };

        match result {
            Ok(_) => {
                tracing::info!(group_id = %group_id, titulo = %goal.titulo, "goal created");
                self.view.success("Meta criada com sucesso!");
                self.refresh().await
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
