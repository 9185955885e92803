use std::sync::Arc;

use super::{PageContext, View};
use crate::api::endpoints::NewAccount;
use crate::error::{ClientError, ClientResult};
use crate::models::User;
use crate::types::{matching_passwords, required};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub nome: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login, registration, group selection and logout. Public page.
pub struct LoginPage {
    ctx: Arc<PageContext>,
    view: View,
}

impl LoginPage {
    pub fn new(ctx: Arc<PageContext>) -> Self {
        Self {
            ctx,
            view: View::default(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Exchange credentials for a token, store it and cache the plan tier.
    ///
    /// `legacy` uses the form-encoded `/token` route.
    pub async fn login(&mut self, email: &str, password: &str, legacy: bool) -> ClientResult<User> {
        let email = required("email", email).map_err(|e| self.view.fail(e))?;
        if password.is_empty() {
            return Err(self.view.fail(ClientError::validation("Informe sua senha.")));
        }

        let token = if legacy {
            self.ctx.api.login_legacy(&email, password).await
        } else {
            self.ctx.api.login(&email, password).await
        }
        .map_err(|e| self.view.fail(e))?;

        self.ctx.session().begin(&token.access_token)?;

        let user = self.ctx.api.users_me().await.map_err(|e| self.view.fail(e))?;
        if let Some(plan) = user.plan() {
            self.ctx.session().set_plan(plan)?;
        }
        tracing::info!(user_id = %user.id, "logged in");
        self.view.success(format!("Bem-vindo, {}!", user.nome));
        Ok(user)
    }

    pub async fn register(&mut self, form: &RegisterForm) -> ClientResult<()> {
        let account = self.validate(form).map_err(|e| self.view.fail(e))?;
        match self.ctx.api.register(&account).await {
            Ok(_) => {
                self.view.success("Cadastro realizado! Faça login para continuar.");
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    fn validate(&self, form: &RegisterForm) -> ClientResult<NewAccount> {
        let nome = required("nome", &form.nome)?;
        let email = required("email", &form.email)?;
        matching_passwords(&form.password, &form.confirm_password)?;
        Ok(NewAccount {
            nome,
            email,
            password: form.password.clone(),
        })
    }

    /// Remember which group the group-scoped pages operate on
    pub fn select_group(&mut self, group_id: &str) -> ClientResult<()> {
        let group_id = required("grupo", group_id).map_err(|e| self.view.fail(e))?;
        self.ctx.session().set_active_group(&group_id)?;
        self.view.success(format!("Grupo ativo: {}", group_id));
        Ok(())
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.ctx.session().clear()?;
        tracing::info!("logged out");
        self.view.success("Sessão encerrada.");
        Ok(())
    }
}
