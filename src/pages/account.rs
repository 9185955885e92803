use std::sync::Arc;

use super::{PageContext, View};
use crate::api::endpoints::{PasswordChange, ProfileUpdate};
use crate::error::{ClientError, ClientResult};
use crate::models::User;
use crate::render::views;
use crate::session::Requirement;
use crate::types::{matching_passwords, required};

/// Account edit flow.
///
/// `Viewing → PendingPasswordConfirmation → Editable → Viewing`; a session
/// expiry from any state lands in `Expired`, which has no way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    PendingPasswordConfirmation,
    Editable,
    Expired,
}

pub struct AccountPage {
    ctx: Arc<PageContext>,
    profile: Option<User>,
    state: EditState,
    inline_error: Option<String>,
    view: View,
}

impl AccountPage {
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        ctx.guard(Requirement::Token)?;
        Ok(Self {
            ctx,
            profile: None,
            state: EditState::Viewing,
            inline_error: None,
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Error shown next to the edit form, separate from the page message area
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    fn expired_check(&self) -> ClientResult<()> {
        if self.state == EditState::Expired {
            return Err(ClientError::SessionExpired);
        }
        Ok(())
    }

    fn on_flow_error(&mut self, err: ClientError) -> ClientError {
        if err.is_terminal() {
            self.state = EditState::Expired;
            self.inline_error = None;
            return self.view.fail(err);
        }
        self.inline_error = Some(err.to_string());
        err
    }

    /// Load the profile and refresh the cached plan tier
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.expired_check()?;
        match self.ctx.api.users_me().await {
            Ok(user) => {
                if let Some(plan) = user.plan() {
                    if let Err(e) = self.ctx.session().set_plan(plan) {
                        tracing::warn!("could not cache plan: {}", e);
                    }
                }
                self.view.render(views::profile(&user));
                self.profile = Some(user);
                Ok(())
            }
            Err(e) => {
                if e.is_terminal() {
                    self.state = EditState::Expired;
                }
                Err(self.view.fail(e))
            }
        }
    }

    pub fn request_edit(&mut self) -> ClientResult<()> {
        self.expired_check()?;
        if self.state == EditState::Viewing {
            self.state = EditState::PendingPasswordConfirmation;
            self.inline_error = None;
        }
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> ClientResult<()> {
        self.expired_check()?;
        self.state = EditState::Viewing;
        self.inline_error = None;
        Ok(())
    }

    /// Verify the current password; success unlocks the form.
    pub async fn confirm_password(&mut self, password: &str) -> ClientResult<()> {
        self.expired_check()?;
        if self.state != EditState::PendingPasswordConfirmation {
            return Err(ClientError::validation("Solicite a edição antes de confirmar a senha."));
        }
        if password.is_empty() {
            return Err(self.on_flow_error(ClientError::validation("Informe sua senha atual.")));
        }

        match self.ctx.api.verify_password(password).await {
            Ok(_) => {
                self.state = EditState::Editable;
                self.inline_error = None;
                Ok(())
            }
            Err(e) => Err(self.on_flow_error(e)),
        }
    }

    /// Save profile changes, then reload the profile.
    pub async fn save(&mut self, nome: &str, email: &str) -> ClientResult<()> {
        self.expired_check()?;
        if self.state != EditState::Editable {
            return Err(ClientError::validation("Confirme sua senha antes de salvar."));
        }
        let update = match (required("nome", nome), required("email", email)) {
            (Ok(nome), Ok(email)) => ProfileUpdate { nome, email },
            (Err(e), _) | (_, Err(e)) => return Err(self.on_flow_error(e)),
        };

        match self.ctx.api.update_me(&update).await {
            Ok(_) => {
                self.state = EditState::Viewing;
                self.inline_error = None;
                self.view.success("Dados atualizados com sucesso!");
                self.refresh().await
            }
            Err(e) => Err(self.on_flow_error(e)),
        }
    }

    /// Mismatched confirmation fails locally without contacting the server.
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ClientResult<()> {
        self.expired_check()?;
        matching_passwords(new_password, confirm_password).map_err(|e| self.view.fail(e))?;
        if current_password.is_empty() {
            return Err(self.view.fail(ClientError::validation("Informe sua senha atual.")));
        }

        let change = PasswordChange {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        match self.ctx.api.change_password(&change).await {
            Ok(_) => {
                self.view.success("Senha alterada com sucesso!");
                Ok(())
            }
            Err(e) => {
                if e.is_terminal() {
                    self.state = EditState::Expired;
                }
                Err(self.view.fail(e))
            }
        }
    }

    /// Confirm, delete the account, then end the session.
    pub async fn delete_account(&mut self) -> ClientResult<bool> {
        self.expired_check()?;
        let confirmed = self
            .ctx
            .dialogs
            .confirm(
                "Excluir conta",
                "Esta ação é permanente e removerá todos os seus dados. Deseja continuar?",
            )
            .await?;
        if !confirmed {
            return Ok(false);
        }

        match self.ctx.api.delete_me().await {
            Ok(_) => {
                tracing::info!("account deleted");
                self.state = EditState::Expired;
                self.ctx.session().end()?;
                Ok(true)
            }
            Err(e) => {
                if e.is_terminal() {
                    self.state = EditState::Expired;
                }
                Err(self.view.fail(e))
            }
        }
    }
}
