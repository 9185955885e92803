use std::sync::Arc;

use super::{PageContext, View};
use crate::error::{ClientError, ClientResult};
use crate::types::{matching_passwords, required};

/// Where the forgot-password flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryStep {
    RequestCode,
    VerifyCode { email: String },
    ResetPassword { email: String, code: String },
    Done,
}

/// Public page: no session needed.
pub struct RecoveryFlow {
    ctx: Arc<PageContext>,
    step: RecoveryStep,
    view: View,
}

impl RecoveryFlow {
    pub fn new(ctx: Arc<PageContext>) -> Self {
        Self {
            ctx,
            step: RecoveryStep::RequestCode,
            view: View::default(),
        }
    }

    /// Resume at the code step, for a code that was requested earlier
    pub fn at_code(ctx: Arc<PageContext>, email: &str) -> Self {
        Self {
            ctx,
            step: RecoveryStep::VerifyCode {
                email: email.trim().to_string(),
            },
            view: View::default(),
        }
    }

    pub fn step(&self) -> &RecoveryStep {
        &self.step
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub async fn request_code(&mut self, email: &str) -> ClientResult<()> {
        let email = required("email", email).map_err(|e| self.view.fail(e))?;
        match self.ctx.api.forgot_password(&email).await {
            Ok(_) => {
                self.view
                    .success(format!("Se {} estiver cadastrado, você receberá um código.", email));
                self.step = RecoveryStep::VerifyCode { email };
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    pub async fn verify_code(&mut self, code: &str) -> ClientResult<()> {
        let RecoveryStep::VerifyCode { email } = &self.step else {
            return Err(ClientError::validation("Solicite um código primeiro."));
        };
        let email = email.clone();
        let code = required("código", code).map_err(|e| self.view.fail(e))?;

        match self.ctx.api.verify_code(&email, &code).await {
            Ok(_) => {
                self.view.success("Código verificado. Defina sua nova senha.");
                self.step = RecoveryStep::ResetPassword { email, code };
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    pub async fn reset_password(&mut self, new_password: &str, confirm: &str) -> ClientResult<()> {
        let RecoveryStep::ResetPassword { email, code } = &self.step else {
            return Err(ClientError::validation("Verifique o código primeiro."));
        };
        let (email, code) = (email.clone(), code.clone());
        matching_passwords(new_password, confirm).map_err(|e| self.view.fail(e))?;

        match self.ctx.api.reset_password(&email, &code, new_password).await {
            Ok(_) => {
                self.view.success("Senha redefinida! Faça login com a nova senha.");
                self.step = RecoveryStep::Done;
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
