use std::sync::Arc;

use super::{PageContext, View};
use crate::api::endpoints::SupportTicket;
use crate::busy::{Control, SENDING_LABEL};
use crate::error::ClientResult;
use crate::session::Requirement;
use crate::types::required;

pub struct SupportPage {
    ctx: Arc<PageContext>,
    submit: Control,
    view: View,
}

impl SupportPage {
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        ctx.guard(Requirement::Token)?;
        Ok(Self {
            ctx,
            submit: Control::new("Enviar chamado"),
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Submit button; observable while a ticket is in flight
    pub fn submit_control(&self) -> Control {
        self.submit.clone()
    }

    pub async fn submit_ticket(&mut self, assunto: &str, mensagem: &str) -> ClientResult<()> {
        let ticket = match (required("assunto", assunto), required("mensagem", mensagem)) {
            (Ok(assunto), Ok(mensagem)) => SupportTicket { assunto, mensagem },
            (Err(e), _) | (_, Err(e)) => return Err(self.view.fail(e)),
        };

        let result = {
            let _busy = self.submit.busy(SENDING_LABEL).map_err(|e| self.view.fail(e))?;
            self.ctx.api.create_ticket(&ticket).await
        };

        match result {
            Ok(_) => {
                tracing::info!(assunto = %ticket.assunto, "support ticket sent");
                self.view
                    .success("Chamado enviado! Nossa equipe responderá por email em breve.");
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
