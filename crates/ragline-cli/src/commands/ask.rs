//! Streamed question answering

use crate::console::CliConsole;
use crate::render::Renderer;
use crate::signal_handler::SignalHandler;
use anyhow::{Context, Result, bail};
use ragline_core::{
    ChannelObserver, ChatMode, ClientConfig, SessionController, SessionOutcome, StreamRequest,
};
use std::io;

/// Arguments for `ragline ask`
pub struct AskArgs {
    pub question: String,
    pub agent: bool,
    pub show_steps: bool,
    pub verbose: bool,
}

impl AskArgs {
    fn mode(&self) -> ChatMode {
        if self.agent {
            ChatMode::Agent
        } else {
            ChatMode::Chat
        }
    }
}

/// Ask one question and stream the answer to stdout
pub async fn execute(config: &ClientConfig, args: AskArgs) -> Result<()> {
    let console = CliConsole::new(args.verbose);
    let question = args.question.trim();
    if question.is_empty() {
        bail!("Question must not be empty");
    }

    let mode = args.mode();
    let request = StreamRequest::new(
        question,
        config.defaults.provider.clone(),
        config.defaults.model.clone(),
        mode,
    );
    console.info(&format!(
        "Asking {} ({} / {})",
        mode, request.provider, request.model
    ));
    if mode == ChatMode::Agent && !args.show_steps {
        console.info("Thinking...");
    }

    let controller = SessionController::new(config.api.clone())?;
    let (observer, mut updates) = ChannelObserver::new();
    let session = controller.start(request, observer);
    let _signals =
        SignalHandler::start(session.cancel_handle()).context("Failed to install Ctrl+C handler")?;
    tracing::debug!("Started session {}", session.id());

    let mut renderer = Renderer::new(io::stdout(), mode, args.show_steps);
    while let Some(update) = updates.recv().await {
        if let Err(e) = renderer.render(&update) {
            session.cancel();
            return Err(e).context("Failed to write answer");
        }
    }

    match session.wait().await {
        SessionOutcome::Completed(_) => Ok(()),
        SessionOutcome::NoBody => {
            console.warn("The backend sent no answer");
            Ok(())
        }
        SessionOutcome::Cancelled => {
            console.warn("Cancelled");
            Ok(())
        }
        SessionOutcome::Failed { error, .. } => bail!(error),
    }
}
