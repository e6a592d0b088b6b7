use anyhow::{anyhow, Result};
use clap::Args;
use tabcomplete::completions::{CompleterState, TabCompleterBuilder};
use tracing::debug;

/// Print the ranked candidates for one input
#[derive(Args)]
pub struct CompleteCommand {
    /// The text to complete; an empty string lists the working directory
    #[arg(default_value = "")]
    pub input: String,

    /// Print the line that selecting the candidate at this index would produce
    #[arg(short = 's', long = "select")]
    pub select: Option<usize>,
}

impl CompleteCommand {
    pub async fn execute(&self, builder: TabCompleterBuilder) -> Result<()> {
        debug!("Executing complete command");

        let (mut completer, mut results) = builder.build_with_channel()?;
        completer.request(&self.input);

        let message = results
            .recv()
            .await
            .ok_or_else(|| anyhow!("Completion finished without a result"))?;
        completer.update(message)?;

        if let Some(error) = completer.error() {
            return Err(anyhow!("{}", error.error));
        }

        let Some(navigator) = completer.navigator() else {
            debug!("No candidates for {:?}", self.input);
            return Ok(());
        };

        match self.select {
            None => {
                for candidate in navigator.candidates() {
                    println!("{}", candidate);
                }
            }
            Some(index) => {
                let len = navigator.len();
                if index >= len {
                    return Err(anyhow!("Only {} candidates available", len));
                }
                for _ in 0..index {
                    completer.advance();
                }
                let joined = completer.select(&self.input)?;
                debug_assert_eq!(completer.state(), CompleterState::Idle);
                println!("{}", joined);
            }
        }

        Ok(())
    }
}
