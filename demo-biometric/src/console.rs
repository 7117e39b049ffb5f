use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use biometric_bridge::{CustomSurface, CustomUiPresenter, PresenterDecision};

/// Draws the custom surface on the terminal and waits for an answer.
pub(crate) struct ConsolePresenter;

#[async_trait]
impl CustomUiPresenter for ConsolePresenter {
    async fn present(&self, surface: &CustomSurface) -> PresenterDecision {
        println!();
        println!("+--- {} ({:?})", surface.title, surface.icon);
        println!("|  {}", surface.reason);
        if surface.legacy {
            println!("|  Touch the sensor now, or press Enter to {}", surface.cancel_text);
        } else {
            println!(
                "|  [y] {}    [anything else] {}",
                surface.confirm_text, surface.cancel_text
            );
        }
        println!("+---");

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = stdin.read_line(&mut line).await {
            tracing::warn!("Failed to read answer: {}", e);
            return PresenterDecision::Dismissed;
        }

        match line.trim() {
            "y" | "Y" if !surface.legacy => PresenterDecision::Confirmed,
            _ => PresenterDecision::Dismissed,
        }
    }
}
