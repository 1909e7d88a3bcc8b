use std::time::Duration;

use anyhow::Result;
use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use uuid::Uuid;

use super::{ClientMessage, GameSession, ServerMessage};

/// Drive a session until the input channel closes or the output side goes away.
///
/// Input events and clock ticks are handled one at a time, so the session is
/// never touched concurrently. The clock only fires while the current round
/// is running, and it restarts from zero whenever a new round starts running.
pub async fn run(
    mut session: GameSession,
    mut inbound: mpsc::Receiver<ClientMessage>,
    outbound: mpsc::Sender<ServerMessage>,
    tick_interval: Duration,
) -> Result<()> {
    for message in session.opening_messages() {
        if outbound.send(message).await.is_err() {
            return Ok(());
        }
    }

    let mut ticker = time::interval_at(Instant::now() + tick_interval, tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut timed_round: Option<Uuid> = None;

    loop {
        let round_id = session.round().id();
        let running = session.round().is_running();
        if running && timed_round != Some(round_id) {
            ticker.reset();
            timed_round = Some(round_id);
        }

        let replies = tokio::select! {
            message = inbound.recv() => match message {
                Some(message) => session.handle(message),
                None => {
                    tracing::info!("Input closed, ending session");
                    break;
                }
            },
            _ = ticker.tick(), if running => session.tick(round_id),
        };

        for reply in replies {
            if outbound.send(reply).await.is_err() {
                tracing::info!("Output closed, ending session");
                return Ok(());
            }
        }
    }

    Ok(())
}
