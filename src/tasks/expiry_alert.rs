//! Expiry alert background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::state::ExpiryNotice;

/// Background task that presents every expiry notice as an alert
pub async fn expiry_alert_task(mut expiry_rx: broadcast::Receiver<ExpiryNotice>) {
    info!("Starting expiry alert task");

    loop {
        match expiry_rx.recv().await {
            Ok(notice) => {
                info!(
                    expired_at = %notice.expired_at,
                    "ALERT {}: {}",
                    notice.title,
                    notice.body
                );
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Expiry alert task lagged, {} alerts dropped", missed);
            }
            Err(RecvError::Closed) => {
                info!("Expiry channel closed, stopping alert task");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_alert_task_stops_when_channel_closes() {
        let (tx, rx) = broadcast::channel(4);
        let task = tokio::spawn(expiry_alert_task(rx));

        tx.send(ExpiryNotice::now()).unwrap();
        drop(tx);

        task.await.unwrap();
    }
}
