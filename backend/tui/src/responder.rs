//! Simulated Responder
//!
//! Stands in for an assistant backend: replies arrive on a channel after a
//! delay, so the host exercises the same waiting/progress path a real
//! network call would.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// A reply that finished "processing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedReply {
    pub sender: String,
    pub text: String,
}

/// Demo reply to a user message.
pub fn echo_reply(message: &str) -> String {
    format!("I received your message: \"{message}\". This is a simulated response!")
}

/// Deliver `text` as an "Assistant" reply after `delay`.
pub fn spawn_reply(delay: Duration, text: String, tx: UnboundedSender<SimulatedReply>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!(delay_ms = delay.as_millis() as u64, "Simulated reply ready");
        tx.send(SimulatedReply {
            sender: "Assistant".to_string(),
            text,
        })
        .ok();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_echo_reply_text() {
        assert_eq!(
            echo_reply("hi"),
            "I received your message: \"hi\". This is a simulated response!"
        );
    }

    #[tokio::test]
    async fn test_reply_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = std::time::Instant::now();
        spawn_reply(Duration::from_millis(20), "done".into(), tx);

        let reply = rx.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(reply.sender, "Assistant");
        assert_eq!(reply.text, "done");
    }
}
