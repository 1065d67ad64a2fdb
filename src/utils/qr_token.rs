// src/utils/qr_token.rs

use std::{sync::Arc, time::Duration};

use rand::Rng;
use tokio::{sync::watch, task::JoinHandle, time::Instant};

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const TOKEN_LEN: usize = 8;

/// Generates a fresh 8-character lowercase alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Holds the single classroom QR token shared by every request.
///
/// The value lives in a `watch` channel so readers always see the last
/// written token without locking. Both the rotation task and the manual
/// override write through `send_replace`, last write wins.
#[derive(Debug)]
pub struct QrTokenRotator {
    token: watch::Sender<String>,
}

impl QrTokenRotator {
    pub fn new() -> Self {
        Self::with_token(generate_token())
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let (token, _) = watch::channel(token.into());
        Self { token }
    }

    pub fn current_token(&self) -> String {
        self.token.borrow().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.token.send_replace(token.into());
    }

    /// Replaces the token with a freshly generated one and returns it.
    pub fn rotate(&self) -> String {
        let next = generate_token();
        self.token.send_replace(next.clone());
        next
    }

    /// Spawns the timer task that rotates the token every `period`.
    ///
    /// The task only holds a weak reference and exits once the last
    /// `Arc<QrTokenRotator>` is dropped.
    pub fn spawn_rotation(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let rotator = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let Some(rotator) = rotator.upgrade() else {
                    break;
                };
                rotator.rotate();
                tracing::debug!("QR token rotated");
            }
        })
    }
}

impl Default for QrTokenRotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_token(token: &str) -> bool {
        token.len() == TOKEN_LEN
            && token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    }

    #[test]
    fn generated_tokens_are_lowercase_alphanumeric() {
        for _ in 0..200 {
            let token = generate_token();
            assert!(is_valid_token(&token), "bad token {token}");
        }
    }

    #[test]
    fn manual_override_is_visible_immediately() {
        let rotator = QrTokenRotator::new();
        rotator.set_token("class101");
        assert_eq!(rotator.current_token(), "class101");
    }

    #[test]
    fn rotate_replaces_token() {
        let rotator = QrTokenRotator::with_token("fixed");
        let next = rotator.rotate();
        assert_eq!(rotator.current_token(), next);
        assert!(is_valid_token(&next));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_rotates_after_period() {
        let rotator = Arc::new(QrTokenRotator::with_token("initial"));
        let _task = rotator.spawn_rotation(Duration::from_secs(45));

        tokio::time::sleep(Duration::from_secs(44)).await;
        assert_eq!(rotator.current_token(), "initial");

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_ne!(rotator.current_token(), "initial");
    }

    #[tokio::test(start_paused = true)]
    async fn timer_stops_when_rotator_dropped() {
        let rotator = Arc::new(QrTokenRotator::new());
        let task = rotator.spawn_rotation(Duration::from_secs(45));

        drop(rotator);
        task.await.unwrap();
    }
}
