//! Out-of-band delivery of verification codes.

use async_trait::async_trait;
use credential_store::phone_fingerprint;
use session_store::VerificationCode;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Sends a verification code to the phone being verified.
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    async fn deliver(&self, phone: &str, code: &VerificationCode) -> Result<(), DeliveryError>;
}

/// Writes the code to the log in place of sending an SMS.
#[derive(Debug, Default)]
pub struct LogCodeDelivery;

#[async_trait]
impl CodeDelivery for LogCodeDelivery {
    async fn deliver(&self, phone: &str, code: &VerificationCode) -> Result<(), DeliveryError> {
        info!(
            owner = %phone_fingerprint(phone),
            "Sending SMS: Your verification code is {}",
            code
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_log_delivery_keeps_phone_out_of_logs() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let code = VerificationCode::from("123456");
        LogCodeDelivery.deliver("+14155551234", &code).await.unwrap();

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("123456"));
        assert!(output.contains(&phone_fingerprint("+14155551234")));
        assert!(!output.contains("4155551234"));
    }
}
