//! Verify command - checks a submitted code.

use crate::commands::{main_keyboard, CommandHandler, Reply};
use crate::error::AppResult;
use async_trait::async_trait;
use credential_store::phone_fingerprint;
use session_store::{looks_like_code, Session, VerificationError, VerificationPolicy};
use tracing::info;

pub struct VerifyCodeHandler {
    policy: VerificationPolicy,
}

impl VerifyCodeHandler {
    pub fn new(policy: VerificationPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl CommandHandler for VerifyCodeHandler {
    fn name(&self) -> &str {
        "verify"
    }

    fn for_registered(&self) -> bool {
        false
    }

    fn accepts(&self, text: &str) -> bool {
        looks_like_code(text)
    }

    async fn execute(&self, session: &mut Session, text: &str) -> AppResult<Reply> {
        match session.verify(text, &self.policy) {
            Ok(phone) => {
                info!(owner = %phone_fingerprint(&phone), "Session verified");
                Ok(Reply::with_keyboard(
                    "Verification successful! You can now manage your passwords.",
                    main_keyboard(),
                ))
            }
            Err(VerificationError::CodeExpired) => Ok(Reply::text(
                "Your verification code has expired. Please send your phone number again.",
            )),
            Err(VerificationError::TooManyAttempts) => Ok(Reply::text(
                "Too many invalid attempts. Please send your phone number again.",
            )),
            Err(VerificationError::Mismatch { attempts }) => {
                info!("Verification code mismatch (attempt {})", attempts);
                Ok(Reply::text("Invalid verification code. Please try again."))
            }
            Err(VerificationError::NoPendingCode) => {
                Ok(Reply::text("Invalid verification code. Please try again."))
            }
            Err(e) => Err(e.into()),
        }
    }
}
