//! Phone verification state machine.
//!
//! A session moves `Unstarted -> AwaitingPhone -> AwaitingCode -> Registered`.
//! A pending code left idle past the session timeout becomes `Lapsed`, so the
//! next code submitted is answered as expired.
//! `Registered` is terminal for the lifetime of the session.

use crate::error::VerificationError;
use rand::rngs::OsRng;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// One-time numeric challenge.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draw a fresh code from the OS CSPRNG, one independent digit at a time.
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VerificationCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Whether `text` has the shape of a verification code submission.
pub fn looks_like_code(text: &str) -> bool {
    text.len() == CODE_LENGTH && text.bytes().all(|b| b.is_ascii_digit())
}

/// Limits applied to pending verification codes.
#[derive(Debug, Clone)]
pub struct VerificationPolicy {
    /// How long an issued code stays valid
    pub code_ttl: Duration,
    /// Failed attempts allowed before the code is discarded (`None` = unlimited)
    pub max_attempts: Option<u32>,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::from_secs(10 * 60),
            max_attempts: None,
        }
    }
}

/// Verification progress of a single session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationState {
    #[default]
    Unstarted,
    AwaitingPhone,
    AwaitingCode {
        phone: String,
        code: VerificationCode,
        issued_at: Instant,
        attempts: u32,
    },
    Registered {
        phone: String,
    },
    /// A pending code was dropped with its idle session.
    Lapsed,
}

enum Outcome {
    Verified(String),
    Expired,
    Exhausted,
}

impl VerificationState {
    /// Handle `/start`: an untouched session starts waiting for a phone number.
    pub fn start(&mut self) {
        if matches!(self, Self::Unstarted | Self::Lapsed) {
            *self = Self::AwaitingPhone;
        }
    }

    /// Drop a pending code. Returns whether there was one.
    pub(crate) fn lapse(&mut self) -> bool {
        if matches!(self, Self::AwaitingCode { .. }) {
            *self = Self::Lapsed;
            true
        } else {
            false
        }
    }

    /// Issue a new code for `phone`, replacing any pending one.
    pub fn begin(&mut self, phone: String, now: Instant) -> Result<VerificationCode, VerificationError> {
        if self.is_registered() {
            return Err(VerificationError::AlreadyRegistered);
        }

        let code = VerificationCode::generate();
        *self = Self::AwaitingCode {
            phone,
            code: code.clone(),
            issued_at: now,
            attempts: 0,
        };
        Ok(code)
    }

    /// Check a submitted code. Returns the bound phone number on success.
    pub fn verify(
        &mut self,
        candidate: &str,
        policy: &VerificationPolicy,
        now: Instant,
    ) -> Result<String, VerificationError> {
        let outcome = match self {
            Self::Registered { .. } => return Err(VerificationError::AlreadyRegistered),
            Self::Unstarted | Self::AwaitingPhone => return Err(VerificationError::NoPendingCode),
            Self::Lapsed => Outcome::Expired,
            Self::AwaitingCode {
                phone,
                code,
                issued_at,
                attempts,
            } => {
                if now.saturating_duration_since(*issued_at) >= policy.code_ttl {
                    Outcome::Expired
                } else if code.matches(candidate) {
                    Outcome::Verified(std::mem::take(phone))
                } else {
                    *attempts += 1;
                    match policy.max_attempts {
                        Some(max) if *attempts >= max => Outcome::Exhausted,
                        _ => {
                            return Err(VerificationError::Mismatch {
                                attempts: *attempts,
                            })
                        }
                    }
                }
            }
        };

        match outcome {
            Outcome::Verified(phone) => {
                *self = Self::Registered {
                    phone: phone.clone(),
                };
                Ok(phone)
            }
            Outcome::Expired => {
                *self = Self::AwaitingPhone;
                Err(VerificationError::CodeExpired)
            }
            Outcome::Exhausted => {
                *self = Self::AwaitingPhone;
                Err(VerificationError::TooManyAttempts)
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    /// Phone number, pending or confirmed.
    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::AwaitingCode { phone, .. } | Self::Registered { phone } => Some(phone),
            _ => None,
        }
    }

    /// Code awaiting confirmation, if any.
    pub fn pending_code(&self) -> Option<&VerificationCode> {
        match self {
            Self::AwaitingCode { code, .. } => Some(code),
            _ => None,
        }
    }
}
