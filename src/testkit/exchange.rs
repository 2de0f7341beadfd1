//! Scripted exchange sessions for deterministic disbursement tests.
//!
//! [`ScriptedExchange`] is a [`SessionFactory`] whose sessions replay queued
//! responses and record every call, so tests can assert exactly how many
//! sessions were created and how many exchange calls were made.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::error::ExchangeError;
use crate::port::outbound::exchange::{
    AccountInfo, AssetBalance, ExchangeSession, SessionFactory, WithdrawReceipt, WithdrawRequest,
};

/// A time-desync error as the exchange would report it.
#[must_use]
pub fn desync() -> ExchangeError {
    ExchangeError::TimeDesync {
        message: "Timestamp for this request is outside of the recvWindow.".into(),
    }
}

#[derive(Default)]
struct ScriptState {
    account_script: VecDeque<Result<AccountInfo, ExchangeError>>,
    withdraw_script: VecDeque<Result<WithdrawReceipt, ExchangeError>>,
    fallback_account: Option<AccountInfo>,
    session_error: Option<ExchangeError>,
    sessions_created: usize,
    account_calls: usize,
    withdrawals: Vec<WithdrawRequest>,
}

/// Session factory replaying scripted responses.
///
/// Account lookups pop the account script and fall back to the balance set
/// with [`with_balance`](Self::with_balance). Withdrawals pop the withdraw
/// script and succeed with a generated id once it is empty.
#[derive(Clone, Default)]
pub struct ScriptedExchange {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedExchange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer unscripted account lookups with a single-asset balance.
    #[must_use]
    pub fn with_balance(self, asset: &str, free: Decimal) -> Self {
        self.state.lock().fallback_account = Some(AccountInfo {
            balances: vec![AssetBalance {
                asset: asset.to_string(),
                free,
                locked: Decimal::ZERO,
            }],
        });
        self
    }

    /// Queue the next account lookup response.
    pub fn push_account(&self, result: Result<AccountInfo, ExchangeError>) {
        self.state.lock().account_script.push_back(result);
    }

    /// Queue the next withdrawal response.
    pub fn push_withdraw(&self, result: Result<WithdrawReceipt, ExchangeError>) {
        self.state.lock().withdraw_script.push_back(result);
    }

    /// Make every session construction fail with `error`.
    pub fn fail_sessions(&self, error: ExchangeError) {
        self.state.lock().session_error = Some(error);
    }

    #[must_use]
    pub fn sessions_created(&self) -> usize {
        self.state.lock().sessions_created
    }

    #[must_use]
    pub fn account_calls(&self) -> usize {
        self.state.lock().account_calls
    }

    /// Every withdrawal request received, in call order.
    #[must_use]
    pub fn withdrawals(&self) -> Vec<WithdrawRequest> {
        self.state.lock().withdrawals.clone()
    }
}

impl SessionFactory for ScriptedExchange {
    fn create_session(&self) -> Result<Box<dyn ExchangeSession>, ExchangeError> {
        let mut state = self.state.lock();
        if let Some(error) = &state.session_error {
            return Err(error.clone());
        }
        state.sessions_created += 1;
        Ok(Box::new(ScriptedSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedSession {
    state: Arc<Mutex<ScriptState>>,
}

#[async_trait]
impl ExchangeSession for ScriptedSession {
    async fn account_info(&self) -> Result<AccountInfo, ExchangeError> {
        let mut state = self.state.lock();
        state.account_calls += 1;
        match state.account_script.pop_front() {
            Some(result) => result,
            None => state
                .fallback_account
                .clone()
                .ok_or_else(|| ExchangeError::Decode("no scripted account response".into())),
        }
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawReceipt, ExchangeError> {
        let mut state = self.state.lock();
        state.withdrawals.push(request.clone());
        let id = format!("wd-{}", state.withdrawals.len());
        state
            .withdraw_script
            .pop_front()
            .unwrap_or(Ok(WithdrawReceipt { id }))
    }

    fn exchange_name(&self) -> &'static str {
        "scripted"
    }
}
