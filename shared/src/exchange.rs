use serde::{Serialize, Deserialize};

use crate::constants::INVALID_AMOUNT_ERROR;
use crate::error::SlotError;

/// External currencies that can be converted into credits
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    Voting,
    Gold,
}

impl ExchangeKind {
    pub const ALL: [ExchangeKind; 2] = [ExchangeKind::Voting, ExchangeKind::Gold];

    pub fn label(self) -> &'static str {
        match self {
            ExchangeKind::Voting => "Voting points",
            ExchangeKind::Gold => "Gold",
        }
    }

    pub fn rate(self) -> &'static ExchangeRate {
        match self {
            ExchangeKind::Voting => &EXCHANGE_RATES[0],
            ExchangeKind::Gold => &EXCHANGE_RATES[1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDirection {
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    pub kind: ExchangeKind,
    pub factor: f64,
    pub direction: RateDirection,
}

/// Voting points convert 1:1, gold converts 1000:1.
pub const EXCHANGE_RATES: [ExchangeRate; 2] = [
    ExchangeRate { kind: ExchangeKind::Voting, factor: 1.0, direction: RateDirection::Multiply },
    ExchangeRate { kind: ExchangeKind::Gold, factor: 1000.0, direction: RateDirection::Divide },
];

impl ExchangeRate {
    /// No rounding: 500 gold is 0.5 credits.
    pub fn credits_for(&self, amount: f64) -> f64 {
        match self.direction {
            RateDirection::Multiply => amount * self.factor,
            RateDirection::Divide => amount / self.factor,
        }
    }
}

pub fn validate_amount(amount: f64) -> Result<f64, SlotError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(SlotError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Parses raw form input into a positive, finite amount.
pub fn parse_amount(raw: &str) -> Result<f64, SlotError> {
    let trimmed = raw.trim();
    let amount = trimmed
        .parse::<f64>()
        .map_err(|_| SlotError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(amount)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExchangeRequest {
    pub kind: ExchangeKind,
    pub amount: f64,
    pub credits: f64,
}

impl ExchangeRequest {
    pub fn new(kind: ExchangeKind, amount: f64) -> Result<Self, SlotError> {
        let amount = validate_amount(amount)?;
        Ok(Self {
            kind,
            amount,
            credits: kind.rate().credits_for(amount),
        })
    }
}

/// Identifies one opening of the exchange modal. A result carrying an older
/// ticket belongs to a form the player already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeTicket(u64);

/// State behind the exchange modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeForm {
    pub open: bool,
    pub kind: ExchangeKind,
    pub amount_input: String,
    pub field_error: Option<String>,
    pub submit_error: Option<String>,
    pub submitting: bool,
    generation: u64,
}

impl Default for ExchangeForm {
    fn default() -> Self {
        Self {
            open: false,
            kind: ExchangeKind::Voting,
            amount_input: String::new(),
            field_error: None,
            submit_error: None,
            submitting: false,
            generation: 0,
        }
    }
}

impl ExchangeForm {
    fn reset(&mut self, open: bool, kind: ExchangeKind) {
        *self = Self {
            open,
            kind,
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub fn open(&mut self, kind: ExchangeKind) {
        self.reset(true, kind);
    }

    pub fn close(&mut self) {
        self.reset(false, ExchangeKind::Voting);
    }

    pub fn set_kind(&mut self, kind: ExchangeKind) {
        self.kind = kind;
        self.field_error = None;
    }

    pub fn set_amount(&mut self, raw: impl Into<String>) {
        self.amount_input = raw.into();
        self.field_error = None;
    }

    /// Credits the current input would buy, if it parses.
    pub fn preview_credits(&self) -> Option<f64> {
        parse_amount(&self.amount_input)
            .ok()
            .map(|amount| self.kind.rate().credits_for(amount))
    }

    /// Validates the input. On failure the field error is set and nothing
    /// should be sent. While a submit is in flight every call is rejected
    /// with `SlotError::Busy` and the form is left untouched.
    pub fn prepare(&mut self) -> Result<(ExchangeTicket, ExchangeRequest), SlotError> {
        if self.submitting {
            return Err(SlotError::Busy);
        }

        self.submit_error = None;
        match parse_amount(&self.amount_input).and_then(|amount| ExchangeRequest::new(self.kind, amount)) {
            Ok(request) => {
                self.field_error = None;
                self.submitting = true;
                Ok((ExchangeTicket(self.generation), request))
            }
            Err(err) => {
                self.field_error = Some(INVALID_AMOUNT_ERROR.to_string());
                Err(err)
            }
        }
    }

    fn is_current(&self, ticket: ExchangeTicket) -> bool {
        self.generation == ticket.0
    }

    /// Returns false when the ticket is stale and the form was left alone.
    pub fn fail(&mut self, ticket: ExchangeTicket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.submitting = false;
        self.submit_error = Some(message);
        true
    }

    /// Returns false when the ticket is stale and the form was left alone.
    pub fn succeed(&mut self, ticket: ExchangeTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.close();
        true
    }
}
