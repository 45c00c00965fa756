use serde::{Serialize, Deserialize};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{LOSS_MESSAGE, WIN_MESSAGE};
use crate::error::SlotError;

/// Cost in credits of a single spin
pub const SPIN_COST: i64 = 1;

// Constants for frontend animation
pub const SPIN_DURATION_MS: u32 = 2000;  // Total length of the reel animation
pub const SPIN_TICK_MS: u32 = 100;       // Reels re-randomize on every tick
pub const CLAIM_TIMEOUT_MS: u32 = 10_000;
pub const REEL_COUNT: usize = 3;

/// Faces that can appear on a reel
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Lemon,
    Grape,
    Bell,
    Diamond,
    Seven,
    Crown,
}

impl Symbol {
    pub const ALL: [Symbol; 7] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Grape,
        Symbol::Bell,
        Symbol::Diamond,
        Symbol::Seven,
        Symbol::Crown,
    ];

    /// Symbols shown as a matching triple when the authority reports a win.
    pub const WINNING: [Symbol; 3] = [Symbol::Diamond, Symbol::Seven, Symbol::Crown];

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Grape => "🍇",
            Symbol::Bell => "🔔",
            Symbol::Diamond => "💎",
            Symbol::Seven => "7️⃣",
            Symbol::Crown => "👑",
        }
    }

    pub fn is_winning(self) -> bool {
        Symbol::WINNING.contains(&self)
    }
}

pub type Reels = [Symbol; REEL_COUNT];

/// Reward payload from the claim authority, displayed verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RewardDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: Option<String>,
}

// === API Types ===

/// Gold exchanges can leave fractional credits on the server side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BalanceResponse {
    pub credits: f64,
}

impl BalanceResponse {
    /// Spins cost whole credits, so a fractional remainder is floored away.
    pub fn whole_credits(&self) -> i64 {
        self.credits.floor() as i64
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClaimRequest {
    pub server_id: String,
    pub account_id: String,
    pub character_id: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ClaimResponse {
    pub winner: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: Option<String>,
}

impl ClaimResponse {
    pub fn loss() -> Self {
        Self::default()
    }

    pub fn win(reward: RewardDescriptor) -> Self {
        Self {
            winner: true,
            name: Some(reward.name),
            kind: Some(reward.kind),
            message: Some(reward.message),
            logo_url: reward.logo_url,
        }
    }

    /// The reward carried by a winning response.
    pub fn reward(&self) -> Option<RewardDescriptor> {
        if !self.winner {
            return None;
        }
        Some(RewardDescriptor {
            name: self.name.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            logo_url: self.logo_url.clone(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settling,
    WinDialogOpen,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Win,
    Loss,
    Error,
}

/// Result text shown once the reels settle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub kind: OutcomeKind,
    pub message: String,
}

/// Identifies one spin cycle. Results carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTicket(u64);

/// Timing knobs for the reel animation and the claim call.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SlotTiming {
    pub spin_duration_ms: u32,
    pub tick_ms: u32,
    pub claim_timeout_ms: u32,
}

impl Default for SlotTiming {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            tick_ms: SPIN_TICK_MS,
            claim_timeout_ms: CLAIM_TIMEOUT_MS,
        }
    }
}

impl SlotTiming {
    /// Tick length in ms, never zero.
    pub fn tick_interval(&self) -> u32 {
        self.tick_ms.max(1)
    }

    pub fn tick_count(&self) -> u32 {
        self.spin_duration_ms / self.tick_interval()
    }
}

/// Client-side state of the slot machine. Outcomes are decided by the
/// claim authority; this only renders them.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMachine {
    pub symbols: Reels,
    pub spinning: bool,
    pub armed: bool,
    pub balance: i64,
    pub last_outcome: Option<SpinOutcome>,
    pub pending_reward: Option<RewardDescriptor>,
    phase: SpinPhase,
    spin_id: u64,
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SlotMachine {
    pub fn new(balance: i64) -> Self {
        Self {
            symbols: [Symbol::Cherry, Symbol::Bell, Symbol::Seven],
            spinning: false,
            armed: false,
            balance,
            last_outcome: None,
            pending_reward: None,
            phase: SpinPhase::Idle,
            spin_id: 0,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn can_spin(&self) -> bool {
        !self.spinning && self.phase == SpinPhase::Idle && self.balance >= SPIN_COST
    }

    pub fn set_balance(&mut self, credits: i64) {
        self.balance = credits;
    }

    /// Starts a spin. Returns `None` without touching any state when a spin
    /// is already in flight or the balance cannot cover the cost.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SpinTicket> {
        if !self.can_spin() {
            return None;
        }

        self.spin_id += 1;
        self.spinning = true;
        self.armed = true;
        self.balance -= SPIN_COST;
        self.last_outcome = None;
        self.phase = SpinPhase::Spinning;
        self.symbols = random_reels(rng);
        Some(SpinTicket(self.spin_id))
    }

    fn is_current(&self, ticket: SpinTicket) -> bool {
        ticket.0 == self.spin_id
    }

    /// Cosmetic re-roll during the animation.
    pub fn tick<R: Rng + ?Sized>(&mut self, ticket: SpinTicket, rng: &mut R) {
        if self.is_current(ticket) && self.phase == SpinPhase::Spinning {
            self.symbols = random_reels(rng);
        }
    }

    /// Animation timer expired; the claim may now be sent.
    pub fn settle(&mut self, ticket: SpinTicket) -> bool {
        if !self.is_current(ticket) || self.phase != SpinPhase::Spinning {
            return false;
        }
        self.phase = SpinPhase::Settling;
        true
    }

    /// Applies the authority's answer. The displayed triple is a second,
    /// independent draw and never feeds back into the outcome.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        ticket: SpinTicket,
        outcome: Result<ClaimResponse, SlotError>,
        rng: &mut R,
    ) -> SpinPhase {
        if !self.is_current(ticket) || self.phase != SpinPhase::Settling {
            log::debug!("Ignoring claim result for stale spin {:?}", ticket);
            return self.phase;
        }

        self.spinning = false;
        self.armed = false;

        match outcome {
            Ok(response) => match response.reward() {
                Some(reward) => {
                    self.symbols = winning_reels(rng);
                    self.last_outcome = Some(SpinOutcome {
                        kind: OutcomeKind::Win,
                        message: WIN_MESSAGE.to_string(),
                    });
                    self.pending_reward = Some(reward);
                    self.phase = SpinPhase::WinDialogOpen;
                }
                None => {
                    self.symbols = losing_reels(rng);
                    self.last_outcome = Some(SpinOutcome {
                        kind: OutcomeKind::Loss,
                        message: LOSS_MESSAGE.to_string(),
                    });
                    self.phase = SpinPhase::Idle;
                }
            },
            Err(err) => {
                // Cost stays debited; the authority owns the real balance.
                log::warn!("Claim failed: {}", err);
                self.last_outcome = Some(SpinOutcome {
                    kind: OutcomeKind::Error,
                    message: err.user_message(),
                });
                self.phase = SpinPhase::Idle;
            }
        }

        self.phase
    }

    pub fn close_modal(&mut self) {
        if self.phase == SpinPhase::WinDialogOpen {
            self.pending_reward = None;
            self.phase = SpinPhase::Idle;
        }
    }

    /// Abandons the current cycle. Any result still in flight is ignored.
    pub fn cancel(&mut self) {
        if !self.spinning {
            return;
        }
        self.spin_id += 1;
        self.spinning = false;
        self.armed = false;
        self.phase = SpinPhase::Idle;
    }
}

pub fn random_reels<R: Rng + ?Sized>(rng: &mut R) -> Reels {
    [random_symbol(rng), random_symbol(rng), random_symbol(rng)]
}

fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> Symbol {
    *Symbol::ALL.choose(rng).unwrap_or(&Symbol::Cherry)
}

/// One winning symbol repeated on every reel.
pub fn winning_reels<R: Rng + ?Sized>(rng: &mut R) -> Reels {
    let symbol = *Symbol::WINNING.choose(rng).unwrap_or(&Symbol::Seven);
    [symbol; REEL_COUNT]
}

/// Random reels that never line up, so a loss cannot look like a win.
pub fn losing_reels<R: Rng + ?Sized>(rng: &mut R) -> Reels {
    loop {
        let reels = random_reels(rng);
        if !all_same(&reels) {
            return reels;
        }
    }
}

pub fn all_same(reels: &Reels) -> bool {
    reels.iter().all(|s| *s == reels[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn sword() -> RewardDescriptor {
        RewardDescriptor {
            name: "Sword of Ages".to_string(),
            kind: "Weapon".to_string(),
            message: "Congrats".to_string(),
            logo_url: None,
        }
    }

    #[test]
    fn test_spin_is_not_reentrant() {
        let mut rng = rng();
        let mut machine = SlotMachine::new(5);
        assert!(machine.spin(&mut rng).is_some());
        let snapshot = machine.clone();

        assert!(machine.spin(&mut rng).is_none());
        assert_eq!(machine, snapshot);
        assert_eq!(machine.balance, 4);
    }

    #[test]
    fn test_insufficient_balance_is_noop() {
        let mut rng = rng();
        for balance in [-3, 0] {
            let mut machine = SlotMachine::new(balance);
            assert!(machine.spin(&mut rng).is_none());
            assert!(!machine.spinning);
            assert_eq!(machine.balance, balance);
            assert_eq!(machine.phase(), SpinPhase::Idle);
        }
    }

    #[test]
    fn test_loss_never_lines_up() {
        let mut rng = rng();
        for _ in 0..500 {
            let mut machine = SlotMachine::new(1);
            let ticket = machine.spin(&mut rng).unwrap();
            assert!(machine.settle(ticket));
            machine.resolve(ticket, Ok(ClaimResponse::loss()), &mut rng);
            assert!(!all_same(&machine.symbols));
        }
    }

    #[test]
    fn test_loss_scenario() {
        let mut rng = rng();
        let mut machine = SlotMachine::new(5);
        let ticket = machine.spin(&mut rng).unwrap();
        assert_eq!(machine.balance, 4);
        assert!(machine.spinning && machine.armed);

        for _ in 0..SlotTiming::default().tick_count() {
            machine.tick(ticket, &mut rng);
        }
        assert!(machine.settle(ticket));
        let phase = machine.resolve(ticket, Ok(ClaimResponse::loss()), &mut rng);

        assert_eq!(phase, SpinPhase::Idle);
        assert!(!all_same(&machine.symbols));
        assert_eq!(machine.last_outcome.as_ref().unwrap().message, LOSS_MESSAGE);
        assert!(!machine.spinning);
        assert!(!machine.armed);
        assert!(machine.pending_reward.is_none());
    }

    #[test]
    fn test_win_scenario() {
        let mut rng = rng();
        let mut machine = SlotMachine::new(3);
        let ticket = machine.spin(&mut rng).unwrap();
        assert_eq!(machine.balance, 2);
        machine.settle(ticket);

        let phase = machine.resolve(ticket, Ok(ClaimResponse::win(sword())), &mut rng);
        assert_eq!(phase, SpinPhase::WinDialogOpen);
        assert_eq!(machine.pending_reward, Some(sword()));
        assert!(all_same(&machine.symbols));
        assert!(machine.symbols[0].is_winning());
        assert_eq!(machine.last_outcome.as_ref().unwrap().kind, OutcomeKind::Win);

        // No new spin until the dialog is dismissed
        assert!(machine.spin(&mut rng).is_none());
        machine.close_modal();
        assert_eq!(machine.phase(), SpinPhase::Idle);
        assert!(machine.pending_reward.is_none());
        assert!(machine.spin(&mut rng).is_some());
    }

    #[test]
    fn test_claim_failure_keeps_cost() {
        let mut rng = rng();
        let mut machine = SlotMachine::new(2);
        let ticket = machine.spin(&mut rng).unwrap();
        machine.settle(ticket);
        let phase = machine.resolve(ticket, Err(SlotError::Network("offline".into())), &mut rng);

        assert_eq!(phase, SpinPhase::Idle);
        assert_eq!(machine.balance, 1);
        assert_eq!(machine.last_outcome.as_ref().unwrap().kind, OutcomeKind::Error);
        assert!(!machine.armed);
    }

    #[test]
    fn test_cancel_drops_late_result() {
        let mut rng = rng();
        let mut machine = SlotMachine::new(2);
        let ticket = machine.spin(&mut rng).unwrap();
        machine.settle(ticket);
        machine.cancel();
        assert_eq!(machine.phase(), SpinPhase::Idle);

        machine.resolve(ticket, Ok(ClaimResponse::win(sword())), &mut rng);
        assert!(machine.pending_reward.is_none());
        assert!(machine.last_outcome.is_none());
    }

    #[test]
    fn test_claim_response_wire_format() {
        let body = r#"{"winner":true,"name":"Sword of Ages","type":"Weapon","message":"Congrats"}"#;
        let response: ClaimResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.reward(), Some(sword()));

        let loss: ClaimResponse = serde_json::from_str(r#"{"winner":false}"#).unwrap();
        assert_eq!(loss.reward(), None);
    }

    #[test]
    fn test_balance_accepts_fractional_credits() {
        for (body, credits) in [(r#"{"credits":2.5}"#, 2), (r#"{"credits":4.0}"#, 4), (r#"{"credits":7}"#, 7)] {
            let response: BalanceResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.whole_credits(), credits);
        }
    }

    #[test]
    fn test_zero_tick_still_animates() {
        let timing = SlotTiming { spin_duration_ms: 300, tick_ms: 0, claim_timeout_ms: 50 };
        assert_eq!(timing.tick_interval(), 1);
        assert_eq!(timing.tick_count(), 300);
        assert_eq!(SlotTiming::default().tick_count(), 20);
    }
}
