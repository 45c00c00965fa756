use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, AbortHandle, Abortable, Either, LocalBoxFuture};
use futures::FutureExt;
use serde::{Serialize, Deserialize};

use crate::error::SlotError;
use crate::exchange::{ExchangeForm, ExchangeKind, ExchangeRequest};
use crate::shared_slot_game::{ClaimResponse, SlotMachine, SlotTiming, SpinPhase, SpinTicket};

/// Who is playing. Supplied by the surrounding application.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct PlayerIdentity {
    pub server_id: String,
    pub account_id: String,
    pub character_id: String,
    #[serde(skip_serializing, default)]
    pub token: String,
}

/// Remote service that owns balances and decides every spin.
pub trait SlotAuthority {
    fn get_balance<'a>(&'a self, identity: &'a PlayerIdentity) -> LocalBoxFuture<'a, Result<i64, SlotError>>;

    fn claim<'a>(
        &'a self,
        identity: &'a PlayerIdentity,
        language: &'a str,
    ) -> LocalBoxFuture<'a, Result<ClaimResponse, SlotError>>;

    fn exchange<'a>(
        &'a self,
        identity: &'a PlayerIdentity,
        request: &'a ExchangeRequest,
    ) -> LocalBoxFuture<'a, Result<(), SlotError>>;
}

/// Timer source for the reel animation and the claim timeout.
pub trait Ticker {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Drives a `SlotMachine` against a `SlotAuthority` on a single-threaded
/// executor. Clones share the same state.
pub struct SlotSession<A, T> {
    machine: Rc<RefCell<SlotMachine>>,
    exchange: Rc<RefCell<ExchangeForm>>,
    authority: Rc<A>,
    ticker: Rc<T>,
    identity: Rc<PlayerIdentity>,
    language: Rc<str>,
    timing: SlotTiming,
    abort: Rc<RefCell<Option<AbortHandle>>>,
    on_change: Rc<dyn Fn()>,
}

impl<A, T> Clone for SlotSession<A, T> {
    fn clone(&self) -> Self {
        Self {
            machine: self.machine.clone(),
            exchange: self.exchange.clone(),
            authority: self.authority.clone(),
            ticker: self.ticker.clone(),
            identity: self.identity.clone(),
            language: self.language.clone(),
            timing: self.timing,
            abort: self.abort.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<A, T> PartialEq for SlotSession<A, T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.machine, &other.machine)
    }
}

impl<A, T> SlotSession<A, T>
where
    A: SlotAuthority + 'static,
    T: Ticker + 'static,
{
    pub fn new(authority: A, ticker: T, identity: PlayerIdentity, language: &str) -> Self {
        Self {
            machine: Rc::new(RefCell::new(SlotMachine::default())),
            exchange: Rc::new(RefCell::new(ExchangeForm::default())),
            authority: Rc::new(authority),
            ticker: Rc::new(ticker),
            identity: Rc::new(identity),
            language: Rc::from(language),
            timing: SlotTiming::default(),
            abort: Rc::new(RefCell::new(None)),
            on_change: Rc::new(|| ()),
        }
    }

    pub fn with_timing(mut self, timing: SlotTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Called after every state change so a view can re-render.
    pub fn on_change(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_change = Rc::new(callback);
        self
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn snapshot(&self) -> SlotMachine {
        self.machine.borrow().clone()
    }

    pub fn exchange_form(&self) -> ExchangeForm {
        self.exchange.borrow().clone()
    }

    pub fn phase(&self) -> SpinPhase {
        self.machine.borrow().phase()
    }

    fn notify(&self) {
        (self.on_change)();
    }

    /// Fetches the authoritative balance. On failure the last known value stays.
    pub async fn load_balance(&self) -> Result<i64, SlotError> {
        match self.authority.get_balance(&self.identity).await {
            Ok(credits) => {
                self.machine.borrow_mut().set_balance(credits);
                self.notify();
                Ok(credits)
            }
            Err(err) => {
                log::warn!("Failed to refresh balance: {}", err);
                Err(err)
            }
        }
    }

    /// Starts a spin if the guard allows it and returns the future that runs
    /// the cycle to completion. Rejected spins return `None` and change nothing.
    pub fn spin(&self) -> Option<LocalBoxFuture<'static, SpinPhase>> {
        let ticket = self.machine.borrow_mut().spin(&mut rand::thread_rng())?;
        log::info!("Spin {:?} started", ticket);
        self.notify();

        let (handle, registration) = AbortHandle::new_pair();
        if let Some(stale) = self.abort.borrow_mut().replace(handle) {
            stale.abort();
        }

        let session = self.clone();
        let cycle = Abortable::new(self.clone().run_cycle(ticket), registration);
        Some(
            async move {
                match cycle.await {
                    Ok(phase) => {
                        session.abort.borrow_mut().take();
                        phase
                    }
                    Err(_) => {
                        log::info!("Spin {:?} cancelled", ticket);
                        session.phase()
                    }
                }
            }
            .boxed_local(),
        )
    }

    async fn run_cycle(self, ticket: SpinTicket) -> SpinPhase {
        for _ in 0..self.timing.tick_count() {
            self.ticker.sleep(self.timing.tick_interval()).await;
            self.machine.borrow_mut().tick(ticket, &mut rand::thread_rng());
            self.notify();
        }

        if !self.machine.borrow_mut().settle(ticket) {
            return self.phase();
        }
        self.notify();

        let outcome = self.claim_with_timeout().await;
        match &outcome {
            Ok(response) => log::info!("Spin {:?} resolved, winner: {}", ticket, response.winner),
            Err(err) => log::error!("Spin {:?} claim failed: {}", ticket, err),
        }

        let phase = self.machine.borrow_mut().resolve(ticket, outcome, &mut rand::thread_rng());
        self.notify();
        phase
    }

    async fn claim_with_timeout(&self) -> Result<ClaimResponse, SlotError> {
        let timeout_ms = self.timing.claim_timeout_ms;
        let claim = self.authority.claim(&self.identity, &self.language);
        let timeout = self.ticker.sleep(timeout_ms);

        match future::select(claim, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(SlotError::Timeout(timeout_ms)),
        }
    }

    pub fn close_modal(&self) {
        self.machine.borrow_mut().close_modal();
        self.notify();
    }

    /// Aborts an in-flight spin, e.g. when the view goes away.
    pub fn cancel(&self) {
        if let Some(handle) = self.abort.borrow_mut().take() {
            handle.abort();
        }
        self.machine.borrow_mut().cancel();
        self.notify();
    }

    pub fn open_exchange(&self, kind: ExchangeKind) {
        self.exchange.borrow_mut().open(kind);
        self.notify();
    }

    pub fn close_exchange(&self) {
        self.exchange.borrow_mut().close();
        self.notify();
    }

    pub fn set_exchange_kind(&self, kind: ExchangeKind) {
        self.exchange.borrow_mut().set_kind(kind);
        self.notify();
    }

    pub fn set_exchange_amount(&self, raw: String) {
        self.exchange.borrow_mut().set_amount(raw);
        self.notify();
    }

    /// Validates locally, sends the exchange, then refreshes the balance from
    /// the authority instead of adding the credits locally. A second call
    /// while one is in flight returns `SlotError::Busy` without sending.
    /// If the modal was closed in the meantime the result leaves the form alone.
    pub async fn submit_exchange(&self) -> Result<(), SlotError> {
        let prepared = self.exchange.borrow_mut().prepare();
        if let Err(SlotError::Busy) = prepared {
            log::debug!("Exchange already in flight, ignoring submit");
            return Err(SlotError::Busy);
        }
        self.notify();
        let (ticket, request) = prepared?;

        match self.authority.exchange(&self.identity, &request).await {
            Ok(()) => {
                log::info!("Exchanged {} {:?} for {} credits", request.amount, request.kind, request.credits);
                self.load_balance().await.ok();
                if !self.exchange.borrow_mut().succeed(ticket) {
                    log::debug!("Exchange form reopened before the result arrived");
                }
                self.notify();
                Ok(())
            }
            Err(err) => {
                log::warn!("Exchange failed: {}", err);
                if !self.exchange.borrow_mut().fail(ticket, err.user_message()) {
                    log::debug!("Exchange form reopened before the result arrived");
                }
                self.notify();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    use crate::constants::{INVALID_AMOUNT_ERROR, LOSS_MESSAGE, TIMEOUT_ERROR};
    use crate::shared_slot_game::{all_same, OutcomeKind, RewardDescriptor};

    enum ClaimScript {
        Respond(Result<ClaimResponse, SlotError>),
        Hang,
    }

    struct MockAuthority {
        balance: Cell<i64>,
        balance_fails: Cell<bool>,
        claim: RefCell<ClaimScript>,
        claim_calls: Cell<u32>,
        exchange_error: RefCell<Option<SlotError>>,
        exchange_hold: RefCell<Option<oneshot::Receiver<()>>>,
        exchanges: RefCell<Vec<ExchangeRequest>>,
    }

    impl MockAuthority {
        fn new(balance: i64, claim: ClaimScript) -> Self {
            Self {
                balance: Cell::new(balance),
                balance_fails: Cell::new(false),
                claim: RefCell::new(claim),
                claim_calls: Cell::new(0),
                exchange_error: RefCell::new(None),
                exchange_hold: RefCell::new(None),
                exchanges: RefCell::new(Vec::new()),
            }
        }
    }

    impl SlotAuthority for MockAuthority {
        fn get_balance<'a>(&'a self, _identity: &'a PlayerIdentity) -> LocalBoxFuture<'a, Result<i64, SlotError>> {
            let result = if self.balance_fails.get() {
                Err(SlotError::Network("offline".to_string()))
            } else {
                Ok(self.balance.get())
            };
            future::ready(result).boxed_local()
        }

        fn claim<'a>(
            &'a self,
            _identity: &'a PlayerIdentity,
            language: &'a str,
        ) -> LocalBoxFuture<'a, Result<ClaimResponse, SlotError>> {
            assert_eq!(language, "en");
            self.claim_calls.set(self.claim_calls.get() + 1);
            match &*self.claim.borrow() {
                ClaimScript::Respond(result) => future::ready(result.clone()).boxed_local(),
                ClaimScript::Hang => future::pending().boxed_local(),
            }
        }

        fn exchange<'a>(
            &'a self,
            _identity: &'a PlayerIdentity,
            request: &'a ExchangeRequest,
        ) -> LocalBoxFuture<'a, Result<(), SlotError>> {
            self.exchanges.borrow_mut().push(request.clone());
            let hold = self.exchange_hold.borrow_mut().take();
            async move {
                if let Some(release) = hold {
                    release.await.ok();
                }
                match self.exchange_error.borrow().clone() {
                    Some(err) => Err(err),
                    None => {
                        self.balance.set(self.balance.get() + request.credits as i64);
                        Ok(())
                    }
                }
            }
            .boxed_local()
        }
    }

    struct InstantTicker;

    impl Ticker for InstantTicker {
        fn sleep(&self, _ms: u32) -> LocalBoxFuture<'static, ()> {
            future::ready(()).boxed_local()
        }
    }

    struct FrozenTicker;

    impl Ticker for FrozenTicker {
        fn sleep(&self, _ms: u32) -> LocalBoxFuture<'static, ()> {
            future::pending().boxed_local()
        }
    }

    fn identity() -> PlayerIdentity {
        PlayerIdentity {
            server_id: "1".to_string(),
            account_id: "42".to_string(),
            character_id: "7".to_string(),
            token: "token".to_string(),
        }
    }

    fn session<T: Ticker + 'static>(authority: MockAuthority, ticker: T) -> SlotSession<MockAuthority, T> {
        let session = SlotSession::new(authority, ticker, identity(), "en");
        block_on(session.load_balance()).unwrap();
        session
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
    fn test_loss_cycle() {
        let session = session(MockAuthority::new(5, ClaimScript::Respond(Ok(ClaimResponse::loss()))), InstantTicker);
        let cycle = session.spin().expect("spin should start");

        let state = session.snapshot();
        assert_eq!(state.balance, 4);
        assert!(state.spinning);

        assert_eq!(block_on(cycle), SpinPhase::Idle);
        let state = session.snapshot();
        assert!(!all_same(&state.symbols));
        assert_eq!(state.last_outcome.unwrap().message, LOSS_MESSAGE);
        assert!(!state.spinning);
        assert!(!state.armed);
        assert_eq!(session.authority().claim_calls.get(), 1);
    }

    #[test]
    fn test_win_cycle() {
        let reward = sword();
        let session = session(
            MockAuthority::new(3, ClaimScript::Respond(Ok(ClaimResponse::win(reward.clone())))),
            InstantTicker,
        );
        let cycle = session.spin().unwrap();
        assert_eq!(session.snapshot().balance, 2);

        assert_eq!(block_on(cycle), SpinPhase::WinDialogOpen);
        let state = session.snapshot();
        assert_eq!(state.pending_reward, Some(reward));
        assert!(all_same(&state.symbols));
        assert!(state.symbols[0].is_winning());

        session.close_modal();
        assert_eq!(session.phase(), SpinPhase::Idle);
        assert!(session.snapshot().pending_reward.is_none());
    }

    #[test]
    fn test_second_spin_is_dropped() {
        let session = session(MockAuthority::new(5, ClaimScript::Respond(Ok(ClaimResponse::loss()))), InstantTicker);
        let first = session.spin().unwrap();
        assert!(session.spin().is_none());
        assert_eq!(session.snapshot().balance, 4);

        block_on(first);
        assert_eq!(session.authority().claim_calls.get(), 1);
        assert_eq!(session.snapshot().balance, 4);
    }

    #[test]
    fn test_hung_claim_times_out() {
        let session = session(MockAuthority::new(2, ClaimScript::Hang), InstantTicker);
        let cycle = session.spin().unwrap();

        assert_eq!(block_on(cycle), SpinPhase::Idle);
        let state = session.snapshot();
        let outcome = state.last_outcome.unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert_eq!(outcome.message, TIMEOUT_ERROR);
        assert!(!state.spinning);
        assert_eq!(state.balance, 1);
    }

    #[test]
    fn test_claim_error_is_not_refunded() {
        let session = session(
            MockAuthority::new(2, ClaimScript::Respond(Err(SlotError::Network("reset".to_string())))),
            InstantTicker,
        );
        block_on(session.spin().unwrap());
        let state = session.snapshot();
        assert_eq!(state.balance, 1);
        assert_eq!(state.last_outcome.unwrap().kind, OutcomeKind::Error);
    }

    #[test]
    fn test_cancel_mid_spin() {
        let session = session(MockAuthority::new(4, ClaimScript::Respond(Ok(ClaimResponse::loss()))), FrozenTicker);
        let finished = Rc::new(Cell::new(None));

        let mut pool = LocalPool::new();
        {
            let finished = finished.clone();
            let cycle = session.spin().unwrap();
            pool.spawner()
                .spawn_local(async move { finished.set(Some(cycle.await)) })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(finished.get().is_none());
        assert!(session.snapshot().spinning);

        session.cancel();
        pool.run_until_stalled();
        assert_eq!(finished.get(), Some(SpinPhase::Idle));
        assert!(!session.snapshot().spinning);
        assert_eq!(session.authority().claim_calls.get(), 0);
        assert!(session.spin().is_some());
    }

    #[test]
    fn test_exchange_rejects_bad_amount_without_network() {
        let session = session(MockAuthority::new(0, ClaimScript::Hang), InstantTicker);
        session.open_exchange(ExchangeKind::Gold);

        for raw in ["-5", "0", "NaN", ""] {
            session.set_exchange_amount(raw.to_string());
            let result = block_on(session.submit_exchange());
            assert!(matches!(result, Err(SlotError::InvalidAmount(_))));
            assert_eq!(session.exchange_form().field_error.as_deref(), Some(INVALID_AMOUNT_ERROR));
        }
        assert!(session.authority().exchanges.borrow().is_empty());
    }

    #[test]
    fn test_exchange_refreshes_balance() {
        let session = session(MockAuthority::new(1, ClaimScript::Hang), InstantTicker);
        session.open_exchange(ExchangeKind::Gold);
        session.set_exchange_amount("3000".to_string());

        block_on(session.submit_exchange()).unwrap();
        assert_eq!(session.snapshot().balance, 4);
        assert!(!session.exchange_form().open);
        assert_eq!(session.authority().exchanges.borrow()[0].credits, 3.0);
    }

    #[test]
    fn test_exchange_failure_keeps_modal_open() {
        let authority = MockAuthority::new(1, ClaimScript::Hang);
        *authority.exchange_error.borrow_mut() = Some(SlotError::Authority {
            status: 400,
            message: "Not enough voting points".to_string(),
        });
        let session = session(authority, InstantTicker);
        session.open_exchange(ExchangeKind::Voting);
        session.set_exchange_amount("10".to_string());

        assert!(block_on(session.submit_exchange()).is_err());
        let form = session.exchange_form();
        assert!(form.open);
        assert_eq!(form.submit_error.as_deref(), Some("Not enough voting points"));
        assert_eq!(session.snapshot().balance, 1);
    }

    #[test]
    fn test_balance_failure_keeps_last_value() {
        let session = session(MockAuthority::new(9, ClaimScript::Hang), InstantTicker);
        session.authority().balance_fails.set(true);
        assert!(block_on(session.load_balance()).is_err());
        assert_eq!(session.snapshot().balance, 9);
    }

    #[test]
    fn test_changes_are_notified() {
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        let session = SlotSession::new(
            MockAuthority::new(2, ClaimScript::Respond(Ok(ClaimResponse::loss()))),
            InstantTicker,
            identity(),
            "en",
        )
        .with_timing(SlotTiming { spin_duration_ms: 300, tick_ms: 100, claim_timeout_ms: 50 })
        .on_change(move || counter.set(counter.get() + 1));

        block_on(session.load_balance()).unwrap();
        block_on(session.spin().unwrap());
        // balance, start, 3 ticks, settle, resolve
        assert_eq!(renders.get(), 7);
    }

    #[test]
    fn test_exchange_submitted_once_while_in_flight() {
        let authority = MockAuthority::new(0, ClaimScript::Hang);
        let (release, hold) = oneshot::channel();
        *authority.exchange_hold.borrow_mut() = Some(hold);
        let session = session(authority, InstantTicker);
        session.open_exchange(ExchangeKind::Gold);
        session.set_exchange_amount("5000".to_string());

        let results = Rc::new(RefCell::new(Vec::new()));
        let mut pool = LocalPool::new();
        for _ in 0..2 {
            let session = session.clone();
            let results = results.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = session.submit_exchange().await;
                    results.borrow_mut().push(result)
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(*results.borrow(), vec![Err::<(), _>(SlotError::Busy)]);
        assert!(session.exchange_form().submitting);

        release.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(*results.borrow(), vec![Err(SlotError::Busy), Ok(())]);
        assert_eq!(session.authority().exchanges.borrow().len(), 1);
        assert_eq!(session.snapshot().balance, 5);
        assert!(!session.exchange_form().open);
    }

    #[test]
    fn test_reopened_exchange_ignores_earlier_result() {
        for error in [None, Some(SlotError::Authority { status: 400, message: "Not enough gold".to_string() })] {
            let authority = MockAuthority::new(1, ClaimScript::Hang);
            let (release, hold) = oneshot::channel();
            *authority.exchange_hold.borrow_mut() = Some(hold);
            *authority.exchange_error.borrow_mut() = error;
            let session = session(authority, InstantTicker);
            session.open_exchange(ExchangeKind::Gold);
            session.set_exchange_amount("1000".to_string());

            let mut pool = LocalPool::new();
            {
                let session = session.clone();
                pool.spawner()
                    .spawn_local(async move {
                        session.submit_exchange().await.ok();
                    })
                    .unwrap();
            }
            pool.run_until_stalled();

            session.close_exchange();
            session.open_exchange(ExchangeKind::Voting);
            session.set_exchange_amount("7".to_string());

            release.send(()).unwrap();
            pool.run_until_stalled();

            let form = session.exchange_form();
            assert!(form.open);
            assert_eq!(form.kind, ExchangeKind::Voting);
            assert_eq!(form.amount_input, "7");
            assert!(form.submit_error.is_none());
            assert!(!form.submitting);
        }
    }
}
