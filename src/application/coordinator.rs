//! TicketCallCoordinator - Owner of the current-serving state machine.
//!
//! One coordinator per counter session. All four mutation paths - a
//! successful call-next, a successful status update, and the bridge's
//! ticket-called / status-changed / ticket-completed events - commit
//! through the session lock, so the direct-action path and the push path
//! can never interleave half-applied updates. Snapshot storage is written
//! inside the same critical section as the in-memory commit: whatever
//! ordering the paths race into, memory and the persisted slot always
//! land on the same record.
//!
//! Call state: `Idle -> Calling -> Serving -> Idle`. A failure at any
//! sub-step of `Calling` returns to the prior state; the externally
//! visible ticket is only ever fully populated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::foundation::{CounterId, DomainError, TicketNumber};
use crate::domain::queue::{QueueStatus, ServiceGroupSelection};
use crate::domain::realtime::QueueEvent;
use crate::domain::serving::{CurrentServingTicket, ServingSession, TicketStatus};
use crate::ports::{
    BackendError, Notifier, NotifyKind, QueueBackend, QueueEventHandler, ServingStorage,
    ServingStorageError,
};

/// Errors surfaced to the caller by coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// No service group is selected; no network call was made.
    #[error("No queue selected")]
    NoQueueSelected,

    /// Another call-next is in flight for this counter session.
    #[error("A call is already in progress")]
    CallInProgress,

    /// The given ticket is not the one currently being served.
    #[error("Ticket {0} is not the current serving ticket")]
    TicketNotCurrent(TicketNumber),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Storage(#[from] ServingStorageError),
}

impl CoordinatorError {
    /// True for the distinguishable "nothing is waiting" rejection.
    pub fn is_empty_queue(&self) -> bool {
        matches!(
            self,
            CoordinatorError::Backend(BackendError::EmptyQueue { .. })
        )
    }
}

/// Result of a successful call-next.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    /// The fully populated ticket now being served.
    pub ticket: CurrentServingTicket,

    /// Refreshed queue metrics, when the best-effort refresh succeeded.
    pub queue_status: Option<QueueStatus>,
}

/// RAII guard for the single-in-flight rule.
///
/// Released on drop, so a cancelled call-next future cannot leave the
/// coordinator permanently rejecting calls.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Coordinator for one counter session's queue-calling workflow.
pub struct TicketCallCoordinator {
    backend: Arc<dyn QueueBackend>,
    storage: Arc<dyn ServingStorage>,
    notifier: Arc<dyn Notifier>,
    counter: CounterId,
    session: Mutex<ServingSession>,
    call_in_flight: Arc<AtomicBool>,
}

impl TicketCallCoordinator {
    pub fn new(
        backend: Arc<dyn QueueBackend>,
        storage: Arc<dyn ServingStorage>,
        notifier: Arc<dyn Notifier>,
        counter: CounterId,
    ) -> Self {
        Self {
            backend,
            storage,
            notifier,
            counter,
            session: Mutex::new(ServingSession::new()),
            call_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The counter session this coordinator owns.
    pub fn counter(&self) -> CounterId {
        self.counter
    }

    /// Replace the selected service group.
    ///
    /// The current serving ticket is deliberately not cleared: a ticket
    /// called under the previous group keeps displaying until completed or
    /// explicitly cleared (carried over from the source system; see
    /// DESIGN.md).
    pub async fn set_selection(&self, selection: ServiceGroupSelection) {
        self.session.lock().await.set_selection(selection);
    }

    /// The selected service group, if any.
    pub async fn selection(&self) -> Option<ServiceGroupSelection> {
        self.session.lock().await.selection().cloned()
    }

    /// The ticket currently being served, if any.
    pub async fn current_ticket(&self) -> Option<CurrentServingTicket> {
        self.session.lock().await.current().cloned()
    }

    /// The last known queue snapshot, if any.
    pub async fn queue_status(&self) -> Option<QueueStatus> {
        self.session.lock().await.queue_status().cloned()
    }

    /// Pull the next waiting ticket from the selected group's queue.
    ///
    /// Fails fast without touching the network when no group is selected
    /// or another call is in flight. On any sub-step failure the previous
    /// serving state, in memory and on disk, is unchanged.
    pub async fn call_next(&self) -> Result<CallOutcome, CoordinatorError> {
        let group = {
            let session = self.session.lock().await;
            match session.selection() {
                Some(selection) => selection.group_id.clone(),
                None => return Err(CoordinatorError::NoQueueSelected),
            }
        };

        let _guard = InFlightGuard::acquire(&self.call_in_flight)
            .ok_or(CoordinatorError::CallInProgress)?;

        debug!(group = %group, "calling next ticket");

        let number = match self.backend.call_next(&group).await {
            Ok(number) => number,
            Err(err) => {
                self.notify_call_failure(&err);
                return Err(err.into());
            }
        };

        // The call-next response only carries the ticket number; fetch the
        // full record so the exposed ticket is never partial.
        let detail = match self.backend.ticket_detail(&number).await {
            Ok(detail) => detail,
            Err(err) => {
                self.notify_call_failure(&err);
                return Err(err.into());
            }
        };

        let ticket = CurrentServingTicket::from_detail(&detail);

        // Persist and commit under one lock hold. The write goes first: a
        // storage failure leaves both views at the prior state, and a push
        // event can only observe the session entirely before or entirely
        // after this ticket.
        {
            let mut session = self.session.lock().await;
            if let Err(err) = self.storage.save(self.counter, &ticket).await {
                self.notifier
                    .notify("Could not call the next ticket", NotifyKind::Error);
                return Err(err.into());
            }
            session.replace_current(ticket.clone());
        }

        info!(ticket = %ticket.ticket_number, "now serving");
        self.notifier.notify(
            &format!("Calling ticket {}", ticket.ticket_number),
            NotifyKind::Success,
        );

        // The pending count just changed; refresh is best-effort and never
        // fails the call.
        let queue_status = match self.backend.queue_status(&group).await {
            Ok(status) => {
                self.session.lock().await.set_queue_status(status.clone());
                Some(status)
            }
            Err(err) => {
                warn!(group = %group, error = %err, "queue status refresh failed");
                None
            }
        };

        Ok(CallOutcome {
            ticket,
            queue_status,
        })
    }

    /// Send a status change for the current serving ticket, then reconcile
    /// with the backend's authoritative record.
    ///
    /// The update acknowledgement is never trusted for other fields; the
    /// detail is re-fetched and the snapshot replaced whole. On failure the
    /// previously displayed ticket is preserved.
    pub async fn update_status(
        &self,
        ticket_number: &TicketNumber,
        new_status: TicketStatus,
    ) -> Result<CurrentServingTicket, CoordinatorError> {
        {
            let session = self.session.lock().await;
            let is_current = session
                .current()
                .map(|ticket| &ticket.ticket_number == ticket_number)
                .unwrap_or(false);
            if !is_current {
                return Err(CoordinatorError::TicketNotCurrent(ticket_number.clone()));
            }
        }

        if let Err(err) = self.backend.update_status(ticket_number, new_status).await {
            self.notify_update_failure(&err);
            return Err(err.into());
        }

        let detail = match self.backend.ticket_detail(ticket_number).await {
            Ok(detail) => detail,
            Err(err) => {
                self.notify_update_failure(&err);
                return Err(err.into());
            }
        };

        let ticket = CurrentServingTicket::from_detail(&detail);

        {
            let mut session = self.session.lock().await;
            // A push event may have replaced the ticket while the update
            // was in flight; the re-check, the storage write, and the
            // commit share one lock hold so a stale update can neither
            // touch memory nor leave an orphaned snapshot behind.
            let still_current = session
                .current()
                .map(|current| &current.ticket_number == ticket_number)
                .unwrap_or(false);
            if !still_current {
                return Err(CoordinatorError::TicketNotCurrent(ticket_number.clone()));
            }
            if let Err(err) = self.storage.save(self.counter, &ticket).await {
                self.notifier
                    .notify("Could not update ticket status", NotifyKind::Error);
                return Err(err.into());
            }
            session.replace_current(ticket.clone());
        }

        info!(ticket = %ticket.ticket_number, status = %ticket.status, "status updated");
        Ok(ticket)
    }

    /// Drop the current serving ticket from memory and storage.
    ///
    /// Used after completion or an explicit "change queue" action.
    pub async fn clear_current(&self) -> Result<(), CoordinatorError> {
        let mut session = self.session.lock().await;
        self.storage.clear(self.counter).await?;
        session.clear_current();
        Ok(())
    }

    /// Recover the persisted snapshot at startup, without any network call.
    ///
    /// Installs the snapshot as the current ticket when one exists.
    pub async fn restore(&self) -> Result<Option<CurrentServingTicket>, CoordinatorError> {
        let mut session = self.session.lock().await;
        let snapshot = self.storage.load(self.counter).await?;
        if let Some(ticket) = &snapshot {
            session.restore(ticket.clone());
            debug!(ticket = %ticket.ticket_number, "restored serving snapshot");
        }
        Ok(snapshot)
    }

    fn notify_call_failure(&self, err: &BackendError) {
        match err {
            BackendError::EmptyQueue { .. } => {
                self.notifier
                    .notify("No tickets waiting in the queue", NotifyKind::Info);
            }
            _ => {
                self.notifier
                    .notify("Could not call the next ticket", NotifyKind::Error);
            }
        }
    }

    fn notify_update_failure(&self, err: &BackendError) {
        match err {
            BackendError::TicketNotFound(number) => {
                self.notifier
                    .notify(&format!("Ticket {} not found", number), NotifyKind::Warning);
            }
            _ => {
                self.notifier
                    .notify("Could not update ticket status", NotifyKind::Error);
            }
        }
    }
}

#[async_trait]
impl QueueEventHandler for TicketCallCoordinator {
    /// Apply a server-pushed event to the session state.
    ///
    /// Persistence follows the in-memory commit here: the push path is
    /// best-effort, so a storage failure is logged rather than surfaced.
    async fn handle(&self, event: QueueEvent) -> Result<(), DomainError> {
        let mut session = self.session.lock().await;
        let outcome = session.apply_event(&event);
        debug!(kind = event.kind(), ?outcome, "push event applied");

        // Persistence stays inside the lock hold so a direct action racing
        // this event never sees memory and the snapshot disagree.
        if outcome.needs_persist() {
            if let Some(ticket) = session.current().cloned() {
                if let Err(err) = self.storage.save(self.counter, &ticket).await {
                    warn!(error = %err, "snapshot persist after push event failed");
                }
            }
        } else if outcome.needs_clear() {
            if let Err(err) = self.storage.clear(self.counter).await {
                warn!(error = %err, "snapshot clear after push event failed");
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "TicketCallCoordinator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ServiceGroupId, Timestamp};
    use crate::domain::serving::TicketDetail;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    /// Scriptable backend: pops one response per operation invocation.
    #[derive(Default)]
    struct ScriptedBackend {
        call_next: StdMutex<VecDeque<Result<TicketNumber, BackendError>>>,
        detail: StdMutex<VecDeque<Result<TicketDetail, BackendError>>>,
        update: StdMutex<VecDeque<Result<(), BackendError>>>,
        status: StdMutex<VecDeque<Result<QueueStatus, BackendError>>>,
        /// When set, `ticket_detail` parks until notified.
        hold_detail: StdMutex<Option<Arc<tokio::sync::Notify>>>,
    }

    impl ScriptedBackend {
        fn push_call_next(&self, result: Result<TicketNumber, BackendError>) {
            self.call_next.lock().unwrap().push_back(result);
        }

        fn push_detail(&self, result: Result<TicketDetail, BackendError>) {
            self.detail.lock().unwrap().push_back(result);
        }

        fn push_update(&self, result: Result<(), BackendError>) {
            self.update.lock().unwrap().push_back(result);
        }

        fn push_status(&self, result: Result<QueueStatus, BackendError>) {
            self.status.lock().unwrap().push_back(result);
        }
    }

    fn unavailable() -> BackendError {
        BackendError::Unavailable {
            reason: "scripted".to_string(),
        }
    }

    #[async_trait]
    impl QueueBackend for ScriptedBackend {
        async fn call_next(&self, _: &ServiceGroupId) -> Result<TicketNumber, BackendError> {
            self.call_next
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }

        async fn ticket_detail(&self, _: &TicketNumber) -> Result<TicketDetail, BackendError> {
            let gate = self.hold_detail.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.detail
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }

        async fn update_status(
            &self,
            _: &TicketNumber,
            _: TicketStatus,
        ) -> Result<(), BackendError> {
            self.update
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }

        async fn queue_status(&self, _: &ServiceGroupId) -> Result<QueueStatus, BackendError> {
            self.status
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }
    }

    #[derive(Default)]
    struct RecordingStorage {
        slot: StdMutex<Option<CurrentServingTicket>>,
        fail_save: StdMutex<bool>,
    }

    #[async_trait]
    impl ServingStorage for RecordingStorage {
        async fn save(
            &self,
            _: CounterId,
            ticket: &CurrentServingTicket,
        ) -> Result<(), ServingStorageError> {
            if *self.fail_save.lock().unwrap() {
                return Err(ServingStorageError::IoError("scripted".to_string()));
            }
            *self.slot.lock().unwrap() = Some(ticket.clone());
            Ok(())
        }

        async fn load(
            &self,
            _: CounterId,
        ) -> Result<Option<CurrentServingTicket>, ServingStorageError> {
            Ok(self.slot.lock().unwrap().clone())
        }

        async fn clear(&self, _: CounterId) -> Result<(), ServingStorageError> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: StdMutex<Vec<(String, NotifyKind)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, kind: NotifyKind) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), kind));
        }
    }

    fn number(n: &str) -> TicketNumber {
        TicketNumber::new(n).unwrap()
    }

    fn detail(n: &str, status: TicketStatus) -> TicketDetail {
        TicketDetail {
            ticket_number: number(n),
            full_name: "Nguyen Van A".to_string(),
            status,
            called_at: Some(Timestamp::now()),
            created_at: None,
        }
    }

    fn queue_status(pending: u32) -> QueueStatus {
        QueueStatus {
            queue_name: "g1.tickets".to_string(),
            pending_count: pending,
            consumer_count: 1,
        }
    }

    struct Harness {
        backend: Arc<ScriptedBackend>,
        storage: Arc<RecordingStorage>,
        notifier: Arc<RecordingNotifier>,
        coordinator: Arc<TicketCallCoordinator>,
    }

    fn harness() -> Harness {
        let backend = Arc::new(ScriptedBackend::default());
        let storage = Arc::new(RecordingStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let coordinator = Arc::new(TicketCallCoordinator::new(
            backend.clone(),
            storage.clone(),
            notifier.clone(),
            CounterId::new(),
        ));
        Harness {
            backend,
            storage,
            notifier,
            coordinator,
        }
    }

    async fn select_group(h: &Harness) {
        h.coordinator
            .set_selection(ServiceGroupSelection::new(
                ServiceGroupId::new("G1").unwrap(),
                "Group One",
            ))
            .await;
    }

    #[tokio::test]
    async fn call_next_without_selection_fails_fast() {
        let h = harness();
        let err = h.coordinator.call_next().await.unwrap_err();
        assert!(matches!(err, CoordinatorError::NoQueueSelected));
        // No network call was scripted and none was consumed.
        assert!(h.backend.call_next.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn call_next_success_populates_persists_and_refreshes() {
        let h = harness();
        select_group(&h).await;
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(3)));

        let outcome = h.coordinator.call_next().await.unwrap();
        assert_eq!(outcome.ticket.ticket_number, number("A015"));
        assert_eq!(outcome.ticket.status, TicketStatus::Calling);
        assert_eq!(outcome.queue_status.unwrap().pending_count, 3);

        // Persisted snapshot matches the in-memory record.
        let stored = h.storage.slot.lock().unwrap().clone().unwrap();
        assert_eq!(stored, h.coordinator.current_ticket().await.unwrap());

        let messages = h.notifier.messages.lock().unwrap();
        assert!(messages
            .iter()
            .any(|(m, k)| m.contains("A015") && *k == NotifyKind::Success));
    }

    #[tokio::test]
    async fn empty_queue_is_distinguishable_and_leaves_state() {
        let h = harness();
        select_group(&h).await;
        h.backend
            .push_call_next(Err(BackendError::EmptyQueue { message: None }));

        let err = h.coordinator.call_next().await.unwrap_err();
        assert!(err.is_empty_queue());
        assert!(h.coordinator.current_ticket().await.is_none());

        let messages = h.notifier.messages.lock().unwrap();
        assert!(messages
            .iter()
            .any(|(m, k)| m.contains("No tickets") && *k == NotifyKind::Info));
    }

    #[tokio::test]
    async fn detail_failure_rolls_back_to_prior_ticket() {
        let h = harness();
        select_group(&h).await;

        // First call succeeds and installs A015.
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(2)));
        h.coordinator.call_next().await.unwrap();

        // Second call: call-next succeeds but the detail fetch fails.
        h.backend.push_call_next(Ok(number("A016")));
        h.backend.push_detail(Err(unavailable()));

        let err = h.coordinator.call_next().await.unwrap_err();
        assert!(matches!(err, CoordinatorError::Backend(_)));

        // Prior ticket untouched, in memory and in storage.
        let current = h.coordinator.current_ticket().await.unwrap();
        assert_eq!(current.ticket_number, number("A015"));
        let stored = h.storage.slot.lock().unwrap().clone().unwrap();
        assert_eq!(stored.ticket_number, number("A015"));
    }

    #[tokio::test]
    async fn storage_failure_rolls_back_call_next() {
        let h = harness();
        select_group(&h).await;
        *h.storage.fail_save.lock().unwrap() = true;
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));

        let err = h.coordinator.call_next().await.unwrap_err();
        assert!(matches!(err, CoordinatorError::Storage(_)));
        assert!(h.coordinator.current_ticket().await.is_none());
    }

    #[tokio::test]
    async fn second_call_next_while_in_flight_is_rejected() {
        let h = harness();
        select_group(&h).await;

        // Simulate an in-flight call by holding the guard manually.
        let guard = InFlightGuard::acquire(&h.coordinator.call_in_flight).unwrap();
        let err = h.coordinator.call_next().await.unwrap_err();
        assert!(matches!(err, CoordinatorError::CallInProgress));
        drop(guard);

        // Once released, calls go through again.
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(0)));
        assert!(h.coordinator.call_next().await.is_ok());
    }

    #[tokio::test]
    async fn update_status_for_non_current_ticket_is_rejected() {
        let h = harness();
        select_group(&h).await;

        let err = h
            .coordinator
            .update_status(&number("A015"), TicketStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, CoordinatorError::TicketNotCurrent(_)));
    }

    #[tokio::test]
    async fn update_status_reconciles_with_refetched_detail() {
        let h = harness();
        select_group(&h).await;
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(1)));
        h.coordinator.call_next().await.unwrap();

        h.backend.push_update(Ok(()));
        h.backend
            .push_detail(Ok(detail("A015", TicketStatus::Completed)));

        let updated = h
            .coordinator
            .update_status(&number("A015"), TicketStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, TicketStatus::Completed);

        // Completed does not auto-clear; a separate policy step does.
        assert!(h.coordinator.current_ticket().await.is_some());
        h.coordinator.clear_current().await.unwrap();
        assert!(h.coordinator.current_ticket().await.is_none());
        assert!(h.storage.slot.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_failure_preserves_displayed_ticket() {
        let h = harness();
        select_group(&h).await;
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(1)));
        h.coordinator.call_next().await.unwrap();

        h.backend.push_update(Err(unavailable()));
        let err = h
            .coordinator
            .update_status(&number("A015"), TicketStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, CoordinatorError::Backend(_)));
        assert_eq!(
            h.coordinator.current_ticket().await.unwrap().status,
            TicketStatus::Calling
        );
    }

    #[tokio::test]
    async fn same_status_update_leaves_other_fields_untouched() {
        let h = harness();
        select_group(&h).await;
        let record = detail("A015", TicketStatus::Calling);
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(record.clone()));
        h.backend.push_status(Ok(queue_status(1)));
        let before = h.coordinator.call_next().await.unwrap().ticket;

        // The backend record has not moved; the reconciling re-fetch
        // returns it unchanged.
        h.backend.push_update(Ok(()));
        h.backend.push_detail(Ok(record));

        let after = h
            .coordinator
            .update_status(&number("A015"), TicketStatus::Calling)
            .await
            .unwrap();
        assert_eq!(after, before);
        assert_eq!(after.called_at, before.called_at);
        assert_eq!(after.full_name, before.full_name);
    }

    #[tokio::test]
    async fn push_replacement_during_update_keeps_memory_and_storage_aligned() {
        let h = harness();
        select_group(&h).await;
        h.backend.push_call_next(Ok(number("A015")));
        h.backend.push_detail(Ok(detail("A015", TicketStatus::Calling)));
        h.backend.push_status(Ok(queue_status(1)));
        h.coordinator.call_next().await.unwrap();

        // Park the update's reconciling re-fetch on a gate.
        let gate = Arc::new(tokio::sync::Notify::new());
        *h.backend.hold_detail.lock().unwrap() = Some(gate.clone());
        h.backend.push_update(Ok(()));
        h.backend
            .push_detail(Ok(detail("A015", TicketStatus::Completed)));

        let update = {
            let coordinator = h.coordinator.clone();
            tokio::spawn(async move {
                coordinator
                    .update_status(&number("A015"), TicketStatus::Completed)
                    .await
            })
        };
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        // A push event replaces the current ticket mid-flight.
        h.coordinator
            .handle(QueueEvent::TicketCalled {
                ticket_number: number("B777"),
                full_name: Some("Tran Thi B".to_string()),
                status: Some(TicketStatus::Calling),
                called_at: None,
                at: Timestamp::now(),
            })
            .await
            .unwrap();

        *h.backend.hold_detail.lock().unwrap() = None;
        gate.notify_one();

        // The stale update is rejected and writes nothing.
        let err = update.await.unwrap().unwrap_err();
        assert!(matches!(err, CoordinatorError::TicketNotCurrent(_)));

        let current = h.coordinator.current_ticket().await.unwrap();
        assert_eq!(current.ticket_number, number("B777"));
        let stored = h.storage.slot.lock().unwrap().clone().unwrap();
        assert_eq!(stored, current);
    }

    #[tokio::test]
    async fn restore_reads_snapshot_without_network() {
        let h = harness();
        let ticket = CurrentServingTicket::from_detail(&detail("A015", TicketStatus::Processing));
        *h.storage.slot.lock().unwrap() = Some(ticket.clone());

        let restored = h.coordinator.restore().await.unwrap().unwrap();
        assert_eq!(restored, ticket);
        assert_eq!(h.coordinator.current_ticket().await.unwrap(), ticket);
        // Nothing scripted on the backend, nothing consumed.
        assert!(h.backend.detail.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn restore_on_empty_slot_returns_none() {
        let h = harness();
        assert!(h.coordinator.restore().await.unwrap().is_none());
        assert!(h.coordinator.current_ticket().await.is_none());
    }

    #[tokio::test]
    async fn push_event_funnel_persists_replacements() {
        let h = harness();
        let event = QueueEvent::TicketCalled {
            ticket_number: number("A020"),
            full_name: Some("Tran Thi B".to_string()),
            status: Some(TicketStatus::Calling),
            called_at: None,
            at: Timestamp::now(),
        };
        h.coordinator.handle(event).await.unwrap();

        let current = h.coordinator.current_ticket().await.unwrap();
        assert_eq!(current.ticket_number, number("A020"));
        let stored = h.storage.slot.lock().unwrap().clone().unwrap();
        assert_eq!(stored.ticket_number, number("A020"));
    }

    #[tokio::test]
    async fn push_completed_clears_snapshot_on_match_only() {
        let h = harness();
        let ticket = CurrentServingTicket::from_detail(&detail("A015", TicketStatus::Processing));
        *h.storage.slot.lock().unwrap() = Some(ticket);
        h.coordinator.restore().await.unwrap();

        h.coordinator
            .handle(QueueEvent::TicketCompleted {
                ticket_number: number("A099"),
                at: Timestamp::now(),
            })
            .await
            .unwrap();
        assert!(h.coordinator.current_ticket().await.is_some());

        h.coordinator
            .handle(QueueEvent::TicketCompleted {
                ticket_number: number("A015"),
                at: Timestamp::now(),
            })
            .await
            .unwrap();
        assert!(h.coordinator.current_ticket().await.is_none());
        assert!(h.storage.slot.lock().unwrap().is_none());
    }
}
