//! Admission, throttling and drain decision path.
//!
//! The dispatcher owns all mutable engine state: the session gate, the
//! per-cycle budget, the FIFO backlog and the pending-send map. `submit`
//! and `on_response` are called from arbitrary execution contexts while the
//! scheduler drives `evaluate_session` and `drain_cycle` at a fixed
//! cadence; every shared structure is internally synchronized.

use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use tracing::debug;

use pacer_core::{
    MutateOutcome, OrderRequest, OrderResponse, RejectReason, RequestKind, SubmitOutcome,
};

use crate::backlog::Backlog;
use crate::budget::SubmissionBudget;
use crate::config::EngineConfig;
use crate::correlator::ResponseCorrelator;
use crate::error::Result;
use crate::events::EventSink;
use crate::session::{SessionMonitor, SessionWindow};

/// The core throttling engine.
pub struct Dispatcher {
    session: SessionMonitor,
    backlog: Backlog,
    budget: SubmissionBudget,
    correlator: ResponseCorrelator,
    sink: Arc<dyn EventSink>,
}

impl Dispatcher {
    /// Create a dispatcher from a validated configuration.
    pub fn new(config: &EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self> {
        config.validate()?;
        let window = SessionWindow::new(config.open, config.close)?;

        Ok(Self {
            session: SessionMonitor::new(window),
            backlog: Backlog::new(),
            budget: SubmissionBudget::new(config.max_orders_per_cycle)?,
            correlator: ResponseCorrelator::new(),
            sink,
        })
    }

    /// Process an inbound order request.
    ///
    /// 1. Session Closed: reject, no state mutated.
    /// 2. Modify/Cancel: mutate the backlog entry in place; never consumes
    ///    budget and is never sent or queued itself.
    /// 3. New: dispatch immediately while the cycle budget lasts, queue to
    ///    the backlog otherwise.
    pub fn submit(&self, order: OrderRequest) -> SubmitOutcome {
        let id = order.id;

        if !self.session.is_open() {
            self.sink.reject(&order);
            return SubmitOutcome::Rejected {
                id,
                reason: RejectReason::MarketClosed,
            };
        }

        match order.kind {
            RequestKind::Modify => {
                let outcome = if self.backlog.modify(id, order.price, order.qty) {
                    MutateOutcome::Modified
                } else {
                    self.sink.not_found(id);
                    MutateOutcome::NotFound
                };
                SubmitOutcome::Mutated { id, outcome }
            }
            RequestKind::Cancel => {
                let outcome = if self.backlog.cancel(id) {
                    MutateOutcome::Cancelled
                } else {
                    self.sink.not_found(id);
                    MutateOutcome::NotFound
                };
                SubmitOutcome::Mutated { id, outcome }
            }
            RequestKind::New => {
                if self.budget.try_acquire() {
                    self.dispatch(&order);
                    SubmitOutcome::Sent { id }
                } else {
                    self.sink.queued(&order);
                    self.backlog.push(order);
                    debug!(%id, queued = self.backlog.len(), "Budget exhausted, order queued");
                    SubmitOutcome::Queued { id }
                }
            }
        }
    }

    /// Run one budget-reset-and-drain cycle.
    ///
    /// Resets the counter, then dispatches backlog heads in FIFO order
    /// until the backlog empties or the fresh budget is exhausted. This is
    /// the only path by which backlogged orders reach the venue.
    pub fn drain_cycle(&self) {
        self.budget.reset();

        let mut drained = 0usize;
        while let Some(order) = self.backlog.pop() {
            if self.budget.try_acquire() {
                self.dispatch(&order);
                drained += 1;
            } else {
                // Budget ran out between pop and acquire; restore the head
                self.backlog.push_front(order);
                break;
            }
        }

        if drained > 0 {
            debug!(drained, remaining = self.backlog.len(), "Backlog drained");
        }
    }

    /// Evaluate the session window against `now` and transition if needed.
    pub fn evaluate_session(&self, now: NaiveTime) {
        self.session.evaluate(now, self.sink.as_ref());
    }

    /// Correlate a venue response back to its send.
    ///
    /// The first matching response produces a latency event; unknown or
    /// duplicate identifiers are silent no-ops.
    pub fn on_response(&self, response: OrderResponse) {
        if let Some(latency_us) = self.correlator.correlate(response.id, now_micros()) {
            self.sink.latency(response.id, &response.kind, latency_us);
        }
    }

    /// Session monitor (read access for hosts and tests).
    #[must_use]
    pub fn session(&self) -> &SessionMonitor {
        &self.session
    }

    /// Current backlog depth.
    #[must_use]
    pub fn backlog_depth(&self) -> usize {
        self.backlog.len()
    }

    /// Sends performed since the last cycle reset.
    #[must_use]
    pub fn budget_used(&self) -> u32 {
        self.budget.used()
    }

    /// Sends still awaiting a venue response.
    #[must_use]
    pub fn pending_responses(&self) -> usize {
        self.correlator.pending()
    }

    /// Hand an order to the venue: record its send time, then emit.
    ///
    /// The caller must already hold a budget slot.
    fn dispatch(&self, order: &OrderRequest) {
        self.correlator.record_send(order.id, now_micros());
        self.sink.send(order);
    }
}

/// Current wall-clock time in Unix microseconds.
fn now_micros() -> u64 {
    Utc::now().timestamp_micros().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RecordingSink, SinkEvent};
    use pacer_core::{OrderId, Price, Qty};
    use rust_decimal_macros::dec;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn order(id: u64) -> OrderRequest {
        OrderRequest::new_order(OrderId::new(id), Price::new(dec!(100)), Qty::new(dec!(1)))
    }

    /// Dispatcher with the default 10:00-13:00 window already open.
    fn open_dispatcher(limit: u32) -> (Arc<RecordingSink>, Dispatcher) {
        let sink = Arc::new(RecordingSink::new());
        let config = EngineConfig {
            max_orders_per_cycle: limit,
            ..EngineConfig::default()
        };
        let dispatcher = Dispatcher::new(&config, sink.clone()).unwrap();
        dispatcher.evaluate_session(t(11, 0));
        sink.clear();
        (sink, dispatcher)
    }

    #[test]
    fn test_closed_session_rejects_without_state_change() {
        let sink = Arc::new(RecordingSink::new());
        let dispatcher = Dispatcher::new(&EngineConfig::default(), sink.clone()).unwrap();

        let outcome = dispatcher.submit(order(1));
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                id: OrderId::new(1),
                reason: RejectReason::MarketClosed
            }
        );

        // Modify and Cancel are gated the same way
        assert!(dispatcher
            .submit(OrderRequest::cancel(OrderId::new(1)))
            .is_rejected());

        assert_eq!(dispatcher.backlog_depth(), 0);
        assert_eq!(dispatcher.budget_used(), 0);
        assert_eq!(dispatcher.pending_responses(), 0);
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Reject(OrderId::new(1)),
                SinkEvent::Reject(OrderId::new(1))
            ]
        );
    }

    #[test]
    fn test_immediate_send_within_budget_then_queue() {
        let (sink, dispatcher) = open_dispatcher(2);

        assert!(dispatcher.submit(order(1)).is_sent());
        assert!(dispatcher.submit(order(2)).is_sent());
        assert!(dispatcher.submit(order(3)).is_queued());

        assert_eq!(dispatcher.budget_used(), 2);
        assert_eq!(dispatcher.backlog_depth(), 1);
        assert_eq!(dispatcher.pending_responses(), 2);
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Send(OrderId::new(1)),
                SinkEvent::Send(OrderId::new(2)),
                SinkEvent::Queued(OrderId::new(3)),
            ]
        );
    }

    #[test]
    fn test_mutations_never_consume_budget() {
        let (sink, dispatcher) = open_dispatcher(1);

        assert!(dispatcher.submit(order(1)).is_sent());
        dispatcher.submit(order(2)); // queued

        let outcome = dispatcher.submit(OrderRequest::modify(
            OrderId::new(2),
            Price::new(dec!(105)),
            Qty::new(dec!(4)),
        ));
        assert_eq!(
            outcome,
            SubmitOutcome::Mutated {
                id: OrderId::new(2),
                outcome: MutateOutcome::Modified
            }
        );
        assert_eq!(dispatcher.budget_used(), 1);

        let outcome = dispatcher.submit(OrderRequest::cancel(OrderId::new(2)));
        assert_eq!(
            outcome,
            SubmitOutcome::Mutated {
                id: OrderId::new(2),
                outcome: MutateOutcome::Cancelled
            }
        );
        assert_eq!(dispatcher.budget_used(), 1);
        assert_eq!(dispatcher.backlog_depth(), 0);

        // No send or not-found events for the mutations
        assert_eq!(
            sink.count_matching(|e| matches!(e, SinkEvent::NotFound(_))),
            0
        );
    }

    #[test]
    fn test_mutation_on_unknown_id_emits_not_found() {
        let (sink, dispatcher) = open_dispatcher(10);

        // Sent orders leave the backlog permanently
        dispatcher.submit(order(1));

        let outcome = dispatcher.submit(OrderRequest::cancel(OrderId::new(1)));
        assert_eq!(
            outcome,
            SubmitOutcome::Mutated {
                id: OrderId::new(1),
                outcome: MutateOutcome::NotFound
            }
        );
        assert_eq!(
            sink.count_matching(|e| matches!(e, SinkEvent::NotFound(_))),
            1
        );
    }

    #[test]
    fn test_drain_cycle_resets_then_sends_fifo() {
        let (sink, dispatcher) = open_dispatcher(1);

        dispatcher.submit(order(1)); // sent
        dispatcher.submit(order(2)); // queued
        dispatcher.submit(order(3)); // queued
        sink.clear();

        dispatcher.drain_cycle();

        // Fresh budget of 1: only the head goes out
        assert_eq!(sink.sent_ids(), vec![OrderId::new(2)]);
        assert_eq!(dispatcher.budget_used(), 1);
        assert_eq!(dispatcher.backlog_depth(), 1);

        dispatcher.drain_cycle();
        assert_eq!(sink.sent_ids(), vec![OrderId::new(2), OrderId::new(3)]);
        assert_eq!(dispatcher.backlog_depth(), 0);
    }

    #[test]
    fn test_drain_on_empty_backlog_only_resets() {
        let (sink, dispatcher) = open_dispatcher(5);
        dispatcher.submit(order(1));
        assert_eq!(dispatcher.budget_used(), 1);
        sink.clear();

        dispatcher.drain_cycle();

        assert_eq!(dispatcher.budget_used(), 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_response_latency_emitted_at_most_once() {
        let (sink, dispatcher) = open_dispatcher(10);
        dispatcher.submit(order(7));

        dispatcher.on_response(OrderResponse::new(OrderId::new(7), "accepted"));
        dispatcher.on_response(OrderResponse::new(OrderId::new(7), "accepted"));
        // Response for an order never sent
        dispatcher.on_response(OrderResponse::new(OrderId::new(99), "rejected"));

        assert_eq!(
            sink.count_matching(|e| matches!(e, SinkEvent::Latency { .. })),
            1
        );
        assert_eq!(dispatcher.pending_responses(), 0);
    }
}
