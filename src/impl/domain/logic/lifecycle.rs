use tracing::debug;

use crate::{
    domain::logic::{root_reducer::Collection, store::Store},
    entities::{
        Action, CollectionAction, CollectionOutcome, LoginOutcome, Request, RequestPhase,
        RequestSeq, SessionAction,
    },
};

pub(crate) const CANCELLED_MESSAGE: &str = "Request cancelled before it settled.";

/// An in-flight request whose pending action has already been dispatched.
/// Settling consumes the handle, so a request can reach at most one of
/// fulfilled/rejected. Dropping it unsettled (the awaiting future was
/// cancelled) dispatches a rejection, so `loading` is never left stuck.
pub(crate) struct PendingRequest<'a, P> {
    store: &'a Store,
    seq: RequestSeq,
    wrap: fn(Request<P>) -> Action,
    settled: bool,
}

impl<'a, P> PendingRequest<'a, P> {
    pub(crate) fn begin(store: &'a Store, wrap: fn(Request<P>) -> Action) -> Self {
        let seq = store.next_seq();
        store.dispatch(wrap(Request::pending(seq)));
        Self {
            store,
            seq,
            wrap,
            settled: false,
        }
    }

    pub(crate) fn fulfil(mut self, payload: P) {
        self.settle(RequestPhase::Fulfilled(payload));
    }

    pub(crate) fn reject(mut self, message: impl Into<String>) {
        self.settle(RequestPhase::Rejected(message.into()));
    }

    fn settle(&mut self, phase: RequestPhase<P>) {
        self.settled = true;
        self.store.dispatch((self.wrap)(Request {
            seq: self.seq,
            phase,
        }));
    }
}

impl<P> Drop for PendingRequest<'_, P> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(seq = ?self.seq, "Request dropped before settling.");
            self.settle(RequestPhase::Rejected(CANCELLED_MESSAGE.to_string()));
        }
    }
}

pub(crate) fn collection_request<T: Collection>(request: Request<CollectionOutcome<T>>) -> Action {
    T::wrap(CollectionAction::Request(request))
}

pub(crate) fn login_request(request: Request<LoginOutcome>) -> Action {
    Action::Auth(SessionAction::Login(request))
}
