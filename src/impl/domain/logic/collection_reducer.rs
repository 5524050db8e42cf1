use tracing::debug;

use crate::entities::{
    CollectionAction, CollectionOutcome, CollectionState, Entity, InsertPosition, Request,
    RequestPhase, RequestSeq,
};

impl<T: Entity> CollectionState<T> {
    /// Applies one action. Returns whether observable state changed.
    pub(crate) fn reduce(&mut self, action: CollectionAction<T>) -> bool {
        match action {
            CollectionAction::Request(request) => self.reduce_request(request),
            CollectionAction::AddLocal(record) => {
                self.insert(record);
                true
            }
            CollectionAction::UpdateLocal(record) => self.replace(record),
            CollectionAction::RemoveLocal(id) => self.remove(&id),
        }
    }

    /// Back to the initial state. Requests already in flight stay retired, so
    /// none of them can write into the cleared slice when they settle.
    pub(crate) fn reset(&mut self) {
        let retired_through = self.latest_request.max(self.retired_through);
        *self = Self {
            retired_through,
            ..Self::default()
        };
    }

    fn reduce_request(&mut self, request: Request<CollectionOutcome<T>>) -> bool {
        let Request { seq, phase } = request;
        if self.is_retired(seq) {
            debug!(
                collection = T::COLLECTION,
                ?seq,
                "Discarding request issued before reset."
            );
            return false;
        }
        match phase {
            RequestPhase::Pending => {
                self.latest_request = Some(seq);
                self.loading = true;
                self.error = None;
                true
            }
            RequestPhase::Fulfilled(outcome) => {
                let latest = self.is_latest(seq);
                let list_changed = match outcome {
                    CollectionOutcome::Fetched(list) if latest => {
                        self.list = list;
                        true
                    }
                    CollectionOutcome::Fetched(_) => {
                        debug!(
                            collection = T::COLLECTION,
                            ?seq,
                            "Discarding stale fetch result."
                        );
                        false
                    }
                    CollectionOutcome::Created(record) => {
                        self.insert(record);
                        true
                    }
                    CollectionOutcome::Updated(record) => self.replace(record),
                    CollectionOutcome::Deleted(id) => self.remove(&id),
                };
                if latest {
                    self.loading = false;
                }
                latest || list_changed
            }
            RequestPhase::Rejected(message) => {
                if !self.is_latest(seq) {
                    debug!(
                        collection = T::COLLECTION,
                        ?seq,
                        %message,
                        "Discarding stale rejection."
                    );
                    return false;
                }
                self.loading = false;
                self.error = Some(message);
                true
            }
        }
    }

    fn is_latest(&self, seq: RequestSeq) -> bool {
        self.latest_request.map_or(true, |latest| latest == seq)
    }

    fn is_retired(&self, seq: RequestSeq) -> bool {
        self.retired_through.is_some_and(|floor| seq <= floor)
    }

    fn insert(&mut self, record: T) {
        match T::INSERT_POSITION {
            InsertPosition::Front => self.list.insert(0, record),
            InsertPosition::Back => self.list.push(record),
        }
    }

    /// Absent IDs are a no-op (stale cache), not an error.
    fn replace(&mut self, record: T) -> bool {
        match self.list.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &T::Id) -> bool {
        let before = self.list.len();
        self.list.retain(|r| r.id() != id);
        self.list.len() != before
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::entities::{Category, Transaction, TransactionType};

    fn tx(id: i64, description: &str) -> Transaction {
        let at = Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap();
        Transaction {
            id,
            account_id: 1,
            user_id: "u-1".to_string(),
            category_id: 1,
            amount: 45000.0,
            transaction_type: TransactionType::Expense,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            created_at: at,
            updated_at: at,
        }
    }

    fn category(id: i64, name: &str) -> Category {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Category {
            id,
            key: name.to_lowercase(),
            name: name.to_string(),
            icon: String::new(),
            color_fill: String::new(),
            color_bg: String::new(),
            transaction_type: TransactionType::Expense,
            created_at: at,
            updated_at: at,
        }
    }

    fn request<T: Entity>(
        state: &mut CollectionState<T>,
        seq: u64,
        phase: RequestPhase<CollectionOutcome<T>>,
    ) -> bool {
        state.reduce(CollectionAction::Request(Request {
            seq: RequestSeq(seq),
            phase,
        }))
    }

    #[test]
    fn fetch_fulfilled_replaces_list_wholesale() {
        let mut state = CollectionState::with_list(vec![tx(99, "local only")]);
        request(&mut state, 1, RequestPhase::Pending);
        assert!(state.loading);

        request(
            &mut state,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Fetched(vec![tx(1, "a"), tx(2, "b")])),
        );
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(
            state.list.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn rejection_keeps_list_and_records_error() {
        let mut state = CollectionState::with_list(vec![category(1, "Comida")]);
        request(&mut state, 1, RequestPhase::Pending);
        request(&mut state, 1, RequestPhase::Rejected("Network Error".into()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network Error"));
        assert_eq!(state.list.len(), 1);
    }

    #[test]
    fn pending_clears_previous_error() {
        let mut state = CollectionState::<Category>::default();
        request(&mut state, 1, RequestPhase::Pending);
        request(&mut state, 1, RequestPhase::Rejected("boom".into()));
        request(&mut state, 2, RequestPhase::Pending);
        assert_eq!(state.error, None);
        assert!(state.loading);
    }

    #[test]
    fn create_uses_collection_insert_position() {
        let mut transactions = CollectionState::with_list(vec![tx(1, "old")]);
        request(
            &mut transactions,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Created(tx(2, "new"))),
        );
        assert_eq!(transactions.list[0].id, 2);

        let mut categories = CollectionState::with_list(vec![category(1, "Comida")]);
        request(
            &mut categories,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Created(category(2, "Salud"))),
        );
        assert_eq!(categories.list[1].id, 2);
    }

    #[test]
    fn update_of_missing_record_is_noop() {
        let mut state = CollectionState::with_list(vec![tx(1, "a")]);
        let changed = state.reduce(CollectionAction::UpdateLocal(tx(7, "ghost")));
        assert!(!changed);
        assert_eq!(state.list, vec![tx(1, "a")]);

        state.reduce(CollectionAction::UpdateLocal(tx(1, "renamed")));
        assert_eq!(state.list[0].description, "renamed");
    }

    #[test]
    fn delete_filters_by_id() {
        let mut state = CollectionState::with_list(vec![tx(1, "a"), tx(2, "b")]);
        request(
            &mut state,
            3,
            RequestPhase::Fulfilled(CollectionOutcome::Deleted(1)),
        );
        assert_eq!(state.list, vec![tx(2, "b")]);
    }

    #[test]
    fn stale_fetch_is_discarded_after_newer_rejection() {
        let mut state = CollectionState::<Transaction>::default();
        request(&mut state, 1, RequestPhase::Pending);
        request(&mut state, 2, RequestPhase::Pending);
        request(&mut state, 2, RequestPhase::Rejected("Network Error".into()));

        let changed = request(
            &mut state,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Fetched(vec![tx(1, "slow")])),
        );
        assert!(!changed);
        assert!(state.list.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network Error"));
    }

    #[test]
    fn stale_create_still_lands_but_leaves_status_alone() {
        let mut state = CollectionState::<Transaction>::default();
        request(&mut state, 1, RequestPhase::Pending);
        request(&mut state, 2, RequestPhase::Pending);
        request(
            &mut state,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Created(tx(5, "created"))),
        );
        assert_eq!(state.list.len(), 1);
        assert!(state.loading);
    }

    #[test]
    fn request_in_flight_across_reset_is_dropped() {
        let mut state = CollectionState::<Transaction>::default();
        request(&mut state, 1, RequestPhase::Pending);
        state.reset();

        let changed = request(
            &mut state,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Fetched(vec![tx(1, "previous user")])),
        );
        assert!(!changed);
        assert!(state.list.is_empty());
        assert!(!state.loading);

        request(
            &mut state,
            1,
            RequestPhase::Fulfilled(CollectionOutcome::Created(tx(2, "late create"))),
        );
        assert!(state.list.is_empty());
    }

    #[test]
    fn requests_after_reset_apply_normally() {
        let mut state = CollectionState::<Transaction>::default();
        request(&mut state, 1, RequestPhase::Pending);
        state.reset();
        state.reset();

        request(&mut state, 2, RequestPhase::Pending);
        request(&mut state, 1, RequestPhase::Rejected("Network Error".into()));
        assert!(state.loading);
        assert_eq!(state.error, None);

        request(
            &mut state,
            2,
            RequestPhase::Fulfilled(CollectionOutcome::Fetched(vec![tx(3, "fresh")])),
        );
        assert!(!state.loading);
        assert_eq!(state.list, vec![tx(3, "fresh")]);
    }
}
