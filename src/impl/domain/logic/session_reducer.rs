use tracing::debug;

use crate::entities::{LoginOutcome, Request, RequestPhase, SessionAction, SessionState};

impl SessionState {
    pub(crate) fn reduce(&mut self, action: SessionAction) -> bool {
        match action {
            SessionAction::Login(request) => self.reduce_login(request),
            SessionAction::LoginLocal { user, token } => {
                self.user = Some(user);
                self.token = Some(token);
                self.is_authenticated = true;
                true
            }
            SessionAction::Logout => {
                self.clear();
                true
            }
            SessionAction::Restored { has_token } => {
                if has_token || !self.is_authenticated {
                    return false;
                }
                debug!("No stored token; dropping persisted authenticated flag.");
                self.clear();
                true
            }
        }
    }

    /// Logged-out initial state; a login still in flight stays retired.
    pub(crate) fn reset(&mut self) {
        let retired_through = self.latest_request.max(self.retired_through);
        *self = Self {
            retired_through,
            ..Self::default()
        };
    }

    fn reduce_login(&mut self, request: Request<LoginOutcome>) -> bool {
        let Request { seq, phase } = request;
        if self.retired_through.is_some_and(|floor| seq <= floor) {
            debug!(?seq, "Discarding login issued before reset.");
            return false;
        }
        let stale = self.latest_request.is_some_and(|latest| latest != seq);
        match phase {
            RequestPhase::Pending => {
                self.latest_request = Some(seq);
                self.loading = true;
                self.error = None;
            }
            _ if stale => {
                debug!(?seq, "Discarding stale login settlement.");
                return false;
            }
            RequestPhase::Fulfilled(LoginOutcome { token, user }) => {
                self.loading = false;
                self.token = Some(token);
                if user.is_some() {
                    self.user = user;
                }
                self.is_authenticated = true;
            }
            RequestPhase::Rejected(message) => {
                self.loading = false;
                self.error = Some(message);
                self.is_authenticated = false;
            }
        }
        true
    }

    fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }
}
