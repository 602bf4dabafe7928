//! Client session state with change notification.
//!
//! A `SessionContext` owns the signed-in user, role and token. Every
//! dispatched action replaces the state and notifies subscribers with
//! the new snapshot, so views that depend on the role can re-render.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, RwLock,
};

use serde::{Deserialize, Serialize};

use crate::auth::{LoginResponse, Role, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub role: Option<Role>,
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    LoginStart,
    LoginSuccess(LoginResponse),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

pub struct SessionContext {
    state: RwLock<SessionState>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    /// Restore a previously persisted session.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: RwLock::new(state),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn dispatch(&self, action: SessionAction) -> SessionState {
        let next = reduce(action);

        {
            let mut guard = match self.state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = next.clone();
        }

        // Listeners run outside both locks so they may read the context.
        let listeners: Vec<Listener> = match self.listeners.lock() {
            Ok(guard) => guard.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(_, l)| Arc::clone(l)).collect(),
        };
        for listener in listeners {
            listener(&next);
        }

        next
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut guard = match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((id, Arc::new(listener)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = guard.len();
        guard.retain(|(existing, _)| *existing != id);
        guard.len() != before
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

fn reduce(action: SessionAction) -> SessionState {
    match action {
        SessionAction::LoginStart | SessionAction::Logout => SessionState::default(),
        SessionAction::LoginSuccess(login) => SessionState {
            user_id: Some(login.user.id.clone()),
            role: Some(login.role),
            token: Some(login.token),
            user: Some(login.user),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn login(role: Role) -> LoginResponse {
        LoginResponse {
            token: "token-123".to_string(),
            role,
            user: User {
                id: "user-1".to_string(),
                name: Some("Jane Patient".to_string()),
                email: Some("jane@example.com".to_string()),
                role: Some(role),
                photo: None,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_login_success_populates_state() {
        let ctx = SessionContext::new();
        assert!(!ctx.snapshot().is_authenticated());

        let state = ctx.dispatch(SessionAction::LoginSuccess(login(Role::Doctor)));
        assert!(state.is_authenticated());
        assert_eq!(state.role, Some(Role::Doctor));
        assert_eq!(state.user_id.as_deref(), Some("user-1"));
        assert_eq!(ctx.snapshot().bearer_token(), Some("token-123"));
    }

    #[test]
    fn test_logout_and_login_start_clear_state() {
        let ctx = SessionContext::new();
        ctx.dispatch(SessionAction::LoginSuccess(login(Role::Patient)));
        assert_eq!(ctx.dispatch(SessionAction::Logout), SessionState::default());

        ctx.dispatch(SessionAction::LoginSuccess(login(Role::Patient)));
        assert_eq!(ctx.dispatch(SessionAction::LoginStart), SessionState::default());
    }

    #[test]
    fn test_subscribers_notified_until_unsubscribed() {
        let ctx = SessionContext::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen_role = Arc::new(Mutex::new(None));

        let calls_clone = Arc::clone(&calls);
        let role_clone = Arc::clone(&seen_role);
        let id = ctx.subscribe(move |state| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            *role_clone.lock().unwrap() = state.role;
        });

        ctx.dispatch(SessionAction::LoginSuccess(login(Role::Admin)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen_role.lock().unwrap(), Some(Role::Admin));

        assert!(ctx.unsubscribe(id));
        assert!(!ctx.unsubscribe(id));

        ctx.dispatch(SessionAction::Logout);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_read_context() {
        let ctx = Arc::new(SessionContext::new());
        let observed = Arc::new(Mutex::new(None));

        let ctx_clone = Arc::clone(&ctx);
        let observed_clone = Arc::clone(&observed);
        ctx.subscribe(move |_| {
            *observed_clone.lock().unwrap() = ctx_clone.snapshot().user_id;
        });

        ctx.dispatch(SessionAction::LoginSuccess(login(Role::Patient)));
        assert_eq!(observed.lock().unwrap().as_deref(), Some("user-1"));
    }
}
