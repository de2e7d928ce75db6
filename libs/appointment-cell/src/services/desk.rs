// libs/appointment-cell/src/services/desk.rs
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::Directory;
use shared_config::DEFAULT_SESSION_TTL_MINUTES;

use crate::models::AppointmentRow;
use crate::services::admin::appointment_rows;
use crate::services::session::BookingSession;
use crate::services::submission::{AppointmentBook, BookingSubmitter};

/// A stored session and when a request last touched it.
#[derive(Debug, Clone)]
pub struct LiveSession {
    pub session: BookingSession,
    pub touched_at: Instant,
}

impl LiveSession {
    pub fn new(session: BookingSession) -> Self {
        Self {
            session,
            touched_at: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.touched_at = Instant::now();
    }

    pub fn is_idle(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.touched_at) > ttl
    }
}

/// Host-side state behind the booking routes: the directory, the live
/// sessions keyed by id, and the submission collaborator.
pub struct BookingDesk {
    directory: Arc<Directory>,
    book: Arc<AppointmentBook>,
    submitter: Arc<dyn BookingSubmitter>,
    sessions: RwLock<HashMap<Uuid, LiveSession>>,
    session_ttl: Duration,
}

impl BookingDesk {
    /// A desk whose appointment book also accepts the submissions.
    pub fn new(directory: Arc<Directory>, book: Arc<AppointmentBook>) -> Self {
        let submitter: Arc<dyn BookingSubmitter> = book.clone();
        Self::with_submitter(directory, book, submitter)
    }

    pub fn with_submitter(
        directory: Arc<Directory>,
        book: Arc<AppointmentBook>,
        submitter: Arc<dyn BookingSubmitter>,
    ) -> Self {
        Self {
            directory,
            book,
            submitter,
            sessions: RwLock::new(HashMap::new()),
            session_ttl: Duration::from_secs(u64::from(DEFAULT_SESSION_TTL_MINUTES) * 60),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Shared handle to the directory, for routers that serve it directly.
    pub fn directory_handle(&self) -> Arc<Directory> {
        self.directory.clone()
    }

    pub fn submitter(&self) -> Arc<dyn BookingSubmitter> {
        self.submitter.clone()
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub async fn open_session(&self, doctor_id: Uuid) -> (Uuid, BookingSession) {
        let session = BookingSession::new(doctor_id, self.directory.availability(doctor_id));
        let session_id = Uuid::new_v4();

        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, self.session_ttl, Instant::now());
        sessions.insert(session_id, LiveSession::new(session.clone()));

        info!("Opened booking session {} for doctor {}", session_id, doctor_id);
        (session_id, session)
    }

    /// Copy of a live session. Idle sessions count as gone.
    pub async fn session(&self, session_id: Uuid) -> Option<BookingSession> {
        let mut sessions = self.sessions.write().await;
        let live = Self::live_entry(&mut sessions, session_id, self.session_ttl)?;
        live.touch();
        Some(live.session.clone())
    }

    /// Apply `transition` to a live session and return its new state.
    /// `None` when the session is gone or idle.
    pub async fn update_session<F, E>(
        &self,
        session_id: Uuid,
        transition: F,
    ) -> Option<Result<BookingSession, E>>
    where
        F: FnOnce(&mut BookingSession) -> Result<(), E>,
    {
        let mut sessions = self.sessions.write().await;
        let live = Self::live_entry(&mut sessions, session_id, self.session_ttl)?;
        live.touch();

        Some(transition(&mut live.session).map(|_| live.session.clone()))
    }

    /// Take a session out of the store so nothing else can act on it while
    /// it is being submitted.
    pub async fn take_session(&self, session_id: Uuid) -> Option<BookingSession> {
        let mut sessions = self.sessions.write().await;
        Self::live_entry(&mut sessions, session_id, self.session_ttl)?;
        sessions.remove(&session_id).map(|live| live.session)
    }

    /// Put back a session taken with [`Self::take_session`].
    pub async fn restore_session(&self, session_id: Uuid, session: BookingSession) {
        self.sessions
            .write()
            .await
            .insert(session_id, LiveSession::new(session));
        debug!("Restored booking session {}", session_id);
    }

    /// Drop a session. Returns false when it was already gone.
    pub async fn close_session(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&session_id).is_some();
        debug!("Closed booking session {} (present: {})", session_id, removed);
        removed
    }

    /// Drop every session idle at `now`. Returns how many went.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, self.session_ttl, now)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn admin_rows(&self) -> Vec<AppointmentRow> {
        appointment_rows(&self.book.appointments(), self.directory.doctors())
    }

    fn live_entry(
        sessions: &mut HashMap<Uuid, LiveSession>,
        session_id: Uuid,
        ttl: Duration,
    ) -> Option<&mut LiveSession> {
        let idle = sessions.get(&session_id)?.is_idle(ttl, Instant::now());
        if idle {
            sessions.remove(&session_id);
            debug!("Booking session {} expired", session_id);
            return None;
        }
        sessions.get_mut(&session_id)
    }

    fn evict(sessions: &mut HashMap<Uuid, LiveSession>, ttl: Duration, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, live| !live.is_idle(ttl, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle booking sessions", evicted);
        }
        evicted
    }
}
