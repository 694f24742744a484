pub mod api;
pub mod context;
pub mod session_expired;
pub mod storage;

pub use context::{use_session, AuthProvider, SessionContext};
pub use session_expired::SessionExpiredModal;
