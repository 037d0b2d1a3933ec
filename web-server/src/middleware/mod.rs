pub mod require_session;

pub use require_session::RequireSession;
