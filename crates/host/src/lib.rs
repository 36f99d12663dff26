//! `dex50-host` — the integration contract between the gate and the hosting
//! remote-management server.
//!
//! The host implements the traits in this crate once; the gate depends only
//! on these seams and never on a concrete host API. In-memory
//! implementations are shipped for tests and dry-run embeddings.

pub mod login;
pub mod memory;
pub mod response;
pub mod session;
pub mod store;

pub use login::LoginEvent;
pub use memory::{BufferedResponse, MemoryUserStore, RecordingSession};
pub use response::{ResponseChannel, ResponseError};
pub use session::{Session, SessionError};
pub use store::{StoreError, UserStore};
