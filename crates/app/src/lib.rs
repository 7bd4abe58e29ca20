//! `quickbill-app` — the editor session tying document, persistence and
//! export adapters together.

pub mod session;

pub use session::{EditorSession, bootstrap};
