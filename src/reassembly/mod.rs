//! Reassembly of multi-frame diagnostic poll replies.
//!
//! A [`ReassemblySession`] consumes [`PollFrame`](crate::frame::PollFrame)
//! fragments one at a time and yields an [`AssembledMessage`] once the
//! terminal frame of a reply has been appended.
//!
//! ## Continuity validation
//!
//! Continuation frames must carry the key of the active reply and the exact
//! successor of the last accepted frame index. The session:
//!
//! - drops frames for a different exchange without touching its state,
//! - aborts the reply on a sequence gap, duplicate or reordering, and
//! - drops every continuation frame until the next index-0 frame restarts
//!   assembly.
//!
//! Only one reply is assembled at a time; a new index-0 frame discards any
//! reply in progress.

pub mod error;
pub mod session;
pub mod types;

pub use error::{DropReason, FrameOutcome};
pub use session::{ReassemblySession, SessionState};
pub use types::AssembledMessage;
