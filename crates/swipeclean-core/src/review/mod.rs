//! The review queue: session state machine, derived views, collaborators,
//! and the async driver that connects them.

pub mod backend;
pub mod driver;
pub mod session;
pub mod view;

pub use backend::{LocalBackend, ReviewBackend};
pub use driver::{Completion, ReviewDriver};
pub use session::{
    Decision, DeleteRequest, Phase, PreviewRequest, PreviewTicket, Rejection, RevealRequest,
    ReviewSession,
};
pub use view::{CardView, PreviewSlot, SessionView, SummaryView};
