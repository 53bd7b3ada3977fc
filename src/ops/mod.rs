pub mod request;
pub mod view_state;

pub use request::{Completion, Op, Reply, Request, RequestId};
pub use view_state::{EditDraft, ErrorKind, Notice, Row, ViewState};
