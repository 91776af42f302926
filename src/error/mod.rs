//! Error handling for the messaging drawer.
//!
//! - **Categories**: [`ErrorCategory`] decides whether a notice offers a retry
//! - **Remote errors**: [`RemoteError`] for failed calls to the conversation service
//! - **Unified error**: [`DrawerError`] with optional [`ErrorContext`]
//! - **Result alias**: [`DrawerResult`] plus [`ResultExt`] for attaching context
//!
//! | Category | Typical cause | Retryable |
//! |----------|---------------|-----------|
//! | Network | Connection refused, timeout | Yes |
//! | Server | 5xx, undecodable body | Yes |
//! | Client | 4xx | No |
//! | User | Empty message, no active conversation | No |
//! | Configuration | Missing base URL or user id | No |
//!
//! None of these are fatal to the host application. The drawer converts
//! every remote failure into a state transition or a notice at the point
//! of call.

mod category;
mod context;
mod drawer_error;
mod remote;
mod result;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use drawer_error::DrawerError;
pub use remote::RemoteError;
pub use result::{DrawerResult, ResultExt};
