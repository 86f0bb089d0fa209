//! Delivery - best-effort transmission to the downstream automation endpoint
//!
//! This crate owns one job: get a submission payload to its webhook and tell
//! the caller whether it made it, without ever throwing.
//!
//! - **Dispatcher** (`dispatcher`) - structured POST, status check, and the
//!   one-shot opaque fallback for transport-level failures
//! - **Notifications** (`notify`) - fire-and-forget sink invoked after a
//!   dispatch settles; never affects the delivery outcome
//!
//! # Failure semantics
//!
//! A reachable endpoint that rejects the request (non-2xx) fails immediately,
//! with no fallback: the server spoke, and its answer stands. Only
//! transport-level failures (DNS, refused connection, TLS) trigger the opaque
//! fallback, whose response cannot be inspected; completing without a
//! transport error is optimistically counted as delivered so transient
//! connectivity issues do not lose leads. Fallback sends are logged under
//! their own event name because they carry weaker guarantees.

pub mod dispatcher;
pub mod notify;

pub use dispatcher::{DeliveryResult, DeliveryTransport, Dispatcher, HttpTransport, TransportError};
pub use notify::{DispatchNotice, NoopNotificationSink, NotificationSink};
