//! Portal server hosting the operator console and the embeddable widget.
//!
//! One axum router serves both front-ends; all state they display lives in
//! [`portal::PortalServerState`], and every call to the external backend goes
//! through the `BackendClient` seam.

pub mod portal;

pub use portal::{build_portal_router, serve_portal, PortalConfig, PortalServerState};
