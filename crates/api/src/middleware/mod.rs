//! Response middleware.
//!
//! - [`alert::alert_headers`] -- Renders the [`alert::Alert`] a handler or
//!   error attached to its response as `X-<application>-*` headers.

pub mod alert;
