//! Test suites for the bridge daemon.

pub(crate) mod support;
