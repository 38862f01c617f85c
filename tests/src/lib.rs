//! Integration tests for netzap, driven through a scripted [`CommandRunner`].
//!
//! [`CommandRunner`]: netzap_common::runner::CommandRunner

pub mod support;

#[cfg(test)]
mod facade;
#[cfg(test)]
mod service;
