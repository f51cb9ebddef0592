//! Persistent tree-navigation state.
//!
//! A tree is an ordered list of named nodes, each with an `expanded` flag and
//! children. Mutations ([`domain::expand_all`], [`domain::collapse_all`],
//! [`domain::set_expanded`]) never modify their input; they return a new
//! version that shares every untouched subtree with the old one.
//!
//! Layers:
//! - [`domain`]: entities, mutations, queries, builder
//! - [`application`]: navigation session, lazy loading, rendering, tree files
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: the `treenav` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
