//! quadro-core: the data core of a local-first kanban board.
//!
//! Boards contain ordered columns, columns contain ordered cards, cards carry
//! labels/links/todos, and boards have cosmetic themes. The crate provides:
//!
//! - [`store::EntityStore`]: the in-memory relational store with cascading
//!   mutation rules, write-through to an injected [`storage::Persistence`]
//!   port.
//! - [`merge`]: the board export format and the import/merge engine that
//!   reconciles an external export into the store (`new` or `overwrite`
//!   policy, label deduplication by title/color identity).
//! - [`search`]: fuzzy search offloaded to a background worker task behind a
//!   correlated request/response channel.

pub mod merge;
pub mod search;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;
