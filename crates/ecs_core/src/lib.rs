//! # ecs_core
//!
//! A minimal single-process ECS runtime: a registry that stores
//! entities as bags of typed data components and drives a fixed
//! sequence of systems over them once per tick.
//!
//! This crate provides:
//!
//! - [`Component`] trait and [`KindId`] — the typed-data contract and
//!   its stable type tag.
//! - [`Entity`] / [`EntityAllocator`] — monotonic, never-reused `u64`
//!   identifiers.
//! - [`KindSet`] / [`Filter`] — per-entity capability bitmasks and the
//!   subset-test capability filter systems declare.
//! - [`World`] — ordered live-entity storage with per-kind sparse
//!   columns; creation, attachment, lookup, and identity-based removal.
//! - [`System`] / [`Schedule`] — the per-tick processing contract and
//!   the registration-order executor.
//! - [`Runtime`] — the facade owning world + schedule with the single
//!   `update(delta)` entry point.
//!
//! ## Scheduling contract
//!
//! One call to [`Runtime::update`] is one tick: every registered system
//! runs exactly once, in registration order, each pass over a fresh
//! snapshot of the entities matching its filter. Component mutations
//! made by an earlier system are visible to every later system in the
//! same tick; an entity removed mid-tick is not handed to any
//! subsequent system, while the removing system's own snapshot stays
//! stable for the rest of its pass.

pub mod builder;
pub mod component;
pub mod entity;
pub mod kind;
pub mod runtime;
pub mod schedule;
pub mod system;
pub mod world;

pub use builder::EntityBuilder;
pub use component::{Component, KindId};
pub use entity::{Entity, EntityAllocator};
pub use kind::{Filter, KindSet, KindTable, MAX_KINDS};
pub use runtime::Runtime;
pub use schedule::Schedule;
pub use system::System;
pub use world::{World, WorldError};
