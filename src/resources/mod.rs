//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – definitions for animation sequences reused across entities
//! - `gameconfig` – INI-backed settings for the grid, budget and tick rate
//! - `gamestate` – authoritative and pending high-level game state
//! - `gridfill` – layered grid filled a budgeted slice at a time
//! - `loadingbar` – textual progress of the load phase
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `tileregistry` – floor tile producer coloured by angle around the centre
//! - `workbudget` – millisecond budgets over an injectable clock
//! - `worldtime` – tick count, elapsed time and delta
pub mod animationstore;
pub mod gameconfig;
pub mod gamestate;
pub mod gridfill;
pub mod loadingbar;
pub mod systemsstore;
pub mod tileregistry;
pub mod workbudget;
pub mod worldtime;
