// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Arcade Engine
//!
//! An entity-component-system runtime for real-time 2D games, with
//! narrow-phase collision detection and impulse-based resolution built in.
//!
//! Entities are integer ids. Components are typed data records whose
//! registered bits form a per-entity capability mask, and Systems declare a
//! required mask and run each frame over exactly the entities whose mask is
//! a superset. One [`EntityStore::update`] call advances the whole
//! simulation by a frame.
//!
//! The engine simulates; it does not render, load assets, or read input.
//! Hosts supply those through the traits in [`interface`] and their own
//! Systems.
//!
//! ## Example
//!
//! ```
//! use arcade_engine::ecs::components::{Position, Velocity};
//! use arcade_engine::ecs::{ComponentData, ComponentRegistry, EntityStore};
//! use arcade_engine::physics::MovementSystem;
//!
//! let mut registry = ComponentRegistry::new();
//! let positions = registry
//!     .register(ComponentData::Position(Position::default()))
//!     .unwrap();
//! let velocities = registry
//!     .register(ComponentData::Velocity(Velocity::new(60.0, 0.0)))
//!     .unwrap();
//!
//! let mut store = EntityStore::new();
//! store.add_system(Box::new(MovementSystem::new(
//!     positions.mask().union(&velocities.mask()),
//! )));
//!
//! let runner = store.create_entity(vec![positions.create(), velocities.create()]);
//!
//! // One 16ms frame moves the runner ~1 pixel.
//! store.update(16.0);
//! # assert!(store.is_living(runner));
//! ```
//!
//! Coordinates are screen-style throughout: x grows right, y grows down,
//! positive gravity pulls toward the floor.

#![warn(missing_docs)]

pub mod collision;
pub mod ecs;
pub mod error;
pub mod interface;
pub mod physics;

pub use ecs::{CapabilityMask, EntityId, EntityStore, System};
pub use error::EngineError;
