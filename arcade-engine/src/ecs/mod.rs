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
//! Entity-component-system core
//!
//! Entities are integer ids, components are typed data records, and Systems
//! are per-frame behaviors matched to entities by capability mask. The
//! [`EntityStore`] ties the three together and drives the frame loop.

mod component;
pub mod components;
mod entity;
mod mask;
mod registry;
mod store;
mod system;

pub use component::{Component, ComponentArena, ComponentData, ComponentKind};
pub use entity::EntityId;
pub use mask::{CapabilityMask, MAX_COMPONENT_TYPES};
pub use registry::{ComponentFactory, ComponentRegistry};
pub use store::EntityStore;
pub use system::{priorities, System};
