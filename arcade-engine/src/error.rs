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
//! Engine error taxonomy
//!
//! Both variants are configuration errors: they can only occur while a scene
//! is being set up (mask sizing, component-type registration). Once the frame
//! loop is running no engine operation returns an error; runtime degradations
//! are logged and continue with a safe default instead.

use thiserror::Error;

/// Errors raised during engine configuration.
///
/// A configuration error is fatal to the registration that produced it but
/// never corrupts state that was already set up.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A capability-mask bit beyond the fixed mask width was requested.
    #[error("capability mask capacity exceeded: bit {bit} is out of range for {capacity} component types")]
    CapacityExceeded {
        /// The bit index that was requested.
        bit: usize,
        /// The fixed number of bits the mask can hold.
        capacity: usize,
    },

    /// The component registry's bit budget is exhausted.
    ///
    /// Raised at registration time, never at component creation or mid-frame.
    #[error("too many component types: bit budget of {budget} exhausted")]
    TooManyComponentTypes {
        /// The configured number of distinct component types.
        budget: usize,
    },
}
