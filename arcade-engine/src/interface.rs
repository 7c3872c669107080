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
//! Host collaborator interfaces
//!
//! The engine core never draws, loads files, or reads devices. Hosts
//! implement these traits and wire them into their own Systems; a renderer
//! is conventionally a System at [`priorities::RENDER`] that reads `Sprite`,
//! `Position`, and `Size` components after all simulation has run.
//!
//! [`priorities::RENDER`]: crate::ecs::priorities::RENDER

/// Resolves opaque asset keys to loaded assets.
///
/// `Sprite` components carry only the key; what an asset is (a texture, a
/// sound, an animation sheet) is the host's business.
pub trait AssetLoader {
    /// The host's loaded asset type.
    type Asset;

    /// Look up an asset by key, `None` when it is not loaded.
    fn get_asset(&self, key: &str) -> Option<&Self::Asset>;
}

/// Samples host input devices.
///
/// Key codes are host-defined; the engine never interprets them.
pub trait InputSource {
    /// True while the key is held down.
    fn is_down(&self, code: u32) -> bool;

    /// True on the first sample after the key was released.
    fn was_released(&self, code: u32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLoader {
        assets: HashMap<String, u32>,
    }

    impl AssetLoader for MapLoader {
        type Asset = u32;

        fn get_asset(&self, key: &str) -> Option<&u32> {
            self.assets.get(key)
        }
    }

    #[test]
    fn test_asset_loader_lookup() {
        let mut assets = HashMap::new();
        assets.insert("hero".to_string(), 7);
        let loader = MapLoader { assets };

        assert_eq!(loader.get_asset("hero"), Some(&7));
        assert_eq!(loader.get_asset("missing"), None);
    }
}
