use bevy::asset::{AssetServer, LoadState, UntypedAssetId};
use std::collections::HashMap;

/// Observed state of an asynchronous load. A resource goes from `Pending` to
/// exactly one of `Ready` or `Failed` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    Pending,
    Ready,
    Failed,
}

/// Poll Bevy's asset server for a handle's load state, dependencies included.
pub fn resource_status(asset_server: &AssetServer, id: impl Into<UntypedAssetId>) -> ResourceStatus {
    let id = id.into();
    if asset_server.is_loaded_with_dependencies(id) {
        return ResourceStatus::Ready;
    }
    match asset_server.get_load_state(id) {
        Some(LoadState::Failed(_)) => ResourceStatus::Failed,
        _ => ResourceStatus::Pending,
    }
}

/// Load cache keyed by source path.
///
/// Requests for a path that is already cached return the existing handle, so
/// concurrent requests during a pending load coalesce into one decode. Entries
/// live for the whole process.
#[derive(Debug)]
pub struct ResourceCache<H> {
    entries: HashMap<String, H>,
    loads_started: usize,
}

impl<H> Default for ResourceCache<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            loads_started: 0,
        }
    }
}

impl<H: Clone> ResourceCache<H> {
    /// Return the cached handle for `path`, starting a load only on first request.
    pub fn get_or_load(&mut self, path: &str, load: impl FnOnce(&str) -> H) -> H {
        if let Some(handle) = self.entries.get(path) {
            return handle.clone();
        }
        let handle = load(path);
        self.loads_started += 1;
        self.entries.insert(path.to_string(), handle.clone());
        handle
    }

    pub fn get(&self, path: &str) -> Option<&H> {
        self.entries.get(path)
    }

    /// Number of loads actually started since creation.
    pub fn loads_started(&self) -> usize {
        self.loads_started
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_requests_coalesce_into_one_load() {
        let mut cache = ResourceCache::<u32>::default();
        let mut next = 0;
        let mut load = |_: &str| {
            next += 1;
            next
        };

        let first = cache.get_or_load("models/a.glb", &mut load);
        let second = cache.get_or_load("models/a.glb", &mut load);

        assert_eq!(first, second);
        assert_eq!(cache.loads_started(), 1);
    }

    #[test]
    fn distinct_paths_load_separately() {
        let mut cache = ResourceCache::<&'static str>::default();
        cache.get_or_load("a", |_| "A");
        cache.get_or_load("b", |_| "B");

        assert_eq!(cache.loads_started(), 2);
        assert_eq!(cache.get("b"), Some(&"B"));
        assert!(cache.get("c").is_none());
    }
}
