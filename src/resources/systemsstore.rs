//! Registry of the state hooks.
//!
//! State enter/exit hooks are registered as one-shot systems under the names
//! in [`hooks`] and looked up by the game state observer, which runs them
//! via their [`SystemId`]. This keeps the state machine ignorant of what the
//! hooks actually do.

use bevy_ecs::prelude::{IntoSystem, Resource, World};
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Well-known hook names.
pub mod hooks {
    pub const SETUP: &str = "setup";
    pub const ENTER_START: &str = "enter_start";
    pub const ENTER_PLAY: &str = "enter_play";
    pub const EXIT_PLAY: &str = "exit_play";
    pub const ENTER_GAMEOVER: &str = "enter_gameover";
    pub const QUIT_GAME: &str = "quit_game";
}

/// Map of hook names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    /// Register `system` with `world` and remember it under `name`.
    pub fn register<M, S>(&mut self, world: &mut World, name: impl Into<String>, system: S) -> SystemId
    where
        S: IntoSystem<(), (), M> + 'static,
    {
        let id = world.register_system(system);
        self.insert(name, id);
        id
    }

    /// Insert a system ID under a name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::*;

    #[derive(Resource, Default)]
    struct Counter(u32);

    fn bump(mut counter: ResMut<Counter>) {
        counter.0 += 1;
    }

    #[test]
    fn registered_hook_runs_by_name() {
        let mut world = World::new();
        world.init_resource::<Counter>();
        let mut store = SystemsStore::new();
        store.register(&mut world, hooks::ENTER_PLAY, bump);
        assert_eq!(store.len(), 1);

        let id = *store.get(hooks::ENTER_PLAY).unwrap();
        world.run_system(id).unwrap();
        assert_eq!(world.resource::<Counter>().0, 1);
        assert!(store.get(hooks::EXIT_PLAY).is_none());
    }
}
