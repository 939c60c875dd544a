//! Observer port for scene change notifications.

use crate::scene::Scene;
use std::cell::RefCell;
use std::rc::Rc;

/// A listener notified synchronously whenever the scene changes.
///
/// Observers receive a shared reference: they re-read whatever state they
/// display and must return quickly.
pub trait SceneObserver {
    fn on_scene_changed(&mut self, scene: &Scene);
}

/// Handle returned by [`Scene::register_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Observer backed by a closure.
pub struct FnObserver<F>(F);

impl<F: FnMut(&Scene)> SceneObserver for FnObserver<F> {
    fn on_scene_changed(&mut self, scene: &Scene) {
        (self.0)(scene)
    }
}

/// Wrap a closure as an observer.
pub fn from_fn<F: FnMut(&Scene)>(f: F) -> FnObserver<F> {
    FnObserver(f)
}

/// Shared observers, so the owner can keep reading the state it updates.
impl<T: SceneObserver + ?Sized> SceneObserver for Rc<RefCell<T>> {
    fn on_scene_changed(&mut self, scene: &Scene) {
        self.borrow_mut().on_scene_changed(scene);
    }
}
