use std::{cell::RefCell, collections::BTreeSet, future::Future, rc::Rc};

use tokio::task::LocalSet;
use toastkit::{Config, Host, Placement, ToastId, ToastManager, ToastView, Transition};

/// Host keeping the set of live nodes, like a page's toast container.
#[derive(Clone, Default)]
pub struct Container {
    pub nodes: Rc<RefCell<BTreeSet<ToastId>>>,
    pub exits: Rc<RefCell<Vec<ToastId>>>,
}

impl Host for Container {
    fn place_container(&mut self, _placement: &Placement) {}

    fn create(&mut self, view: &ToastView) {
        self.nodes.borrow_mut().insert(view.id.clone());
    }

    fn update(&mut self, _view: &ToastView) {}

    fn transition(&mut self, id: &ToastId, transition: Transition) {
        if let Transition::Exit(_) = transition {
            self.exits.borrow_mut().push(id.clone());
        }
    }

    fn remove(&mut self, id: &ToastId) {
        self.nodes.borrow_mut().remove(id);
    }
}

pub fn manager(config: Config) -> (ToastManager<Container>, Container) {
    let container = Container::default();
    (ToastManager::new(container.clone(), config), container)
}

pub async fn local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}
