use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks, DTOs, and actions)
// =============================================================================

/// Trait any domain entity must implement to be managed by a [`ResourceActor`].
///
/// Entities own their state transitions: the actor only routes messages and
/// guards the store. Every hook runs to completion inside the actor loop, so
/// a caller never observes an entity mid-mutation.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Domain-specific commands beyond plain CRUD.
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated id and a payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;

    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Handle a domain-specific action against the stored entity.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, String>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Generic in-memory resource server. One instance owns the store for one
/// entity type; all access goes through the request channel, so there is a
/// single writer and no locking.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    // Insertion order, so List is stable for rendering/invoicing consumers.
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    /// Runs until every client handle is dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }
        debug!("Resource actor channel closed, stopping");
    }

    fn handle(&mut self, msg: ResourceRequest<T>) {
        match msg {
            ResourceRequest::Create { payload, respond_to } => {
                let id = (self.next_id_fn)();
                match T::from_create(id.clone(), payload) {
                    Ok(item) => {
                        self.store.insert(id.clone(), item);
                        self.order.push(id.clone());
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        let _ = respond_to.send(Err(e));
                    }
                }
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::List { respond_to } => {
                let items = self
                    .order
                    .iter()
                    .filter_map(|id| self.store.get(id).cloned())
                    .collect();
                let _ = respond_to.send(Ok(items));
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                if let Some(item) = self.store.get_mut(&id) {
                    match item.on_update(patch) {
                        Ok(()) => {
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                } else {
                    let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                }
            }
            ResourceRequest::Delete { id, respond_to } => {
                if let Some(item) = self.store.get(&id) {
                    if let Err(e) = item.on_delete() {
                        let _ = respond_to.send(Err(e));
                        return;
                    }
                    self.store.remove(&id);
                    self.order.retain(|known| known != &id);
                    let _ = respond_to.send(Ok(()));
                } else {
                    let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                }
            }
            ResourceRequest::Action { id, action, respond_to } => {
                if let Some(item) = self.store.get_mut(&id) {
                    let result = item.handle_action(action);
                    let _ = respond_to.send(result);
                } else {
                    let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub fn from_sender(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, String> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, String> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, String> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, String> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), String> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, String> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}

// =============================================================================
// 5. FRAMEWORK TESTS
// =============================================================================
