use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Failures raised by the record store itself rather than by an entity's rules.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{0} store is closed")]
    ActorClosed(&'static str),
    #[error("{0} store dropped the request")]
    ActorDropped(&'static str),
}

/// Trait that any domain record must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Debug;
    type Patch: Send + Debug;
    type Action: Send + Debug;
    type ActionResult: Send + Debug;
    type Error: From<StoreError> + Send + Debug;

    /// Name used in logs and not-found errors.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from the server-assigned id and the payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    /// Rejects a write that would collide with `other`, an existing record.
    fn check_unique(&self, _other: &Self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a domain-specific mutation. Runs inside the actor, so the check
    /// and the write it guards happen as one step.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Select {
        filter: Filter<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    // Insertion order, so listings are stable.
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
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    pub async fn run(mut self) {
        info!(kind = T::KIND, "Store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Select { filter, respond_to } => {
                    let items = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id))
                        .filter(|item| filter(item))
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action),
                        None => Err(not_found::<T>(&id)),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!(kind = T::KIND, "Store stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, T::Error> {
        let id = (self.next_id_fn)();
        let item = T::from_create(id.clone(), payload)?;
        self.ensure_unique(&item)?;
        self.store.insert(id.clone(), item.clone());
        self.order.push(id.clone());
        debug!(kind = T::KIND, id = %id, "Record created");
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let mut item = self.store.get(&id).cloned().ok_or_else(|| not_found::<T>(&id))?;
        item.on_update(patch)?;
        self.ensure_unique(&item)?;
        self.store.insert(id.clone(), item.clone());
        debug!(kind = T::KIND, id = %id, "Record updated");
        Ok(item)
    }

    fn ensure_unique(&self, candidate: &T) -> Result<(), T::Error> {
        for other in self.store.values().filter(|other| other.id() != candidate.id()) {
            if let Err(e) = candidate.check_unique(other) {
                warn!(kind = T::KIND, id = %candidate.id(), "Uniqueness check failed");
                return Err(e);
            }
        }
        Ok(())
    }
}

fn not_found<T: Entity>(id: &T::Id) -> T::Error {
    StoreError::NotFound { kind: T::KIND, id: id.to_string() }.into()
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derive would demand `T: Clone` bounds on the associated types.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed(T::KIND))?;
        response.await.map_err(|_| StoreError::ActorDropped(T::KIND))?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn select(&self, filter: impl Fn(&T) -> bool + Send + 'static) -> Result<Vec<T>, T::Error> {
        let filter: Filter<T> = Box::new(filter);
        self.request(|respond_to| ResourceRequest::Select { filter, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        self.select(|_| true).await
    }

    pub async fn find(&self, filter: impl Fn(&T) -> bool + Send + 'static) -> Result<Option<T>, T::Error> {
        Ok(self.select(filter).await?.into_iter().next())
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: String,
        label: String,
        items: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
    }

    #[derive(Debug)]
    struct ShelfPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Stock(u32),
        Take(u32),
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    enum ShelfError {
        #[error("label taken: {0}")]
        LabelTaken(String),
        #[error("shelf has only {0} items")]
        Short(u32),
        #[error(transparent)]
        Store(#[from] StoreError),
    }

    impl Entity for Shelf {
        type Id = String;
        type CreatePayload = ShelfCreate;
        type Patch = ShelfPatch;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Error = ShelfError;

        const KIND: &'static str = "shelf";

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, payload: ShelfCreate) -> Result<Self, ShelfError> {
            Ok(Self { id, label: payload.label, items: 0 })
        }

        fn on_update(&mut self, patch: ShelfPatch) -> Result<(), ShelfError> {
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn check_unique(&self, other: &Self) -> Result<(), ShelfError> {
            if self.label == other.label {
                return Err(ShelfError::LabelTaken(self.label.clone()));
            }
            Ok(())
        }

        fn handle_action(&mut self, action: ShelfAction) -> Result<u32, ShelfError> {
            match action {
                ShelfAction::Stock(n) => self.items += n,
                ShelfAction::Take(n) if n > self.items => return Err(ShelfError::Short(self.items)),
                ShelfAction::Take(n) => self.items -= n,
            }
            Ok(self.items)
        }
    }

    fn spawn_store() -> ResourceClient<Shelf> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("shelf_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    // --- Test ---

    #[tokio::test]
    async fn test_create_assigns_server_ids_and_lists_in_order() {
        let client = spawn_store();

        let a = client.create(ShelfCreate { label: "fruit".into() }).await.unwrap();
        let b = client.create(ShelfCreate { label: "dairy".into() }).await.unwrap();
        assert_eq!(a.id, "shelf_1");
        assert_eq!(b.id, "shelf_2");

        let labels: Vec<String> = client.list().await.unwrap().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["fruit", "dairy"]);

        let found = client.find(|s| s.label == "dairy").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some("shelf_2".to_string()));
    }

    #[tokio::test]
    async fn test_uniqueness_is_checked_on_create_and_update() {
        let client = spawn_store();
        client.create(ShelfCreate { label: "fruit".into() }).await.unwrap();
        let dairy = client.create(ShelfCreate { label: "dairy".into() }).await.unwrap();

        let dup = client.create(ShelfCreate { label: "fruit".into() }).await;
        assert_eq!(dup, Err(ShelfError::LabelTaken("fruit".into())));

        let rename = client.update(dairy.id.clone(), ShelfPatch { label: Some("fruit".into()) }).await;
        assert_eq!(rename, Err(ShelfError::LabelTaken("fruit".into())));

        // Failed update leaves the record untouched
        let dairy_now = client.get(dairy.id.clone()).await.unwrap().unwrap();
        assert_eq!(dairy_now.label, "dairy");

        // Renaming a record to its own label is not a collision
        let same = client.update(dairy.id.clone(), ShelfPatch { label: Some("dairy".into()) }).await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn test_actions_and_missing_records() {
        let client = spawn_store();
        let shelf = client.create(ShelfCreate { label: "fruit".into() }).await.unwrap();

        assert_eq!(client.perform_action(shelf.id.clone(), ShelfAction::Stock(5)).await, Ok(5));
        assert_eq!(client.perform_action(shelf.id.clone(), ShelfAction::Take(7)).await, Err(ShelfError::Short(5)));
        assert_eq!(client.perform_action(shelf.id.clone(), ShelfAction::Take(2)).await, Ok(3));

        let missing = client.perform_action("nope".into(), ShelfAction::Stock(1)).await;
        assert_eq!(
            missing,
            Err(ShelfError::Store(StoreError::NotFound { kind: "shelf", id: "nope".into() }))
        );
        let missing = client.update("nope".into(), ShelfPatch { label: None }).await;
        assert!(matches!(missing, Err(ShelfError::Store(StoreError::NotFound { .. }))));
    }
}
