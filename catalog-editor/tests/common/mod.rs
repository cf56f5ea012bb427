//! Scripted in-memory catalog API and controller harness

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_client::{CatalogApi, ClientError, ClientResult};
use catalog_editor::core::{
    AutoConfirm, Collaborators, FormState, NotificationLog, SyncController,
};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{Product, ProductDraft, ProductId, RawProduct, normalize};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Network calls seen by the fake, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(u32),
    Get(ProductId),
    Create(ProductDraft),
    Update(ProductId, ProductDraft),
    Delete(ProductId),
}

#[derive(Default)]
struct FakeState {
    remote: Vec<Product>,
    calls: Vec<Call>,
    failures: VecDeque<ClientError>,
    gates: HashMap<ProductId, Arc<Notify>>,
    next_id: u64,
}

/// Remote catalog kept in memory
///
/// `fail_next` scripts the outcome of the next call; `gate` holds update and
/// delete calls for one id until released.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_products(0)
    }

    /// Remote holds products 1..=count
    pub fn with_products(count: u64) -> Self {
        let remote = (1..=count)
            .map(|id| product(id, &format!("Product {}", id), id * 3))
            .collect();
        Self {
            state: Mutex::new(FakeState {
                remote,
                next_id: 101,
                ..Default::default()
            }),
        }
    }

    pub fn with_remote(products: Vec<Product>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                remote: products,
                next_id: 101,
                ..Default::default()
            }),
        }
    }

    pub fn fail_next(&self, err: ClientError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    /// Id the next create responds with
    pub fn set_next_id(&self, id: u64) {
        self.state.lock().unwrap().next_id = id;
    }

    pub fn gate(&self, id: impl Into<ProductId>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .gates
            .insert(id.into(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: Call) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn wait_gate(&self, id: &ProductId) {
        let gate = self.state.lock().unwrap().gates.get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list(&self, page_size: u32) -> ClientResult<Vec<Product>> {
        self.record(Call::List(page_size))?;
        let state = self.state.lock().unwrap();
        Ok(state.remote.iter().take(page_size as usize).cloned().collect())
    }

    async fn get(&self, id: &ProductId) -> ClientResult<Product> {
        self.record(Call::Get(id.clone()))?;
        let state = self.state.lock().unwrap();
        state
            .remote
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::server_status(404, "Not Found"))
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.record(Call::Create(draft.clone()))?;
        let mut state = self.state.lock().unwrap();
        let id = ProductId::Int(state.next_id);
        state.next_id += 1;
        let product = from_draft(&id, draft)?;
        state.remote.insert(0, product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ClientResult<Product> {
        self.wait_gate(id).await;
        self.record(Call::Update(id.clone(), draft.clone()))?;
        let mut state = self.state.lock().unwrap();
        let product = from_draft(id, draft)?;
        match state.remote.iter_mut().find(|p| &p.id == id) {
            Some(existing) => *existing = product.clone(),
            None => return Err(ClientError::server_status(404, "Not Found")),
        }
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> ClientResult<()> {
        self.wait_gate(id).await;
        self.record(Call::Delete(id.clone()))?;
        let mut state = self.state.lock().unwrap();
        let before = state.remote.len();
        state.remote.retain(|p| &p.id != id);
        if state.remote.len() == before {
            return Err(ClientError::server_status(404, "Not Found"));
        }
        Ok(())
    }
}

fn from_draft(id: &ProductId, draft: &ProductDraft) -> ClientResult<Product> {
    let raw = RawProduct {
        id: Some(Value::from(id)),
        title: Some(draft.title.clone().into()),
        price: Some(draft.price.to_string().into()),
        category: Some(draft.category.clone().into()),
        stock: Some(draft.stock.into()),
        image: draft.image.clone().map(Value::from),
        ..Default::default()
    };
    Ok(normalize(&raw)?)
}

pub fn product(id: u64, title: &str, stock: u64) -> Product {
    normalize(&RawProduct {
        id: Some(id.into()),
        title: Some(title.into()),
        price: Some(Value::from(9.99)),
        category: Some("groceries".into()),
        stock: Some(stock.into()),
        ..Default::default()
    })
    .unwrap()
}

pub fn draft(title: &str, cents: i64, stock: i64) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        category: "beauty".to_string(),
        image: None,
        stock,
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifications: Rc<NotificationLog>,
    pub form: Rc<FormState>,
    pub controller: SyncController<FakeApi>,
}

pub fn harness(api: FakeApi) -> Harness {
    harness_with_confirm(api, true)
}

pub fn harness_with_confirm(api: FakeApi, confirm: bool) -> Harness {
    let api = Arc::new(api);
    let notifications = Rc::new(NotificationLog::new());
    let form = Rc::new(FormState::new());
    let controller = SyncController::new(
        api.clone(),
        Collaborators {
            notifier: notifications.clone(),
            editor: form.clone(),
            confirmer: Rc::new(AutoConfirm(confirm)),
        },
        10,
    );
    Harness {
        api,
        notifications,
        form,
        controller,
    }
}
