//! Editing surface and delete confirmation collaborators
//!
//! The form itself (fields, validation, create vs. update mode) lives in the
//! host; the controller only drives the affordances it needs while a request
//! is in flight.

use crate::core::projector::ErrorPanel;
use async_trait::async_trait;
use shared::{Product, ProductDraft};
use std::cell::{Cell, RefCell};

pub const SAVE_LABEL: &str = "Save Product";
pub const UPDATE_LABEL: &str = "Update Product";
pub const ADDING_LABEL: &str = "Adding...";
pub const UPDATING_LABEL: &str = "Updating...";

pub trait EditingSurface {
    /// Enable or disable every form control, submit included
    fn set_controls_enabled(&self, enabled: bool);
    fn submit_label(&self) -> String;
    fn set_submit_label(&self, label: &str);
    fn close(&self);
    /// Product data is being fetched for editing
    fn show_loading(&self);
    /// Fill the form for editing
    fn populate(&self, product: &Product);
    fn show_load_error(&self, panel: &ErrorPanel);
}

/// Blocking confirmation for irreversible actions
#[async_trait(?Send)]
pub trait Confirmer {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every confirmation the same way
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait(?Send)]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// What the editing surface currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Closed,
    Loading,
    Editing,
    LoadFailed(ErrorPanel),
}

/// In-memory editing surface
#[derive(Debug)]
pub struct FormState {
    controls_enabled: Cell<bool>,
    submit_label: RefCell<String>,
    view: RefCell<FormView>,
    draft: RefCell<Option<ProductDraft>>,
    control_history: RefCell<Vec<bool>>,
    label_history: RefCell<Vec<String>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            controls_enabled: Cell::new(true),
            submit_label: RefCell::new(SAVE_LABEL.to_string()),
            view: RefCell::new(FormView::Closed),
            draft: RefCell::new(None),
            control_history: RefCell::new(Vec::new()),
            label_history: RefCell::new(Vec::new()),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form in create mode
    pub fn open_for_create(&self) {
        *self.view.borrow_mut() = FormView::Editing;
        *self.draft.borrow_mut() = None;
        *self.submit_label.borrow_mut() = SAVE_LABEL.to_string();
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled.get()
    }

    pub fn view(&self) -> FormView {
        self.view.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        *self.view.borrow() != FormView::Closed
    }

    pub fn draft(&self) -> Option<ProductDraft> {
        self.draft.borrow().clone()
    }

    /// Every enable/disable call, in order
    pub fn control_history(&self) -> Vec<bool> {
        self.control_history.borrow().clone()
    }

    /// Every label set by the controller, in order
    pub fn label_history(&self) -> Vec<String> {
        self.label_history.borrow().clone()
    }
}

impl EditingSurface for FormState {
    fn set_controls_enabled(&self, enabled: bool) {
        self.controls_enabled.set(enabled);
        self.control_history.borrow_mut().push(enabled);
    }

    fn submit_label(&self) -> String {
        self.submit_label.borrow().clone()
    }

    fn set_submit_label(&self, label: &str) {
        *self.submit_label.borrow_mut() = label.to_string();
        self.label_history.borrow_mut().push(label.to_string());
    }

    fn close(&self) {
        *self.view.borrow_mut() = FormView::Closed;
        *self.draft.borrow_mut() = None;
        *self.submit_label.borrow_mut() = SAVE_LABEL.to_string();
    }

    fn show_loading(&self) {
        *self.view.borrow_mut() = FormView::Loading;
    }

    fn populate(&self, product: &Product) {
        *self.draft.borrow_mut() = Some(ProductDraft::from_product(product));
        *self.submit_label.borrow_mut() = UPDATE_LABEL.to_string();
        *self.view.borrow_mut() = FormView::Editing;
    }

    fn show_load_error(&self, panel: &ErrorPanel) {
        *self.view.borrow_mut() = FormView::LoadFailed(panel.clone());
    }
}
