//! One rendered projection: its units, placeholder and pending transitions

use super::node::Node;
use super::{Layout, Placeholder, ProjectionKind};
use shared::{Product, ProductId};
use std::time::Duration;

/// Length of the fade applied to removed units
pub const REMOVE_FADE: Duration = Duration::from_millis(300);

/// A rendered product inside a projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: ProductId,
    pub node: Node,
    /// Render pass that produced `node`; unchanged units keep their revision
    pub revision: u64,
}

/// Cosmetic effect the host may play; the unit is already gone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub projection: ProjectionKind,
    pub id: ProductId,
    pub node: Node,
    pub fade: Duration,
}

pub struct Surface {
    layout: Box<dyn Layout>,
    units: Vec<Unit>,
    placeholder: Option<Placeholder>,
    next_revision: u64,
    transitions: Vec<Transition>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("kind", &self.layout.kind())
            .field("units", &self.units.len())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

impl Surface {
    pub fn new(layout: Box<dyn Layout>) -> Self {
        Self {
            layout,
            units: Vec::new(),
            placeholder: None,
            next_revision: 1,
            transitions: Vec::new(),
        }
    }

    pub fn kind(&self) -> ProjectionKind {
        self.layout.kind()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: &ProductId) -> Option<&Unit> {
        self.units.iter().find(|u| &u.id == id)
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    pub fn is_empty_state_visible(&self) -> bool {
        self.placeholder == Some(Placeholder::Empty)
    }

    /// Exactly one up-to-date unit per product, in order, and the empty
    /// state only when there is nothing to show
    pub fn mirrors(&self, products: &[Product]) -> bool {
        self.units.len() == products.len()
            && self
                .units
                .iter()
                .zip(products)
                .all(|(unit, product)| unit.id == product.id && unit.node == self.layout.render_unit(product))
            && self.is_empty_state_visible() == products.is_empty()
    }

    pub(super) fn clear(&mut self, placeholder: Option<Placeholder>) {
        self.units.clear();
        self.placeholder = placeholder;
    }

    pub(super) fn render_all(&mut self, products: &[Product]) {
        self.units = products.iter().map(|p| self.render(p)).collect();
        self.refresh_empty_state();
    }

    pub(super) fn prepend(&mut self, product: &Product) {
        if let Some(index) = self.position(&product.id) {
            tracing::warn!(projection = ?self.kind(), id = %product.id, "Dropping stale unit before insert");
            self.units.remove(index);
        }
        // A loading indicator stays until the listing completes
        if self.placeholder == Some(Placeholder::Empty) {
            self.placeholder = None;
        }
        let unit = self.render(product);
        self.units.insert(0, unit);
    }

    pub(super) fn replace(&mut self, product: &Product) -> bool {
        let Some(index) = self.position(&product.id) else {
            return false;
        };
        let unit = self.render(product);
        self.units[index] = unit;
        true
    }

    pub(super) fn remove(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let unit = self.units.remove(index);
        self.transitions.push(Transition {
            projection: self.kind(),
            id: unit.id,
            node: unit.node,
            fade: REMOVE_FADE,
        });
        self.refresh_empty_state();
        true
    }

    pub(super) fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    /// Show the empty-state placeholder iff there is nothing else to show
    fn refresh_empty_state(&mut self) {
        self.placeholder = self.units.is_empty().then_some(Placeholder::Empty);
    }

    fn render(&mut self, product: &Product) -> Unit {
        let revision = self.next_revision;
        self.next_revision += 1;
        Unit {
            id: product.id.clone(),
            node: self.layout.render_unit(product),
            revision,
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.units.iter().position(|u| &u.id == id)
    }

    pub fn to_html(&self) -> String {
        match self.placeholder {
            Some(placeholder) => self.layout.render_placeholder(placeholder).to_html(),
            None => self.units.iter().map(|u| u.node.to_html()).collect(),
        }
    }
}
