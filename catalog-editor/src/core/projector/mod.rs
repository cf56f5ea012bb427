//! View Projector - keeps the card grid and the table isomorphic to the store
//!
//! Both projections sit behind the [`Layout`] interface; every patch is one
//! loop over the two surfaces.
//!
//! Patches look units up by id before writing; a completion for a record
//! that is no longer displayed is a no-op.

pub mod card;
pub mod node;
pub mod surface;
pub mod table;

pub use card::{CARD_TITLE_LIMIT, CardLayout};
pub use node::{Child, Node};
pub use surface::{REMOVE_FADE, Surface, Transition, Unit};
pub use table::{TABLE_TITLE_LIMIT, TableLayout};

use crate::utils::text::truncate_with_ellipsis;
use shared::{Product, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    Cards,
    Table,
}

/// Content shown instead of units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Empty,
    Loading,
}

/// How one projection renders products and placeholders
pub trait Layout {
    fn kind(&self) -> ProjectionKind;
    fn render_unit(&self, product: &Product) -> Node;
    fn render_placeholder(&self, placeholder: Placeholder) -> Node;
}

/// Follow-up offered by an error panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    RetryList,
    StartFresh,
    RetryEdit(ProductId),
    Dismiss,
}

impl PanelAction {
    pub fn key(&self) -> &'static str {
        match self {
            Self::RetryList => "retry-list",
            Self::StartFresh => "start-fresh",
            Self::RetryEdit(_) => "retry-edit",
            Self::Dismiss => "dismiss",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RetryList | Self::RetryEdit(_) => "Try Again",
            Self::StartFresh => "Start Fresh",
            Self::Dismiss => "Cancel",
        }
    }
}

/// Inline failure report with recovery actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    pub detail: String,
    pub actions: Vec<PanelAction>,
}

impl ErrorPanel {
    pub fn render(&self) -> Node {
        let actions = self.actions.iter().fold(
            Node::new("div").class("d-flex gap-2 justify-content-center mt-4"),
            |row, action| {
                row.child(
                    Node::new("button")
                        .class("btn btn-outline-primary")
                        .attr("data-action", action.key())
                        .text(action.label()),
                )
            },
        );

        Node::new("div")
            .class("col-12 text-center py-5 error-panel")
            .child(Node::new("h4").class("text-muted mt-3").text(self.title.as_str()))
            .child(Node::new("p").class("text-muted").text(self.message.as_str()))
            .child(Node::new("p").class("text-danger small").text(self.detail.as_str()))
            .child(actions)
    }
}

pub struct ViewProjector {
    surfaces: [Surface; 2],
    error_panel: Option<ErrorPanel>,
    visible: ProjectionKind,
}

impl std::fmt::Debug for ViewProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewProjector")
            .field("surfaces", &self.surfaces)
            .field("error_panel", &self.error_panel)
            .field("visible", &self.visible)
            .finish()
    }
}

impl Default for ViewProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewProjector {
    pub fn new() -> Self {
        Self {
            surfaces: [
                Surface::new(Box::new(CardLayout)),
                Surface::new(Box::new(TableLayout)),
            ],
            error_panel: None,
            visible: ProjectionKind::Cards,
        }
    }

    /// Full re-render of both projections
    pub fn render_all(&mut self, products: &[Product]) {
        for surface in &mut self.surfaces {
            surface.render_all(products);
        }
        tracing::debug!(count = products.len(), "Rendered all products");
    }

    /// Clear both projections and show the loading indicator
    pub fn show_loading(&mut self) {
        self.error_panel = None;
        for surface in &mut self.surfaces {
            surface.clear(Some(Placeholder::Loading));
        }
    }

    pub fn show_error(&mut self, panel: ErrorPanel) {
        self.error_panel = Some(panel);
    }

    pub fn clear_error(&mut self) {
        self.error_panel = None;
    }

    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        self.error_panel.as_ref()
    }

    pub fn patch_insert(&mut self, product: &Product) {
        for surface in &mut self.surfaces {
            surface.prepend(product);
        }
        tracing::debug!(id = %product.id, "Inserted product unit");
    }

    /// Replace the unit for `product.id` in place; false if it is not shown
    pub fn patch_replace(&mut self, product: &Product) -> bool {
        let mut replaced = true;
        for surface in &mut self.surfaces {
            replaced &= surface.replace(product);
        }
        if replaced {
            tracing::debug!(id = %product.id, "Replaced product unit");
        } else {
            tracing::debug!(id = %product.id, "No unit to replace");
        }
        replaced
    }

    /// Remove the unit for `id` and queue its fade-out; false if it is not shown
    pub fn patch_remove(&mut self, id: &ProductId) -> bool {
        let mut removed = true;
        for surface in &mut self.surfaces {
            removed &= surface.remove(id);
        }
        tracing::debug!(id = %id, removed, "Removed product unit");
        removed
    }

    /// Fade-outs queued since the last call
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        self.surfaces
            .iter_mut()
            .flat_map(|surface| surface.take_transitions())
            .collect()
    }

    pub fn surface(&self, kind: ProjectionKind) -> &Surface {
        match kind {
            ProjectionKind::Cards => &self.surfaces[0],
            ProjectionKind::Table => &self.surfaces[1],
        }
    }

    pub fn cards(&self) -> &Surface {
        self.surface(ProjectionKind::Cards)
    }

    pub fn table(&self) -> &Surface {
        self.surface(ProjectionKind::Table)
    }

    /// View toggle; selects which projection the host displays
    pub fn set_visible(&mut self, kind: ProjectionKind) {
        self.visible = kind;
    }

    pub fn visible(&self) -> ProjectionKind {
        self.visible
    }

    /// Both projections mirror `products` unit for unit
    pub fn is_consistent_with(&self, products: &[Product]) -> bool {
        self.surfaces.iter().all(|surface| surface.mirrors(products))
    }

    pub fn to_html(&self, kind: ProjectionKind) -> String {
        let panel = self
            .error_panel
            .as_ref()
            .map(|p| p.render().to_html())
            .unwrap_or_default();
        format!("{}{}", panel, self.surface(kind).to_html())
    }
}

// ========== Shared unit fragments ==========

fn title_heading(product: &Product, limit: usize, class: &'static str) -> Node {
    Node::new("h6")
        .class(format!("{} product-title", class))
        .attr("title", product.title.as_str())
        .text(truncate_with_ellipsis(&product.title, limit))
}

fn price_text(product: &Product) -> String {
    format!("${}", product.price_label())
}

fn stock_badge(product: &Product, suffix: &str) -> Node {
    let tier = product.stock_tier();
    Node::new("span")
        .class(format!("badge stock-badge {}", tier.badge_class()))
        .attr("data-stock-tier", tier.label())
        .text(format!("{} {}", product.stock, suffix))
}

fn action_button(action: &'static str, id: &str, class: &'static str, label: &'static str) -> Node {
    Node::new("button")
        .class(class)
        .attr("data-action", action)
        .attr("data-id", id)
        .text(label)
}
