//! Card grid projection

use super::node::Node;
use super::{Layout, Placeholder, ProjectionKind, action_button, price_text, stock_badge, title_heading};
use shared::Product;

/// Visible title characters on a card
pub const CARD_TITLE_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardLayout;

impl Layout for CardLayout {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Cards
    }

    fn render_unit(&self, product: &Product) -> Node {
        let id = product.id.to_string();

        let body = Node::new("div")
            .class("card-body d-flex flex-column")
            .child(title_heading(product, CARD_TITLE_LIMIT, "card-title"))
            .child(
                Node::new("p")
                    .class("card-text text-muted small mb-2 product-category")
                    .text(product.category.as_str()),
            )
            .child(
                Node::new("p")
                    .class("card-text text-muted small mb-2 product-sku")
                    .text(product.sku.as_str()),
            )
            .child(
                Node::new("div")
                    .class("mt-auto")
                    .child(
                        Node::new("div")
                            .class("d-flex justify-content-between align-items-center mb-3")
                            .child(
                                Node::new("p")
                                    .class("card-text fw-bold text-primary fs-5 mb-0 product-price")
                                    .text(price_text(product)),
                            )
                            .child(stock_badge(product, "in stock")),
                    )
                    .child(
                        Node::new("div")
                            .class("d-grid gap-2 d-md-flex justify-content-md-end")
                            .child(action_button("edit", &id, "btn btn-outline-primary btn-sm", "Edit"))
                            .child(action_button("delete", &id, "btn btn-outline-danger btn-sm", "Delete")),
                    ),
            );

        Node::new("div")
            .class("col-lg-3 col-md-4 col-sm-6 mb-4 product-unit")
            .attr("data-id", id.as_str())
            .child(
                Node::new("div")
                    .class("card h-100 shadow-sm product-card")
                    .child(
                        Node::new("img")
                            .class("card-img-top")
                            .attr("src", product.image.as_str())
                            .attr("alt", product.title.as_str()),
                    )
                    .child(body),
            )
    }

    fn render_placeholder(&self, placeholder: Placeholder) -> Node {
        match placeholder {
            Placeholder::Empty => Node::new("div")
                .class("col-12 text-center py-5 empty-state")
                .attr("id", "emptyStateCards")
                .child(Node::new("h4").class("text-muted").text("No Products Found"))
                .child(
                    Node::new("p")
                        .class("text-muted")
                        .text("Start by adding your first product to the catalog."),
                ),
            Placeholder::Loading => Node::new("div")
                .class("col-12 text-center py-5 loading-state")
                .attr("id", "loadingSpinner")
                .child(Node::new("div").class("spinner-border text-primary").attr("role", "status"))
                .child(Node::new("p").class("text-muted mt-3").text("Loading products...")),
        }
    }
}
