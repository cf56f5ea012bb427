//! Table projection

use super::node::Node;
use super::{Layout, Placeholder, ProjectionKind, action_button, price_text, stock_badge, title_heading};
use shared::Product;

/// Visible title characters in a table row
pub const TABLE_TITLE_LIMIT: usize = 25;

const COLUMN_COUNT: &str = "6";

#[derive(Debug, Clone, Copy, Default)]
pub struct TableLayout;

impl Layout for TableLayout {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Table
    }

    fn render_unit(&self, product: &Product) -> Node {
        let id = product.id.to_string();

        Node::new("tr")
            .class("product-unit")
            .attr("data-id", id.as_str())
            .child(
                Node::new("td").child(
                    Node::new("img")
                        .class("rounded")
                        .attr("src", product.image.as_str())
                        .attr("alt", product.title.as_str()),
                ),
            )
            .child(
                Node::new("td").child(
                    Node::new("div")
                        .child(title_heading(product, TABLE_TITLE_LIMIT, "mb-1"))
                        .child(
                            Node::new("small")
                                .class("text-muted product-sku")
                                .text(format!("SKU: {}", product.sku)),
                        ),
                ),
            )
            .child(
                Node::new("td").child(
                    Node::new("span")
                        .class("badge bg-secondary product-category")
                        .text(product.category.as_str()),
                ),
            )
            .child(
                Node::new("td")
                    .class("fw-bold text-primary product-price")
                    .text(price_text(product)),
            )
            .child(Node::new("td").child(stock_badge(product, "units")))
            .child(
                Node::new("td").class("text-center").child(
                    Node::new("div")
                        .class("btn-group btn-group-sm")
                        .attr("role", "group")
                        .child(action_button("edit", &id, "btn btn-outline-primary", "Edit"))
                        .child(action_button("delete", &id, "btn btn-outline-danger", "Delete")),
                ),
            )
    }

    fn render_placeholder(&self, placeholder: Placeholder) -> Node {
        let (id, class, text) = match placeholder {
            Placeholder::Empty => ("emptyStateTable", "empty-state", "No products found."),
            Placeholder::Loading => ("loadingRow", "loading-state", "Loading products..."),
        };
        Node::new("tr").attr("id", id).class(class).child(
            Node::new("td")
                .attr("colspan", COLUMN_COUNT)
                .class("text-center text-muted py-4")
                .text(text),
        )
    }
}
