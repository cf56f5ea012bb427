//! Failure kind → user-facing text
//!
//! Only the controller reports to the user; everything below it hands back
//! a bare [`ClientError`].

use crate::core::notify::Notification;
use crate::core::projector::{ErrorPanel, PanelAction};
use catalog_client::{ClientError, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(&self) -> &'static str {
        match self {
            Self::List => "load products",
            Self::Load => "load product",
            Self::Create => "add product",
            Self::Update => "update product",
            Self::Delete => "delete product",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub operation: Operation,
    pub kind: FailureKind,
    pub title: &'static str,
    pub message: String,
    pub detail: String,
}

impl ErrorReport {
    pub fn notification(&self) -> Notification {
        Notification::error(
            self.title,
            format!("Failed to {}: {}", self.operation.verb(), self.message),
        )
    }

    pub fn panel(&self, actions: Vec<PanelAction>) -> ErrorPanel {
        let title = match self.operation {
            Operation::List => "Failed to Load Products",
            Operation::Load => "Failed to Load Product",
            _ => self.title,
        };
        ErrorPanel {
            title: title.to_string(),
            message: self.message.clone(),
            detail: self.detail.clone(),
            actions,
        }
    }
}

pub fn classify(operation: Operation, err: &ClientError) -> ErrorReport {
    let (title, message) = match err.kind {
        FailureKind::Offline => (
            "Connection Error",
            "No internet connection. Please check your network and try again.".to_string(),
        ),
        FailureKind::Network => ("Network Error", network_message(operation).to_string()),
        FailureKind::ServerStatus(code) => ("Server Error", server_message(operation, code)),
        FailureKind::Malformed => (
            "Unexpected Response",
            "The server sent a response that could not be understood. Please try again later."
                .to_string(),
        ),
    };

    ErrorReport {
        operation,
        kind: err.kind,
        title,
        message,
        detail: err.detail.clone(),
    }
}

fn network_message(operation: Operation) -> &'static str {
    match operation {
        Operation::List => "Unable to connect to the product database. Please try again later.",
        Operation::Delete => "Unable to connect to the server. The product may still exist.",
        _ => "Unable to connect to the server. Please try again later.",
    }
}

fn server_message(operation: Operation, code: u16) -> String {
    match operation {
        Operation::List => format!("Server error while loading products (HTTP {}).", code),
        Operation::Delete => format!(
            "Server error while deleting product (HTTP {}). Please try again or contact support.",
            code
        ),
        _ => format!(
            "Server error (HTTP {}). Please try again or contact support.",
            code
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::Severity;

    #[test]
    fn test_server_status_report() {
        let report = classify(Operation::Create, &ClientError::server_status(500, "Internal Server Error"));
        assert_eq!(report.title, "Server Error");
        assert_eq!(report.kind, FailureKind::ServerStatus(500));

        let notification = report.notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(
            notification.message,
            "Failed to add product: Server error (HTTP 500). Please try again or contact support."
        );
    }

    #[test]
    fn test_offline_wins_over_operation() {
        for op in [Operation::List, Operation::Update, Operation::Delete] {
            let report = classify(op, &ClientError::offline("dns error"));
            assert_eq!(report.title, "Connection Error");
        }
    }

    #[test]
    fn test_network_message_depends_on_operation() {
        let err = ClientError::network("connection refused");
        assert!(classify(Operation::Delete, &err).message.contains("may still exist"));
        assert!(classify(Operation::List, &err).message.contains("product database"));
    }

    #[test]
    fn test_list_panel_carries_detail_and_actions() {
        let report = classify(Operation::List, &ClientError::malformed("expected value at line 1"));
        let panel = report.panel(vec![PanelAction::RetryList, PanelAction::StartFresh]);
        assert_eq!(panel.title, "Failed to Load Products");
        assert_eq!(panel.detail, "expected value at line 1");
        assert_eq!(panel.actions.len(), 2);
    }
}
