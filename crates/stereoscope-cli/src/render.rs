//! Terminal styling for tree labels.

use owo_colors::OwoColorize;

use stereoscope_adapters::{DefaultNodeHandler, MethodRef, PackageRef, TypeRef};
use stereoscope_core::{application::ports::NodeHandler, domain::Classification};

/// Wraps [`DefaultNodeHandler`] and colours its labels: packages bold,
/// unclassified types dimmed, failures red.
pub struct StyledNodeHandler {
    inner: DefaultNodeHandler,
    color: bool,
}

impl StyledNodeHandler {
    pub fn new(inner: DefaultNodeHandler, color: bool) -> Self {
        Self { inner, color }
    }

    fn style(&self, label: String, classification: &Classification) -> String {
        if !self.color {
            return label;
        }
        if classification.failure().is_some() {
            label.red().to_string()
        } else if classification.is_empty() {
            label.dimmed().to_string()
        } else {
            label
        }
    }
}

impl NodeHandler<PackageRef, TypeRef, MethodRef> for StyledNodeHandler {
    fn package_label(&self, package: &PackageRef, classification: &Classification) -> String {
        let label = self.inner.package_label(package, classification);
        if self.color && classification.failure().is_none() {
            label.bold().to_string()
        } else {
            self.style(label, classification)
        }
    }

    fn type_label(&self, ty: &TypeRef, classification: &Classification) -> String {
        self.style(self.inner.type_label(ty, classification), classification)
    }

    fn method_label(&self, method: &MethodRef, classification: &Classification) -> String {
        self.style(self.inner.method_label(method, classification), classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_color_labels_pass_through() {
        let handler = StyledNodeHandler::new(DefaultNodeHandler::new(), false);
        let failed = Classification::failed("boom");

        assert_eq!(
            handler.type_label(&TypeRef::new("a.B"), &failed),
            "B (detection failed: boom)"
        );
        assert_eq!(
            handler.package_label(&PackageRef::new("a"), &Classification::default()),
            "a"
        );
    }

    #[test]
    fn with_color_labels_are_styled() {
        let handler = StyledNodeHandler::new(DefaultNodeHandler::new(), true);
        let label = handler.type_label(&TypeRef::new("a.B"), &Classification::default());

        assert!(label.contains('B'));
        assert_ne!(label, "B");
    }
}
