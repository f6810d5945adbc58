//! Plain-text node labels.

use stereoscope_core::{application::ports::NodeHandler, domain::Classification};

use crate::model::{MethodRef, PackageRef, TypeRef};

/// Labels like `Order (Aggregate Root) [DDD: Aggregate Root | Layers: Domain Layer]`.
///
/// Types show their simple name followed by the primary stereotype; packages
/// their full name. Failed nodes show the failure message instead of the
/// classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNodeHandler {
    qualified_types: bool,
}

impl DefaultNodeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print fully qualified type names.
    pub fn qualified_types(mut self, enabled: bool) -> Self {
        self.qualified_types = enabled;
        self
    }

    fn decorate(name: &str, classification: &Classification, with_primary: bool) -> String {
        if let Some(failure) = classification.failure() {
            return format!("{name} (detection failed: {failure})");
        }
        if classification.is_empty() {
            return name.to_string();
        }

        let mut label = name.to_string();
        if with_primary {
            if let Some(primary) = classification.stereotypes().primary() {
                label.push_str(&format!(" ({})", primary.display_name()));
            }
        }
        label.push_str(&format!(" [{}]", classification.summary()));
        label
    }
}

impl NodeHandler<PackageRef, TypeRef, MethodRef> for DefaultNodeHandler {
    fn package_label(&self, package: &PackageRef, classification: &Classification) -> String {
        Self::decorate(package.name(), classification, false)
    }

    fn type_label(&self, ty: &TypeRef, classification: &Classification) -> String {
        let name = if self.qualified_types {
            ty.name()
        } else {
            ty.simple_name()
        };
        Self::decorate(name, classification, true)
    }

    fn method_label(&self, method: &MethodRef, classification: &Classification) -> String {
        Self::decorate(&format!("{}()", method.name()), classification, false)
    }
}
