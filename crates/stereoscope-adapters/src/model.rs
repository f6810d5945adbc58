//! In-memory codebase model.
//!
//! A [`CodebaseModel`] is a registry of packages, types, methods and marker
//! definitions, typically generated by a build-time scanner and stored as a
//! JSON or TOML file:
//!
//! ```toml
//! [[packages]]
//! name = "com.acme.shop.order"
//! markers = ["org.jmolecules.architecture.layered.DomainLayer"]
//!
//! [[types]]
//! name = "com.acme.shop.order.Order"
//! markers = ["org.jmolecules.ddd.annotation.AggregateRoot"]
//! implements = ["com.acme.shop.order.Priced"]
//! methods = [{ name = "place", markers = ["com.acme.Command"] }]
//!
//! [[markers]]
//! name = "com.acme.Command"
//! stereotype = { id = "app.Command", groups = ["app"] }
//! markers = ["com.acme.Traced"]
//! ```
//!
//! A type's package defaults to its name up to the last dot. Every ancestor
//! of a declared package is registered too, so the package tree has no gaps.
//! Capability types that the model does not declare are registered as
//! external types without markers.
//!
//! The model implements [`Introspector`] and the three extractor ports.
//! Extraction is deterministic: packages and types come out sorted by name,
//! methods in declaration order.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use stereoscope_core::{
    application::ports::{Introspector, MethodExtractor, PackageExtractor, TypeExtractor},
    domain::{DomainError, ElementKind, Marker, StereotypeDeclaration},
    error::StereoResult,
};

use crate::format::read_document;

// ── Element handles ───────────────────────────────────────────────────────────

/// Handle to a package, by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageRef(String);

impl PackageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Last segment of the name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.0)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a type, by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a method: owning type plus method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodRef {
    owner: TypeRef,
    name: String,
}

impl MethodRef {
    pub fn new(owner: TypeRef, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.name)
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn parent_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(parent, _)| parent)
}

// ── Document types ────────────────────────────────────────────────────────────

/// Serialized form of a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub markers: Vec<MarkerEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub markers: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stereotype: Option<StereotypeDeclaration>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn implements(mut self, capability: impl Into<String>) -> Self {
        self.implements.push(capability.into());
        self
    }

    pub fn declares(mut self, declaration: StereotypeDeclaration) -> Self {
        self.stereotype = Some(declaration);
        self
    }

    pub fn method<I, S>(mut self, name: impl Into<String>, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.push(MethodEntry {
            name: name.into(),
            markers: markers.into_iter().map(Into::into).collect(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub name: String,
    /// Present when the marker is itself a stereotype carrier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stereotype: Option<StereotypeDeclaration>,
    /// Meta-markers on the marker's definition.
    #[serde(default)]
    pub markers: Vec<String>,
}

impl MarkerEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn declares(mut self, declaration: StereotypeDeclaration) -> Self {
        self.stereotype = Some(declaration);
        self
    }

    pub fn meta(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct TypeInfo {
    package: Option<PackageRef>,
    markers: Vec<Marker>,
    capabilities: Vec<TypeRef>,
    declaration: Option<StereotypeDeclaration>,
    methods: Vec<(String, Vec<Marker>)>,
    external: bool,
}

#[derive(Debug, Clone, Default)]
struct MarkerInfo {
    declaration: Option<StereotypeDeclaration>,
    meta: Vec<Marker>,
}

/// Registry-backed [`Introspector`].
#[derive(Debug, Clone, Default)]
pub struct CodebaseModel {
    packages: BTreeMap<PackageRef, Vec<Marker>>,
    types: BTreeMap<TypeRef, TypeInfo>,
    markers: HashMap<Marker, MarkerInfo>,
}

impl CodebaseModel {
    pub fn builder() -> CodebaseModelBuilder {
        CodebaseModelBuilder::default()
    }

    /// Load a model file (`.json` or `.toml`).
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> StereoResult<Self> {
        let document: ModelDocument = read_document(path).map_err(|e| {
            DomainError::InvalidModel(format!("failed to load '{}': {e}", path.display()))
        })?;
        let model = Self::from_document(document)?;
        debug!(
            packages = model.packages.len(),
            types = model.types.len(),
            "loaded codebase model"
        );
        Ok(model)
    }

    pub fn from_document(document: ModelDocument) -> StereoResult<Self> {
        let mut model = Self::default();

        for entry in document.packages {
            require_name(&entry.name, "package")?;
            let markers = model.register_package(&entry.name);
            markers.extend(entry.markers.into_iter().map(Marker::new));
        }

        for entry in document.types {
            require_name(&entry.name, "type")?;
            let key = TypeRef::new(entry.name.clone());
            if model.types.contains_key(&key) {
                return Err(
                    DomainError::InvalidModel(format!("duplicate type '{}'", entry.name)).into(),
                );
            }

            let package = entry
                .package
                .as_deref()
                .or_else(|| parent_of(&entry.name))
                .map(|p| {
                    model.register_package(p);
                    PackageRef::new(p)
                });

            let info = TypeInfo {
                package,
                markers: entry.markers.into_iter().map(Marker::new).collect(),
                capabilities: entry.implements.into_iter().map(TypeRef::new).collect(),
                declaration: entry.stereotype,
                methods: entry
                    .methods
                    .into_iter()
                    .map(|m| (m.name, m.markers.into_iter().map(Marker::new).collect()))
                    .collect(),
                external: false,
            };
            model.types.insert(key, info);
        }

        let referenced: Vec<TypeRef> = model
            .types
            .values()
            .flat_map(|info| info.capabilities.iter().cloned())
            .filter(|capability| !model.types.contains_key(capability))
            .collect();
        for capability in referenced {
            model.types.entry(capability).or_insert_with(|| TypeInfo {
                external: true,
                ..TypeInfo::default()
            });
        }

        for entry in document.markers {
            require_name(&entry.name, "marker")?;
            model.markers.insert(
                Marker::new(entry.name),
                MarkerInfo {
                    declaration: entry.stereotype,
                    meta: entry.markers.into_iter().map(Marker::new).collect(),
                },
            );
        }

        Ok(model)
    }

    /// Register `name` and all its ancestors; returns the package's markers.
    fn register_package(&mut self, name: &str) -> &mut Vec<Marker> {
        let mut ancestor = parent_of(name);
        while let Some(parent) = ancestor {
            self.packages.entry(PackageRef::new(parent)).or_default();
            ancestor = parent_of(parent);
        }
        self.packages.entry(PackageRef::new(name)).or_default()
    }

    // ── Lookups ──────────────────────────────────────────────────────────────

    pub fn package(&self, name: &str) -> StereoResult<PackageRef> {
        let key = PackageRef::new(name);
        if self.packages.contains_key(&key) {
            Ok(key)
        } else {
            Err(DomainError::unknown(ElementKind::Package, name).into())
        }
    }

    pub fn type_ref(&self, name: &str) -> StereoResult<TypeRef> {
        let key = TypeRef::new(name);
        if self.types.contains_key(&key) {
            Ok(key)
        } else {
            Err(DomainError::unknown(ElementKind::Type, name).into())
        }
    }

    /// Packages without a parent, sorted by name.
    pub fn roots(&self) -> Vec<PackageRef> {
        self.packages
            .keys()
            .filter(|p| parent_of(p.name()).is_none())
            .cloned()
            .collect()
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageRef> {
        self.packages.keys()
    }

    /// Types declared by the model, excluding external capability types.
    pub fn types(&self) -> impl Iterator<Item = &TypeRef> {
        self.types
            .iter()
            .filter(|(_, info)| !info.external)
            .map(|(key, _)| key)
    }

    fn type_info(&self, ty: &TypeRef) -> StereoResult<&TypeInfo> {
        self.types
            .get(ty)
            .ok_or_else(|| DomainError::unknown(ElementKind::Type, ty.name()).into())
    }
}

fn require_name(name: &str, kind: &str) -> StereoResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidModel(format!("{kind} with empty name")).into());
    }
    Ok(())
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent construction of a [`CodebaseModel`], mostly for tests.
#[derive(Debug, Default)]
pub struct CodebaseModelBuilder {
    document: ModelDocument,
}

impl CodebaseModelBuilder {
    pub fn package<I, S>(mut self, name: impl Into<String>, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document.packages.push(PackageEntry {
            name: name.into(),
            markers: markers.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn ty(mut self, entry: TypeEntry) -> Self {
        self.document.types.push(entry);
        self
    }

    pub fn marker(mut self, entry: MarkerEntry) -> Self {
        self.document.markers.push(entry);
        self
    }

    pub fn build(self) -> StereoResult<CodebaseModel> {
        CodebaseModel::from_document(self.document)
    }
}

// ── Ports ─────────────────────────────────────────────────────────────────────

impl Introspector for CodebaseModel {
    type Package = PackageRef;
    type Type = TypeRef;
    type Method = MethodRef;

    fn package_markers(&self, package: &PackageRef) -> StereoResult<Vec<Marker>> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| DomainError::unknown(ElementKind::Package, package.name()).into())
    }

    fn type_markers(&self, ty: &TypeRef) -> StereoResult<Vec<Marker>> {
        Ok(self.type_info(ty)?.markers.clone())
    }

    fn method_markers(&self, method: &MethodRef) -> StereoResult<Vec<Marker>> {
        self.type_info(method.owner())?
            .methods
            .iter()
            .find(|(name, _)| name == method.name())
            .map(|(_, markers)| markers.clone())
            .ok_or_else(|| DomainError::unknown(ElementKind::Method, method.to_string()).into())
    }

    fn capabilities(&self, ty: &TypeRef) -> StereoResult<Vec<TypeRef>> {
        Ok(self.type_info(ty)?.capabilities.clone())
    }

    fn package_of(&self, ty: &TypeRef) -> StereoResult<Option<PackageRef>> {
        Ok(self.type_info(ty)?.package.clone())
    }

    fn type_name(&self, ty: &TypeRef) -> StereoResult<String> {
        self.type_info(ty)?;
        Ok(ty.name().to_string())
    }

    fn type_declaration(&self, ty: &TypeRef) -> StereoResult<Option<StereotypeDeclaration>> {
        Ok(self.type_info(ty)?.declaration.clone())
    }

    fn meta_markers(&self, marker: &Marker) -> StereoResult<Vec<Marker>> {
        Ok(self
            .markers
            .get(marker)
            .map(|info| info.meta.clone())
            .unwrap_or_default())
    }

    fn marker_declaration(&self, marker: &Marker) -> StereoResult<Option<StereotypeDeclaration>> {
        Ok(self
            .markers
            .get(marker)
            .and_then(|info| info.declaration.clone()))
    }
}

impl PackageExtractor<PackageRef> for CodebaseModel {
    fn child_packages(&self, package: &PackageRef) -> StereoResult<Vec<PackageRef>> {
        self.package(package.name())?;
        Ok(self
            .packages
            .keys()
            .filter(|candidate| parent_of(candidate.name()) == Some(package.name()))
            .cloned()
            .collect())
    }
}

impl TypeExtractor<PackageRef, TypeRef> for CodebaseModel {
    fn types_in(&self, package: &PackageRef) -> StereoResult<Vec<TypeRef>> {
        self.package(package.name())?;
        Ok(self
            .types
            .iter()
            .filter(|(_, info)| !info.external && info.package.as_ref() == Some(package))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

impl MethodExtractor<TypeRef, MethodRef> for CodebaseModel {
    fn methods_of(&self, ty: &TypeRef) -> StereoResult<Vec<MethodRef>> {
        Ok(self
            .type_info(ty)?
            .methods
            .iter()
            .map(|(name, _)| MethodRef::new(ty.clone(), name.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stereoscope_core::error::StereoError;
    use tempfile::TempDir;

    fn shop() -> CodebaseModel {
        CodebaseModel::builder()
            .package("com.acme.shop.order", ["org.jmolecules.architecture.layered.DomainLayer"])
            .ty(
                TypeEntry::new("com.acme.shop.order.Order")
                    .marker("org.jmolecules.ddd.annotation.AggregateRoot")
                    .implements("org.jmolecules.ddd.types.AggregateRoot")
                    .method("place", ["com.acme.Command"])
                    .method("total", Vec::<String>::new()),
            )
            .ty(TypeEntry::new("com.acme.shop.order.LineItem"))
            .ty(TypeEntry::new("com.acme.shop.App"))
            .marker(
                MarkerEntry::new("com.acme.Command")
                    .declares(StereotypeDeclaration::new().id("app.Command"))
                    .meta("com.acme.Traced"),
            )
            .build()
            .unwrap()
    }

    // ── Structure ────────────────────────────────────────────────────────────

    #[test]
    fn ancestors_of_packages_are_registered() {
        let model = shop();

        let names: Vec<_> = model.packages().map(PackageRef::name).collect();
        assert_eq!(
            names,
            vec!["com", "com.acme", "com.acme.shop", "com.acme.shop.order"]
        );
        assert_eq!(model.roots(), vec![PackageRef::new("com")]);
    }

    #[test]
    fn extraction_is_sorted_and_direct() {
        let model = shop();
        let shop_pkg = model.package("com.acme.shop").unwrap();

        assert_eq!(
            model.child_packages(&shop_pkg).unwrap(),
            vec![PackageRef::new("com.acme.shop.order")]
        );
        assert_eq!(
            model.types_in(&shop_pkg).unwrap(),
            vec![TypeRef::new("com.acme.shop.App")]
        );
        let order_pkg = model.package("com.acme.shop.order").unwrap();
        assert_eq!(
            model.types_in(&order_pkg).unwrap(),
            vec![
                TypeRef::new("com.acme.shop.order.LineItem"),
                TypeRef::new("com.acme.shop.order.Order"),
            ]
        );
    }

    #[test]
    fn external_capabilities_are_known_but_not_listed() {
        let model = shop();
        let capability = model.type_ref("org.jmolecules.ddd.types.AggregateRoot").unwrap();

        assert!(model.type_markers(&capability).unwrap().is_empty());
        assert_eq!(model.package_of(&capability).unwrap(), None);
        assert!(!model.types().any(|t| t == &capability));
        assert!(!model.packages().any(|p| p.name().starts_with("org")));
    }

    #[test]
    fn methods_keep_declaration_order() {
        let model = shop();
        let order = model.type_ref("com.acme.shop.order.Order").unwrap();

        let methods = model.methods_of(&order).unwrap();
        assert_eq!(methods[0].to_string(), "com.acme.shop.order.Order#place");
        assert_eq!(methods[1].name(), "total");
        assert_eq!(
            model.method_markers(&methods[0]).unwrap(),
            vec![Marker::new("com.acme.Command")]
        );
    }

    #[test]
    fn marker_definitions_answer_introspection() {
        let model = shop();
        let command = Marker::new("com.acme.Command");

        assert_eq!(
            model.marker_declaration(&command).unwrap().and_then(|d| d.id),
            Some("app.Command".to_string())
        );
        assert_eq!(model.meta_markers(&command).unwrap(), vec![Marker::new("com.acme.Traced")]);
        assert!(model.meta_markers(&Marker::new("unknown")).unwrap().is_empty());
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn unknown_elements_are_reported() {
        let model = shop();

        let err = model.type_markers(&TypeRef::new("com.acme.Ghost")).unwrap_err();
        assert!(matches!(err, StereoError::Domain(DomainError::UnknownElement { .. })));
        assert!(model.package("nope").is_err());
        assert!(
            model
                .method_markers(&MethodRef::new(
                    TypeRef::new("com.acme.shop.App"),
                    "missing"
                ))
                .is_err()
        );
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let result = CodebaseModel::builder()
            .ty(TypeEntry::new("a.B"))
            .ty(TypeEntry::new("a.B"))
            .build();

        assert!(matches!(
            result,
            Err(StereoError::Domain(DomainError::InvalidModel(_)))
        ));
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    #[test]
    fn loads_toml_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.toml");
        fs::write(
            &path,
            r#"
[[packages]]
name = "app.domain"
markers = ["org.jmolecules.architecture.layered.DomainLayer"]

[[types]]
name = "app.domain.Order"
markers = ["org.jmolecules.ddd.annotation.Entity"]
methods = [{ name = "cancel" }]

[[types]]
name = "Standalone"
stereotype = { id = "custom.Standalone", inherited = false }
"#,
        )
        .unwrap();

        let model = CodebaseModel::load(&path).unwrap();

        let order = model.type_ref("app.domain.Order").unwrap();
        assert_eq!(
            model.package_of(&order).unwrap(),
            Some(PackageRef::new("app.domain"))
        );
        let standalone = model.type_ref("Standalone").unwrap();
        assert_eq!(model.package_of(&standalone).unwrap(), None);
        let declaration = model.type_declaration(&standalone).unwrap().unwrap();
        assert!(!declaration.inherited);
    }

    #[test]
    fn loads_json_model_and_reports_bad_files() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("model.json");
        fs::write(
            &good,
            r#"{ "types": [ { "name": "a.B", "implements": ["a.C"] } ] }"#,
        )
        .unwrap();
        let bad = dir.path().join("broken.json");
        fs::write(&bad, "{").unwrap();

        let model = CodebaseModel::load(&good).unwrap();
        assert_eq!(
            model.capabilities(&TypeRef::new("a.B")).unwrap(),
            vec![TypeRef::new("a.C")]
        );

        let err = CodebaseModel::load(&bad).unwrap_err();
        assert!(matches!(err, StereoError::Domain(DomainError::InvalidModel(_))));
    }
}
