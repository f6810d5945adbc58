//! Hand-written introspector shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};

use stereoscope_core::domain::{DomainError, ElementKind, Marker, StereotypeDeclaration};
use stereoscope_core::prelude::*;

#[derive(Debug, Default, Clone)]
pub struct TypeEntry {
    pub package: Option<String>,
    pub markers: Vec<Marker>,
    pub capabilities: Vec<String>,
    pub declaration: Option<StereotypeDeclaration>,
    pub methods: Vec<String>,
}

/// Packages, types, methods and markers keyed by their qualified names.
#[derive(Debug, Default)]
pub struct TestCodebase {
    pub packages: BTreeMap<String, Vec<Marker>>,
    pub types: BTreeMap<String, TypeEntry>,
    pub methods: HashMap<String, Vec<Marker>>,
    pub declarations: HashMap<String, StereotypeDeclaration>,
    pub meta: HashMap<String, Vec<Marker>>,
    pub broken: HashSet<String>,
}

impl TestCodebase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, name: &str, markers: &[&str]) -> Self {
        self.packages
            .insert(name.to_string(), markers.iter().map(|&m| Marker::new(m)).collect());
        self
    }

    pub fn ty(mut self, name: &str, package: &str) -> Self {
        self.packages.entry(package.to_string()).or_default();
        self.types.insert(
            name.to_string(),
            TypeEntry {
                package: Some(package.to_string()),
                ..TypeEntry::default()
            },
        );
        self
    }

    pub fn marked(mut self, ty: &str, marker: &str) -> Self {
        self.entry(ty).markers.push(Marker::new(marker));
        self
    }

    pub fn implements(mut self, ty: &str, capability: &str) -> Self {
        self.entry(ty).capabilities.push(capability.to_string());
        self
    }

    pub fn declares(mut self, ty: &str, declaration: StereotypeDeclaration) -> Self {
        self.entry(ty).declaration = Some(declaration);
        self
    }

    pub fn method(mut self, ty: &str, method: &str, markers: &[&str]) -> Self {
        let qualified = format!("{ty}#{method}");
        self.entry(ty).methods.push(qualified.clone());
        self.methods
            .insert(qualified, markers.iter().map(|&m| Marker::new(m)).collect());
        self
    }

    /// Make `marker` a stereotype carrier.
    pub fn stereotype_marker(mut self, marker: &str, declaration: StereotypeDeclaration) -> Self {
        self.declarations.insert(marker.to_string(), declaration);
        self
    }

    pub fn meta_marked(mut self, marker: &str, meta: &str) -> Self {
        self.meta
            .entry(marker.to_string())
            .or_default()
            .push(Marker::new(meta));
        self
    }

    /// Every query about `ty` fails.
    pub fn broken(mut self, ty: &str) -> Self {
        self.broken.insert(ty.to_string());
        self
    }

    fn entry(&mut self, ty: &str) -> &mut TypeEntry {
        self.types.entry(ty.to_string()).or_default()
    }

    fn lookup(&self, ty: &str) -> StereoResult<&TypeEntry> {
        if self.broken.contains(ty) {
            return Err(StereoError::introspection(format!("cannot load {ty}")));
        }
        self.types
            .get(ty)
            .ok_or_else(|| DomainError::unknown(ElementKind::Type, ty).into())
    }

    pub fn child_packages(&self, package: &String) -> StereoResult<Vec<String>> {
        let prefix = format!("{package}.");
        Ok(self
            .packages
            .keys()
            .filter(|p| p.strip_prefix(&prefix).is_some_and(|rest| !rest.contains('.')))
            .cloned()
            .collect())
    }

    pub fn types_in(&self, package: &String) -> StereoResult<Vec<String>> {
        Ok(self
            .types
            .iter()
            .filter(|(_, entry)| entry.package.as_ref() == Some(package))
            .map(|(name, _)| name.clone())
            .collect())
    }

    pub fn methods_of(&self, ty: &String) -> StereoResult<Vec<String>> {
        Ok(self.lookup(ty)?.methods.clone())
    }
}

impl Introspector for TestCodebase {
    type Package = String;
    type Type = String;
    type Method = String;

    fn package_markers(&self, package: &String) -> StereoResult<Vec<Marker>> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| DomainError::unknown(ElementKind::Package, package.clone()).into())
    }

    fn type_markers(&self, ty: &String) -> StereoResult<Vec<Marker>> {
        Ok(self.lookup(ty)?.markers.clone())
    }

    fn method_markers(&self, method: &String) -> StereoResult<Vec<Marker>> {
        self.methods
            .get(method)
            .cloned()
            .ok_or_else(|| DomainError::unknown(ElementKind::Method, method.clone()).into())
    }

    fn capabilities(&self, ty: &String) -> StereoResult<Vec<String>> {
        Ok(self.lookup(ty)?.capabilities.clone())
    }

    fn package_of(&self, ty: &String) -> StereoResult<Option<String>> {
        Ok(self.lookup(ty)?.package.clone())
    }

    fn type_name(&self, ty: &String) -> StereoResult<String> {
        self.lookup(ty)?;
        Ok(ty.clone())
    }

    fn type_declaration(&self, ty: &String) -> StereoResult<Option<StereotypeDeclaration>> {
        Ok(self.lookup(ty)?.declaration.clone())
    }

    fn meta_markers(&self, marker: &Marker) -> StereoResult<Vec<Marker>> {
        Ok(self.meta.get(marker.name()).cloned().unwrap_or_default())
    }

    fn marker_declaration(&self, marker: &Marker) -> StereoResult<Option<StereotypeDeclaration>> {
        Ok(self.declarations.get(marker.name()).cloned())
    }
}
