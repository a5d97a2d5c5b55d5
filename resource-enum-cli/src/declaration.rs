//! Read-only view over a marked declaration.

use crate::error::GenerateError;
use crate::parser::{Declaration, Member, MarkerUse};

/// Marker argument naming the base package.
pub const BASE_PACKAGE_ARG: &str = "base_package";

/// Marker argument naming the sub package.
pub const SUB_PACKAGE_ARG: &str = "sub_package";

/// Where generated code for a declaration is placed.
///
/// | `base_package` | `sub_package` | package |
/// |----------------|---------------|---------|
/// | empty | empty | `<declaration package>.<declaration name>` |
/// | set | empty | `<base>` |
/// | empty | set | `<declaration package>.<sub>` |
/// | set | set | `<base>.<sub>` |
///
/// Both inputs are lower-cased. When the declaration package is empty (the
/// crate root), the empty/empty case yields the root package `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageNamingPolicy {
    pub base_package: String,
    pub sub_package: String,
}

impl PackageNamingPolicy {
    pub fn new(base_package: impl Into<String>, sub_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
            sub_package: sub_package.into(),
        }
    }

    /// Read the policy from a declaration marker's arguments.
    pub fn from_marker(marker: &MarkerUse) -> Self {
        Self::new(
            marker.arg(BASE_PACKAGE_ARG).unwrap_or_default(),
            marker.arg(SUB_PACKAGE_ARG).unwrap_or_default(),
        )
    }

    /// Package for a declaration named `simple_name` in `declaration_package`.
    pub fn resolve(&self, declaration_package: &str, simple_name: &str) -> String {
        let base = self.base_package.to_lowercase();
        let sub = self.sub_package.to_lowercase();

        match (base.is_empty(), sub.is_empty()) {
            (true, true) if declaration_package.is_empty() => String::new(),
            (true, true) => format!("{declaration_package}.{}", simple_name.to_lowercase()),
            (false, true) => base,
            (true, false) if declaration_package.is_empty() => sub,
            (true, false) => format!("{declaration_package}.{sub}"),
            (false, false) => format!("{base}.{sub}"),
        }
    }
}

/// Projection of a [`Declaration`] used by generators.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationView<'a> {
    declaration: &'a Declaration,
}

impl<'a> DeclarationView<'a> {
    pub fn new(declaration: &'a Declaration) -> Self {
        Self { declaration }
    }

    pub fn declaration(&self) -> &'a Declaration {
        self.declaration
    }

    /// Members carrying `marker`, in declaration order.
    ///
    /// Fails with [`GenerateError::InvalidDeclarationKind`] unless the
    /// declaration is an inline module, an `impl` block or a trait.
    pub fn members(&self, marker: &str) -> Result<Vec<&'a Member>, GenerateError> {
        if !self.declaration.kind.is_composite() {
            return Err(GenerateError::InvalidDeclarationKind {
                name: self.declaration.name.clone(),
                kind: self.declaration.kind.to_string(),
            });
        }
        Ok(self
            .declaration
            .members
            .iter()
            .filter(|member| member.has_marker(marker))
            .collect())
    }

    pub fn simple_name(&self) -> &'a str {
        &self.declaration.name
    }

    /// Package derived from the declaration's own package under `policy`.
    pub fn package_name(&self, policy: &PackageNamingPolicy) -> String {
        policy.resolve(&self.declaration.package, self.simple_name())
    }
}
