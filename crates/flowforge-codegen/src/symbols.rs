// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Symbol resolution for process variables.
//!
//! Type descriptors are opaque strings until a caller-supplied resolver
//! maps them to concrete type handles. The resolver is injected as a
//! function, so the compiler never touches a live class loader or any
//! other runtime type source.

use indexmap::IndexMap;

use crate::errors::CodegenError;

/// A resolved type: the concrete record a descriptor maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    /// Canonical (package-qualified) type name.
    pub canonical_name: String,
}

impl TypeHandle {
    /// Create a handle from a canonical name.
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
        }
    }

    /// The simple name: everything after the last `.`.
    pub fn simple_name(&self) -> &str {
        match self.canonical_name.rfind('.') {
            Some(idx) => &self.canonical_name[idx + 1..],
            None => &self.canonical_name,
        }
    }
}

/// Injected resolution capability from type descriptor to type handle.
/// `None` means the descriptor cannot be mapped, which the unit
/// description turns into a fatal configuration error.
pub type TypeResolver = Box<dyn Fn(&str) -> Option<TypeHandle>>;

/// A variable of a generated rule unit: resolved type plus, for
/// datasource variables, the element type of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleUnitVariable {
    /// Variable name, unique within the unit.
    pub name: String,

    /// Resolved variable type.
    pub var_type: TypeHandle,

    /// Element type for datasource variables.
    pub element_type: Option<TypeHandle>,

    /// Whether the variable is backed by a datasource container.
    pub is_datasource: bool,
}

/// Description of a generated rule unit: identity plus its variables,
/// registered lazily as the process graph is visited.
pub struct UnitDescription {
    name: String,
    package_name: String,
    simple_name: String,
    resolver: TypeResolver,
    variables: IndexMap<String, RuleUnitVariable>,
}

impl std::fmt::Debug for UnitDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitDescription")
            .field("name", &self.name)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

impl UnitDescription {
    /// Create a description for the unit with the given qualified name.
    pub fn new(name: impl Into<String>, resolver: TypeResolver) -> Self {
        let name = name.into();
        let (package_name, simple_name) = match name.rfind('.') {
            Some(idx) => (name[..idx].to_string(), name[idx + 1..].to_string()),
            None => (String::new(), name.clone()),
        };
        Self {
            name,
            package_name,
            simple_name,
            resolver,
            variables: IndexMap::new(),
        }
    }

    /// The fully qualified unit name.
    pub fn unit_name(&self) -> &str {
        &self.name
    }

    /// The unit's package name.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The unit's simple name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The registered variables, in registration order.
    pub fn variables(&self) -> impl Iterator<Item = &RuleUnitVariable> {
        self.variables.values()
    }

    /// Look up a registered variable by name.
    pub fn variable(&self, name: &str) -> Option<&RuleUnitVariable> {
        self.variables.get(name)
    }

    /// Resolve a descriptor through the injected resolver.
    fn resolve(&self, descriptor: &str) -> Result<TypeHandle, CodegenError> {
        (self.resolver)(descriptor).ok_or_else(|| CodegenError::UnresolvableType {
            descriptor: descriptor.to_string(),
        })
    }

    /// Register a simple (scalar-typed) variable. A later registration
    /// under the same name replaces the earlier one.
    pub fn put_simple_variable(
        &mut self,
        name: &str,
        type_descriptor: &str,
    ) -> Result<(), CodegenError> {
        let var_type = self.resolve(type_descriptor)?;
        self.variables.insert(
            name.to_string(),
            RuleUnitVariable {
                name: name.to_string(),
                var_type,
                element_type: None,
                is_datasource: false,
            },
        );
        Ok(())
    }

    /// Register a datasource variable: a container type parameterized by
    /// an element type. A later registration under the same name replaces
    /// the earlier one.
    pub fn put_datasource_variable(
        &mut self,
        name: &str,
        type_descriptor: &str,
        element_type_descriptor: &str,
    ) -> Result<(), CodegenError> {
        let var_type = self.resolve(type_descriptor)?;
        let element_type = self.resolve(element_type_descriptor)?;
        self.variables.insert(
            name.to_string(),
            RuleUnitVariable {
                name: name.to_string(),
                var_type,
                element_type: Some(element_type),
                is_datasource: true,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepting_resolver() -> TypeResolver {
        Box::new(|descriptor| Some(TypeHandle::new(descriptor)))
    }

    fn rejecting_resolver() -> TypeResolver {
        Box::new(|_| None)
    }

    #[test]
    fn test_unit_name_split() {
        let unit = UnitDescription::new("org.acme.OrderUnit", accepting_resolver());
        assert_eq!(unit.unit_name(), "org.acme.OrderUnit");
        assert_eq!(unit.package_name(), "org.acme");
        assert_eq!(unit.simple_name(), "OrderUnit");
    }

    #[test]
    fn test_put_simple_variable_resolves_type() {
        let mut unit = UnitDescription::new("org.acme.OrderUnit", accepting_resolver());
        unit.put_simple_variable("order", "org.acme.Order").unwrap();

        let var = unit.variable("order").expect("variable should be stored");
        assert_eq!(var.var_type.canonical_name, "org.acme.Order");
        assert!(!var.is_datasource);
        assert!(var.element_type.is_none());
    }

    #[test]
    fn test_put_datasource_variable_records_element_type() {
        let mut unit = UnitDescription::new("org.acme.OrderUnit", accepting_resolver());
        unit.put_datasource_variable("orders", "org.kie.DataStore", "org.acme.Order")
            .unwrap();

        let var = unit.variable("orders").expect("variable should be stored");
        assert!(var.is_datasource);
        assert_eq!(
            var.element_type.as_ref().map(|t| t.simple_name()),
            Some("Order")
        );
    }

    #[test]
    fn test_unresolvable_descriptor_is_fatal() {
        let mut unit = UnitDescription::new("org.acme.OrderUnit", rejecting_resolver());
        let err = unit.put_simple_variable("order", "org.acme.Missing").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnresolvableType { descriptor } if descriptor == "org.acme.Missing"
        ));
    }

    #[test]
    fn test_last_registration_wins_for_duplicate_names() {
        let mut unit = UnitDescription::new("org.acme.OrderUnit", accepting_resolver());
        unit.put_simple_variable("order", "org.acme.Draft").unwrap();
        unit.put_datasource_variable("order", "org.kie.DataStore", "org.acme.Order")
            .unwrap();

        let var = unit.variable("order").expect("variable should be stored");
        assert!(var.is_datasource, "later registration must replace earlier");
        assert_eq!(var.var_type.canonical_name, "org.kie.DataStore");
    }
}
