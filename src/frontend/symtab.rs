//! Symbol table
//!
//! A stack of ordered scopes. Scope 0 holds the predefined types and
//! constants; routine bodies parse against a local scope on top of it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::TypeDescriptor;

/// Calling convention of a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoutineKind {
    /// Ordinary user routine
    #[default]
    Declared,
    /// Library routine
    Standard,
    /// Standard iterator: its body block is closed by the iterator call
    /// convention, not by a `}` token
    StdIterator,
}

/// The routine whose body is being parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDescriptor {
    pub name: String,
    pub return_type: TypeDescriptor,
    #[serde(default)]
    pub kind: RoutineKind,
}

impl RoutineDescriptor {
    pub fn new(
        name: &str,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.to_string(),
            return_type,
            kind: RoutineKind::Declared,
        }
    }

    pub fn std_iterator(
        name: &str,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            kind: RoutineKind::StdIterator,
            ..Self::new(name, return_type)
        }
    }

    pub fn is_std_iterator(&self) -> bool {
        self.kind == RoutineKind::StdIterator
    }
}

/// Compile-time constant value
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
}

/// How a symbol is defined
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Constant(ConstValue),
    Variable,
    Type,
    Routine(RoutineDescriptor),
    EnumConstant(i64),
}

/// Symbol table entry
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolNode {
    pub name: String,
    pub definition: Definition,
    pub ty: TypeDescriptor,
}

impl SymbolNode {
    pub fn variable(
        name: &str,
        ty: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.to_string(),
            definition: Definition::Variable,
            ty,
        }
    }

    pub fn constant(
        name: &str,
        ty: TypeDescriptor,
        value: ConstValue,
    ) -> Self {
        Self {
            name: name.to_string(),
            definition: Definition::Constant(value),
            ty,
        }
    }

    pub fn type_name(
        name: &str,
        ty: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.to_string(),
            definition: Definition::Type,
            ty,
        }
    }

    pub fn routine(routine: RoutineDescriptor) -> Self {
        Self {
            name: routine.name.clone(),
            ty: routine.return_type.clone(),
            definition: Definition::Routine(routine),
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self.definition, Definition::Type)
    }

    pub fn is_constant(&self) -> bool {
        matches!(
            self.definition,
            Definition::Constant(_) | Definition::EnumConstant(_)
        )
    }

    pub fn is_routine(&self) -> bool {
        matches!(self.definition, Definition::Routine(_))
    }
}

/// Symbol table errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("'{0}' is already defined in this scope")]
    Redefined(String),
}

/// Scoped symbol table
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<IndexMap<String, SymbolNode>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::with_predefined()
    }
}

impl SymbolTable {
    /// A table with a single, empty scope
    pub fn empty() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
        }
    }

    /// Predefined types and constants in scope 0, plus an empty local scope
    pub fn with_predefined() -> Self {
        let mut table = Self::empty();
        let predefined = [
            SymbolNode::type_name("int", TypeDescriptor::integer()),
            SymbolNode::type_name("float", TypeDescriptor::float()),
            SymbolNode::type_name("double", TypeDescriptor::double()),
            SymbolNode::type_name("char", TypeDescriptor::char()),
            SymbolNode::type_name("bool", TypeDescriptor::boolean()),
            SymbolNode::type_name("void", TypeDescriptor::void()),
            SymbolNode::constant("true", TypeDescriptor::boolean(), ConstValue::Bool(true)),
            SymbolNode::constant("false", TypeDescriptor::boolean(), ConstValue::Bool(false)),
        ];
        for node in predefined {
            table.scopes[0].insert(node.name.clone(), node);
        }
        table.enter_scope();
        table
    }

    /// Push a new innermost scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Pop the innermost scope; scope 0 is never removed
    pub fn exit_scope(&mut self) -> Option<IndexMap<String, SymbolNode>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Search every scope, innermost first
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&SymbolNode> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Search only the innermost scope
    pub fn lookup_local(
        &self,
        name: &str,
    ) -> Option<&SymbolNode> {
        self.scopes.last().and_then(|scope| scope.get(name))
    }

    /// Enter `node` in the innermost scope
    pub fn enter_local(
        &mut self,
        node: SymbolNode,
    ) -> Result<(), SymbolError> {
        let innermost = self.scopes.len() - 1;
        let scope = &mut self.scopes[innermost];
        if scope.contains_key(&node.name) {
            return Err(SymbolError::Redefined(node.name));
        }
        scope.insert(node.name.clone(), node);
        Ok(())
    }

    /// Enter an enumeration type and its constants in the innermost scope
    pub fn define_enum(
        &mut self,
        name: &str,
        constants: &[&str],
    ) -> Result<TypeDescriptor, SymbolError> {
        let ty = TypeDescriptor::enumeration(name, constants);
        self.enter_local(SymbolNode::type_name(name, ty.clone()))?;
        for (value, constant) in constants.iter().enumerate() {
            self.enter_local(SymbolNode {
                name: constant.to_string(),
                definition: Definition::EnumConstant(value as i64),
                ty: ty.clone(),
            })?;
        }
        Ok(ty)
    }

    /// Symbols of the innermost scope, in definition order
    pub fn locals(&self) -> impl Iterator<Item = &SymbolNode> {
        self.scopes.last().into_iter().flat_map(|scope| scope.values())
    }
}
