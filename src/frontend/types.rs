//! Type descriptors and compatibility checks

use serde::{Deserialize, Serialize};

/// Scalar base types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Integer,
    Float,
    Double,
    Boolean,
    Char,
}

/// Shape of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeForm {
    Scalar(ScalarKind),
    Enumeration {
        name: String,
        constants: Vec<String>,
    },
    Subrange {
        base: Box<TypeDescriptor>,
        min: i64,
        max: i64,
    },
    Array {
        element: Box<TypeDescriptor>,
        count: usize,
    },
    /// No value (`void` routines, bare `return`)
    Void,
    /// Type of an erroneous expression; compatible with everything
    Dummy,
}

/// Static type of an expression or symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub form: TypeForm,
}

impl TypeDescriptor {
    pub fn new(form: TypeForm) -> Self {
        Self { form }
    }

    pub fn scalar(kind: ScalarKind) -> Self {
        Self::new(TypeForm::Scalar(kind))
    }

    pub fn integer() -> Self {
        Self::scalar(ScalarKind::Integer)
    }

    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    pub fn double() -> Self {
        Self::scalar(ScalarKind::Double)
    }

    pub fn boolean() -> Self {
        Self::scalar(ScalarKind::Boolean)
    }

    pub fn char() -> Self {
        Self::scalar(ScalarKind::Char)
    }

    pub fn void() -> Self {
        Self::new(TypeForm::Void)
    }

    pub fn dummy() -> Self {
        Self::new(TypeForm::Dummy)
    }

    pub fn enumeration(
        name: &str,
        constants: &[&str],
    ) -> Self {
        Self::new(TypeForm::Enumeration {
            name: name.to_string(),
            constants: constants.iter().map(|c| c.to_string()).collect(),
        })
    }

    pub fn subrange(
        base: TypeDescriptor,
        min: i64,
        max: i64,
    ) -> Self {
        Self::new(TypeForm::Subrange {
            base: Box::new(base),
            min,
            max,
        })
    }

    pub fn array(
        element: TypeDescriptor,
        count: usize,
    ) -> Self {
        Self::new(TypeForm::Array {
            element: Box::new(element),
            count,
        })
    }

    /// Base type: the base of a subrange, otherwise the type itself
    pub fn base(&self) -> &TypeDescriptor {
        match &self.form {
            TypeForm::Subrange { base, .. } => base.base(),
            _ => self,
        }
    }

    /// Scalar kind of the base type, if scalar
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.base().form {
            TypeForm::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.scalar_kind(),
            Some(ScalarKind::Integer | ScalarKind::Float | ScalarKind::Double)
        )
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.form, TypeForm::Dummy)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.form, TypeForm::Void)
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.form {
            TypeForm::Scalar(ScalarKind::Integer) => write!(f, "int"),
            TypeForm::Scalar(ScalarKind::Float) => write!(f, "float"),
            TypeForm::Scalar(ScalarKind::Double) => write!(f, "double"),
            TypeForm::Scalar(ScalarKind::Boolean) => write!(f, "bool"),
            TypeForm::Scalar(ScalarKind::Char) => write!(f, "char"),
            TypeForm::Enumeration { name, .. } => write!(f, "enum {}", name),
            TypeForm::Subrange { base, min, max } => write!(f, "{}[{}..{}]", base, min, max),
            TypeForm::Array { element, count } => write!(f, "{}[{}]", element, count),
            TypeForm::Void => write!(f, "void"),
            TypeForm::Dummy => write!(f, "<error>"),
        }
    }
}

/// Static compatibility checks used by the statement parser
pub trait TypeChecker {
    /// Whether `ty` may be used as a condition
    fn is_boolean(
        &self,
        ty: &TypeDescriptor,
    ) -> bool;

    /// Whether a value of type `source` may be assigned to `target`
    fn is_assignment_compatible(
        &self,
        target: &TypeDescriptor,
        source: &TypeDescriptor,
    ) -> bool;

    /// Whether `ty` may select a `switch`: integer, char or an enumeration
    fn is_selector(
        &self,
        ty: &TypeDescriptor,
    ) -> bool;
}

/// The language's standard compatibility rules
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeChecker;

impl TypeChecker for StandardTypeChecker {
    fn is_boolean(
        &self,
        ty: &TypeDescriptor,
    ) -> bool {
        ty.is_dummy() || ty.scalar_kind() == Some(ScalarKind::Boolean)
    }

    fn is_assignment_compatible(
        &self,
        target: &TypeDescriptor,
        source: &TypeDescriptor,
    ) -> bool {
        let target = target.base();
        let source = source.base();

        if target.is_dummy() || source.is_dummy() {
            return true;
        }
        if target == source {
            return true;
        }
        // int, float and double convert freely
        if target.is_numeric() && source.is_numeric() {
            return true;
        }
        match (&target.form, &source.form) {
            (TypeForm::Array { element: t, .. }, TypeForm::Array { element: s, .. }) => {
                t.scalar_kind() == Some(ScalarKind::Char)
                    && s.scalar_kind() == Some(ScalarKind::Char)
            }
            _ => false,
        }
    }

    fn is_selector(
        &self,
        ty: &TypeDescriptor,
    ) -> bool {
        let base = ty.base();
        base.is_dummy()
            || matches!(
                base.form,
                TypeForm::Scalar(ScalarKind::Integer | ScalarKind::Char)
                    | TypeForm::Enumeration { .. }
            )
    }
}
