//! The closed set of AST node kinds and their payloads.
//!
//! Each declaration record deserializes into exactly one [`AstNode`]
//! variant, tagged by its `kind` field. Variants carry only the fields
//! that are meaningful for that kind: only [`EnumValueDecl`] has a
//! `value`, only wrapper kinds have a single underlying `type`, and so
//! on. Payloads live behind `Rc` so classification views can share them
//! with the store without copying.

use core::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque node identifier, unique within one AST document.
///
/// Front ends emit these as short strings (`"_42"` in gccxml-style
/// output); nothing in the pipeline ever interprets them beyond equality
/// and hashing.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One parsed declaration or type-reference record.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AstNode {
    Function(Rc<FunctionDecl>),
    Typedef(Rc<TypedefDecl>),
    Enumeration(Rc<EnumDecl>),
    EnumValue(Rc<EnumValueDecl>),
    Struct(Rc<RecordDecl>),
    Union(Rc<RecordDecl>),
    Variable(Rc<VariableDecl>),
    PointerType(Rc<PointerTypeDecl>),
    ArrayType(Rc<ArrayTypeDecl>),
    CvQualifiedType(Rc<QualifiedTypeDecl>),
    FundamentalType(Rc<FundamentalTypeDecl>),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub returns: NodeId,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Argument {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TypedefDecl {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub ty: NodeId,
}

/// A named or anonymous `enum`. `values` references the [`EnumValueDecl`]
/// records that belong to it, in declaration order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EnumDecl {
    pub id: NodeId,
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub values: Vec<NodeId>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EnumValueDecl {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub value: i64,
}

/// A `struct` or `union`; the two kinds share a payload and differ only
/// in the [`AstNode`] variant carrying them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RecordDecl {
    pub id: NodeId,
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VariableDecl {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub ty: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PointerTypeDecl {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub ty: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ArrayTypeDecl {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub ty: NodeId,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct QualifiedTypeDecl {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub ty: NodeId,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default)]
    pub volatile: bool,
}

/// A built-in scalar type (`int`, `double`, ...). Terminal for
/// resolution purposes: it needs no declaration of its own.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FundamentalTypeDecl {
    pub id: NodeId,
    pub name: String,
}

impl AstNode {
    #[must_use]
    pub fn id(&self) -> &NodeId {
        match self {
            AstNode::Function(n) => &n.id,
            AstNode::Typedef(n) => &n.id,
            AstNode::Enumeration(n) => &n.id,
            AstNode::EnumValue(n) => &n.id,
            AstNode::Struct(n) | AstNode::Union(n) => &n.id,
            AstNode::Variable(n) => &n.id,
            AstNode::PointerType(n) => &n.id,
            AstNode::ArrayType(n) => &n.id,
            AstNode::CvQualifiedType(n) => &n.id,
            AstNode::FundamentalType(n) => &n.id,
        }
    }

    /// Human-readable name, absent for anonymous types and wrappers.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            AstNode::Function(n) => Some(&n.name),
            AstNode::Typedef(n) => Some(&n.name),
            AstNode::Enumeration(n) => n.name.as_deref(),
            AstNode::EnumValue(n) => Some(&n.name),
            AstNode::Struct(n) | AstNode::Union(n) => n.name.as_deref(),
            AstNode::Variable(n) => Some(&n.name),
            AstNode::FundamentalType(n) => Some(&n.name),
            AstNode::PointerType(_) | AstNode::ArrayType(_) | AstNode::CvQualifiedType(_) => None,
        }
    }

    /// Source location string as recorded by the front end. Used only
    /// for filtering; wrapper and fundamental kinds carry none.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            AstNode::Function(n) => &n.location,
            AstNode::Typedef(n) => &n.location,
            AstNode::Enumeration(n) => &n.location,
            AstNode::EnumValue(n) => &n.location,
            AstNode::Struct(n) | AstNode::Union(n) => &n.location,
            AstNode::Variable(n) => &n.location,
            AstNode::PointerType(_)
            | AstNode::ArrayType(_)
            | AstNode::CvQualifiedType(_)
            | AstNode::FundamentalType(_) => "",
        }
    }

    /// The ids this node depends on, in declaration order.
    ///
    /// An enumeration's `values` are enumerator references, not type
    /// references, so they are deliberately not listed here.
    #[must_use]
    pub fn type_refs(&self) -> Vec<NodeId> {
        match self {
            AstNode::Function(n) => {
                let mut refs = Vec::with_capacity(n.arguments.len() + 1);
                refs.push(n.returns.clone());
                refs.extend(n.arguments.iter().map(|a| a.ty.clone()));
                refs
            }
            AstNode::Struct(n) | AstNode::Union(n) => {
                n.fields.iter().map(|f| f.ty.clone()).collect()
            }
            AstNode::Typedef(n) => vec![n.ty.clone()],
            AstNode::Variable(n) => vec![n.ty.clone()],
            AstNode::PointerType(n) => vec![n.ty.clone()],
            AstNode::ArrayType(n) => vec![n.ty.clone()],
            AstNode::CvQualifiedType(n) => vec![n.ty.clone()],
            AstNode::Enumeration(_) | AstNode::EnumValue(_) | AstNode::FundamentalType(_) => {
                vec![]
            }
        }
    }

    /// Kind tag, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AstNode::Function(_) => "Function",
            AstNode::Typedef(_) => "Typedef",
            AstNode::Enumeration(_) => "Enumeration",
            AstNode::EnumValue(_) => "EnumValue",
            AstNode::Struct(_) => "Struct",
            AstNode::Union(_) => "Union",
            AstNode::Variable(_) => "Variable",
            AstNode::PointerType(_) => "PointerType",
            AstNode::ArrayType(_) => "ArrayType",
            AstNode::CvQualifiedType(_) => "CvQualifiedType",
            AstNode::FundamentalType(_) => "FundamentalType",
        }
    }
}
