//! Type system for the layer language
//!
//! Types are interned in a `TypeContext`: every structurally distinct type
//! exists once and is addressed by a copyable `TypeId`, so type equality is
//! handle equality.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Handle to an interned type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Primitive type kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Int,
    Char,
    Float,
    Double,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Int => write!(f, "int"),
            PrimitiveKind::Char => write!(f, "char"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::Double => write!(f, "double"),
        }
    }
}

/// Struct field definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub field_type: TypeId,
}

impl StructField {
    pub fn new(name: impl Into<String>, field_type: TypeId) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Layer language types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Scalar with a kind and a width in bits
    Primitive { kind: PrimitiveKind, bitwidth: u32 },

    /// Fixed-length array
    Array { element: TypeId, length: u32 },

    /// Fixed-length vector
    Vector { element: TypeId, length: u32 },

    /// Ordered, named fields (structural)
    Struct { fields: Vec<StructField> },

    /// Function-like entity: ordered parameters and optional return value
    Function {
        params: Vec<TypeId>,
        return_type: Option<TypeId>,
    },
}

impl Type {
    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }
}

fn content_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Interning store for all types of one parse
#[derive(Debug)]
pub struct TypeContext {
    types: Vec<Type>,
    integral: HashMap<u32, TypeId>,
    char_type: TypeId,
    float_type: TypeId,
    double_type: TypeId,
    arrays: HashMap<(TypeId, u32), TypeId>,
    vectors: HashMap<(TypeId, u32), TypeId>,
    // Content hash -> candidates; collisions resolved by structural compare
    structs: HashMap<u64, Vec<TypeId>>,
    functions: HashMap<u64, Vec<TypeId>>,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    pub fn new() -> Self {
        let types = vec![
            Type::Primitive { kind: PrimitiveKind::Char, bitwidth: 8 },
            Type::Primitive { kind: PrimitiveKind::Float, bitwidth: 32 },
            Type::Primitive { kind: PrimitiveKind::Double, bitwidth: 64 },
        ];

        Self {
            types,
            integral: HashMap::new(),
            char_type: TypeId(0),
            float_type: TypeId(1),
            double_type: TypeId(2),
            arrays: HashMap::new(),
            vectors: HashMap::new(),
            structs: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        trace!("interned type #{}: {:?}", id.0, ty);
        self.types.push(ty);
        id
    }

    /// Find a structurally equal type in a hash bucket, or create it
    fn intern_hashed(
        &mut self,
        hash: u64,
        ty: Type,
        select: fn(&mut Self) -> &mut HashMap<u64, Vec<TypeId>>,
    ) -> TypeId {
        let candidates = select(self).get(&hash).cloned().unwrap_or_default();
        if let Some(found) = candidates.into_iter().find(|id| self.types[id.index()] == ty) {
            return found;
        }

        let id = self.push(ty);
        select(self).entry(hash).or_default().push(id);
        id
    }

    /// Integral type of the given width
    pub fn primitive_int(&mut self, bitwidth: u32) -> TypeId {
        if let Some(&id) = self.integral.get(&bitwidth) {
            return id;
        }
        let id = self.push(Type::Primitive {
            kind: PrimitiveKind::Int,
            bitwidth,
        });
        self.integral.insert(bitwidth, id);
        id
    }

    pub fn primitive_char(&self) -> TypeId {
        self.char_type
    }

    pub fn primitive_float(&self) -> TypeId {
        self.float_type
    }

    pub fn primitive_double(&self) -> TypeId {
        self.double_type
    }

    pub fn array_of(&mut self, element: TypeId, length: u32) -> TypeId {
        if let Some(&id) = self.arrays.get(&(element, length)) {
            return id;
        }
        let id = self.push(Type::Array { element, length });
        self.arrays.insert((element, length), id);
        id
    }

    pub fn vector_of(&mut self, element: TypeId, length: u32) -> TypeId {
        if let Some(&id) = self.vectors.get(&(element, length)) {
            return id;
        }
        let id = self.push(Type::Vector { element, length });
        self.vectors.insert((element, length), id);
        id
    }

    pub fn struct_of(&mut self, fields: Vec<StructField>) -> TypeId {
        let hash = content_hash(&fields);
        self.intern_hashed(hash, Type::Struct { fields }, |ctx| &mut ctx.structs)
    }

    pub fn function_of(&mut self, params: Vec<TypeId>, return_type: Option<TypeId>) -> TypeId {
        let hash = content_hash(&(&params, return_type));
        self.intern_hashed(
            hash,
            Type::Function {
                params,
                return_type,
            },
            |ctx| &mut ctx.functions,
        )
    }

    /// Look up an interned type
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn is_integral(&self, id: TypeId) -> bool {
        matches!(
            self.get(id),
            Type::Primitive {
                kind: PrimitiveKind::Int,
                ..
            }
        )
    }

    /// Element type of an array or vector
    pub fn element_of(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Array { element, .. } | Type::Vector { element, .. } => Some(*element),
            _ => None,
        }
    }

    /// Type of a named struct field
    pub fn field_type(&self, id: TypeId, name: &str) -> Option<TypeId> {
        match self.get(id) {
            Type::Struct { fields } => fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| field.field_type),
            _ => None,
        }
    }

    /// Number of distinct types interned so far
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Render a type in dump format
    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    /// Render an optional expression type, `<null>` when unknown
    pub fn display_opt(&self, id: Option<TypeId>) -> String {
        match id {
            Some(id) => self.display(id),
            None => "<null>".to_string(),
        }
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        match self.get(id) {
            Type::Primitive { kind: PrimitiveKind::Int, bitwidth } => {
                out.push_str(&format!("int({})", bitwidth));
            }
            Type::Primitive { kind, .. } => out.push_str(&kind.to_string()),
            Type::Array { element, length } => {
                self.write_type(out, *element);
                out.push_str(&format!("[{}]", length));
            }
            Type::Vector { element, length } => {
                out.push_str("vector<");
                self.write_type(out, *element);
                out.push_str(&format!(",{}>", length));
            }
            Type::Struct { fields } => {
                out.push('{');
                for (i, field) in fields.iter().enumerate() {
                    out.push_str(if i > 0 { ", " } else { " " });
                    out.push_str(&field.name);
                    out.push_str(" : ");
                    self.write_type(out, field.field_type);
                }
                out.push_str(" }");
            }
            Type::Function { params, return_type } => {
                out.push('(');
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, *param);
                }
                out.push_str(") -> ");
                match return_type {
                    Some(ret) => self.write_type(out, *ret),
                    None => out.push_str("<null>"),
                }
            }
        }
    }
}
