//! In-memory metadata provider.
//!
//! [`ModuleBuilder`] assembles type and field rows the way a compiler
//! front end or test would declare them; [`InMemoryModule`] is the frozen
//! result and implements every reader trait.

use rustc_hash::FxHashSet;

use crate::flags::FieldAttributes;
use crate::handles::{FieldDefId, FieldRef, ModuleId, TypeDefId};
use crate::reader::{CustomAttributeReader, FieldResolver, MetadataReader, ModuleMetadata};

/// Namespace-qualified attribute type name.
type AttributeKey = (String, String);

#[derive(Clone, Debug)]
struct TypeRow {
    namespace: String,
    name: String,
    generic_parameters: u32,
    fields: Vec<FieldDefId>,
    attributes: FxHashSet<AttributeKey>,
}

#[derive(Clone, Debug)]
struct FieldRow {
    name: String,
    flags: FieldAttributes,
    signature: Vec<u8>,
    attributes: FxHashSet<AttributeKey>,
}

/// A complete module held in memory.
#[derive(Clone, Debug)]
pub struct InMemoryModule {
    id: ModuleId,
    pointer_size: u32,
    types: Vec<TypeRow>,
    fields: Vec<FieldRow>,
}

impl InMemoryModule {
    /// Namespace and name of a type definition.
    pub fn type_name(&self, ty: TypeDefId) -> Option<(&str, &str)> {
        self.types
            .get(ty.index())
            .filter(|_| !ty.is_nil())
            .map(|row| (row.namespace.as_str(), row.name.as_str()))
    }

    pub fn field_name(&self, field: FieldDefId) -> Option<&str> {
        self.field_row(field).map(|row| row.name.as_str())
    }

    /// Number of rows in the `Field` table.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn type_row(&self, ty: TypeDefId) -> Option<&TypeRow> {
        if ty.is_nil() {
            return None;
        }
        self.types.get(ty.index())
    }

    fn field_row(&self, field: FieldDefId) -> Option<&FieldRow> {
        if field.is_nil() {
            return None;
        }
        self.fields.get(field.index())
    }
}

fn has_attribute(set: &FxHashSet<AttributeKey>, namespace: &str, name: &str) -> bool {
    set.iter().any(|(ns, n)| ns == namespace && n == name)
}

impl MetadataReader for InMemoryModule {
    fn pointer_size(&self) -> u32 {
        self.pointer_size
    }

    fn type_definition_count(&self) -> u32 {
        u32::try_from(self.types.len()).unwrap_or(u32::MAX)
    }

    fn generic_parameter_count(&self, ty: TypeDefId) -> u32 {
        self.type_row(ty).map_or(0, |row| row.generic_parameters)
    }

    fn fields(&self, ty: TypeDefId) -> impl Iterator<Item = FieldDefId> + '_ {
        self.type_row(ty)
            .map(|row| row.fields.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn field_attributes(&self, field: FieldDefId) -> FieldAttributes {
        self.field_row(field)
            .map_or(FieldAttributes::empty(), |row| row.flags)
    }

    fn field_signature(&self, field: FieldDefId) -> &[u8] {
        self.field_row(field)
            .map(|row| row.signature.as_slice())
            .unwrap_or_default()
    }
}

impl CustomAttributeReader for InMemoryModule {
    fn field_has_attribute(&self, field: FieldDefId, namespace: &str, name: &str) -> bool {
        self.field_row(field)
            .is_some_and(|row| has_attribute(&row.attributes, namespace, name))
    }

    fn type_has_attribute(&self, ty: TypeDefId, namespace: &str, name: &str) -> bool {
        self.type_row(ty)
            .is_some_and(|row| has_attribute(&row.attributes, namespace, name))
    }
}

impl FieldResolver for InMemoryModule {
    type Field = FieldRef;

    fn resolve_field(&self, field: FieldDefId) -> FieldRef {
        FieldRef::new(self.id, field)
    }
}

impl ModuleMetadata for InMemoryModule {
    fn module_id(&self) -> ModuleId {
        self.id
    }
}

/// Incrementally declares types and fields of an [`InMemoryModule`].
///
/// Rows are numbered in the order they are added, so declaration order is
/// exactly call order.
///
/// ```
/// use ilc_meta::{ElementType, FieldAttributes, ModuleBuilder, ModuleId, SignatureBuilder};
///
/// let mut builder = ModuleBuilder::new(ModuleId::new(1), 8);
/// let holder = builder.add_type("App", "Holder");
/// let sig = SignatureBuilder::field().element(ElementType::BOOLEAN).finish()?;
/// builder.add_field(holder, "ready", FieldAttributes::STATIC, sig);
/// let module = builder.finish();
/// assert_eq!(module.field_count(), 1);
/// # Ok::<(), ilc_meta::BlobError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ModuleBuilder {
    module: InMemoryModule,
}

impl ModuleBuilder {
    pub fn new(id: ModuleId, pointer_size: u32) -> Self {
        ModuleBuilder {
            module: InMemoryModule {
                id,
                pointer_size,
                types: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    /// Declare a new, non-generic type definition.
    pub fn add_type(&mut self, namespace: &str, name: &str) -> TypeDefId {
        self.module.types.push(TypeRow {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            generic_parameters: 0,
            fields: Vec::new(),
            attributes: FxHashSet::default(),
        });
        TypeDefId::new(self.module.type_definition_count())
    }

    /// Declare a type definition with `count` generic parameters.
    pub fn add_generic_type(&mut self, namespace: &str, name: &str, count: u32) -> TypeDefId {
        let ty = self.add_type(namespace, name);
        if let Some(row) = self.type_row_mut(ty) {
            row.generic_parameters = count;
        }
        ty
    }

    /// Declare a field on `owner`. Unknown owners get no field and a nil
    /// handle back.
    pub fn add_field(
        &mut self,
        owner: TypeDefId,
        name: &str,
        flags: FieldAttributes,
        signature: Vec<u8>,
    ) -> FieldDefId {
        if self.type_row_mut(owner).is_none() {
            return FieldDefId::NIL;
        }
        self.module.fields.push(FieldRow {
            name: name.to_owned(),
            flags,
            signature,
            attributes: FxHashSet::default(),
        });
        let field = FieldDefId::new(u32::try_from(self.module.fields.len()).unwrap_or(u32::MAX));
        if let Some(row) = self.type_row_mut(owner) {
            row.fields.push(field);
        }
        field
    }

    /// Attach an attribute to a field.
    pub fn add_field_attribute(&mut self, field: FieldDefId, namespace: &str, name: &str) {
        if field.is_nil() {
            return;
        }
        if let Some(row) = self.module.fields.get_mut(field.index()) {
            row.attributes
                .insert((namespace.to_owned(), name.to_owned()));
        }
    }

    /// Attach an attribute to a type definition.
    pub fn add_type_attribute(&mut self, ty: TypeDefId, namespace: &str, name: &str) {
        if let Some(row) = self.type_row_mut(ty) {
            row.attributes
                .insert((namespace.to_owned(), name.to_owned()));
        }
    }

    pub fn finish(self) -> InMemoryModule {
        self.module
    }

    fn type_row_mut(&mut self, ty: TypeDefId) -> Option<&mut TypeRow> {
        if ty.is_nil() {
            return None;
        }
        self.module.types.get_mut(ty.index())
    }
}

#[cfg(test)]
mod tests;
