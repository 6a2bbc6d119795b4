//! Type-erased per-element property storage.
//!
//! Each element kind of a mesh owns a [`PropertySet`]: named columns of
//! arbitrary `T`, kept length-locked with the kind's element count. The
//! erasure boundary is `dyn Any`; a lookup with the wrong `T` fails with
//! [`MeshError::PropertyTypeMismatch`] instead of aliasing memory.

use std::any::Any;

use hashbrown::HashMap;

use crate::{ElementKind, MeshError, MeshResult};

/// One type-erased column of property values.
trait PropertyColumn: Send + Sync {
    fn len(&self) -> usize;
    fn push_default(&mut self);
    fn swap(&mut self, a: usize, b: usize);
    fn truncate(&mut self, len: usize);
    fn clone_column(&self) -> Box<dyn PropertyColumn>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn stored_type(&self) -> &'static str;
}

struct TypedColumn<T> {
    data: Vec<T>,
    default: T,
}

impl<T: Clone + Send + Sync + 'static> PropertyColumn for TypedColumn<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push_default(&mut self) {
        self.data.push(self.default.clone());
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    fn clone_column(&self) -> Box<dyn PropertyColumn> {
        Box::new(Self {
            data: self.data.clone(),
            default: self.default.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn stored_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// The named property columns of one element kind.
///
/// All columns share the length of the owning kind's element array; the
/// mesh calls [`push_default`](Self::push_default), [`swap`](Self::swap)
/// and [`truncate`](Self::truncate) whenever elements are added, permuted
/// or compacted.
pub(crate) struct PropertySet {
    kind: ElementKind,
    columns: HashMap<String, Box<dyn PropertyColumn>>,
}

impl PropertySet {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            columns: HashMap::new(),
        }
    }

    /// Register a new column, filled with `default` up to `len` slots.
    pub(crate) fn add<T: Clone + Send + Sync + 'static>(
        &mut self,
        name: &str,
        default: T,
        len: usize,
    ) -> MeshResult<()> {
        if self.columns.contains_key(name) {
            return Err(MeshError::PropertyExists {
                kind: self.kind,
                name: name.to_owned(),
            });
        }
        let column = TypedColumn {
            data: vec![default.clone(); len],
            default,
        };
        self.columns.insert(name.to_owned(), Box::new(column));
        Ok(())
    }

    pub(crate) fn get<T: Clone + Send + Sync + 'static>(&self, name: &str) -> MeshResult<&[T]> {
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| MeshError::PropertyMissing {
                kind: self.kind,
                name: name.to_owned(),
            })?;
        column
            .as_any()
            .downcast_ref::<TypedColumn<T>>()
            .map(|c| c.data.as_slice())
            .ok_or_else(|| MeshError::PropertyTypeMismatch {
                kind: self.kind,
                name: name.to_owned(),
                expected: std::any::type_name::<T>(),
                actual: column.stored_type(),
            })
    }

    pub(crate) fn get_mut<T: Clone + Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> MeshResult<&mut [T]> {
        let kind = self.kind;
        let column = self
            .columns
            .get_mut(name)
            .ok_or_else(|| MeshError::PropertyMissing {
                kind,
                name: name.to_owned(),
            })?;
        let actual = column.stored_type();
        column
            .as_any_mut()
            .downcast_mut::<TypedColumn<T>>()
            .map(|c| c.data.as_mut_slice())
            .ok_or_else(|| MeshError::PropertyTypeMismatch {
                kind,
                name: name.to_owned(),
                expected: std::any::type_name::<T>(),
                actual,
            })
    }

    /// Drop a column. Returns whether it existed.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.columns.remove(name).is_some()
    }

    /// Append one default-valued slot to every column.
    pub(crate) fn push_default(&mut self) {
        for column in self.columns.values_mut() {
            column.push_default();
        }
    }

    /// Swap two slots in every column.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        for column in self.columns.values_mut() {
            column.swap(a, b);
        }
    }

    /// Truncate every column to `len` slots.
    pub(crate) fn truncate(&mut self, len: usize) {
        for column in self.columns.values_mut() {
            column.truncate(len);
        }
    }

    /// Drop all values but keep the registered columns.
    pub(crate) fn clear_values(&mut self) {
        self.truncate(0);
    }
}

impl Clone for PropertySet {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.clone_column()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, column) in &self.columns {
            map.entry(&name, &format_args!("{} x{}", column.stored_type(), column.len()));
        }
        map.finish()
    }
}
