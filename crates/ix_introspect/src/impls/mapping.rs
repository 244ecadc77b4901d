use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::catalog::{AccessorCatalog, InvokeError};
use crate::impls::clone_as;
use crate::introspection::{Introspect, Shape, Value};

/// Reads a mapping key passed as `String` or `&'static str`.
fn key_of(arg: &dyn Introspect) -> Result<&str, InvokeError> {
    if let Some(key) = arg.downcast_ref::<String>() {
        return Ok(key);
    }
    if let Some(key) = arg.downcast_ref::<&'static str>() {
        return Ok(key);
    }
    Err(InvokeError::ArgumentMismatch {
        expected: "String",
        actual: arg.type_name(),
    })
}

/// The shared catalog of string-keyed mappings. A missing key yields no value.
fn mapping_catalog<M, V>(
    len: fn(&M) -> usize,
    get: for<'m> fn(&'m M, &str) -> Option<&'m V>,
) -> AccessorCatalog
where
    M: Introspect,
    V: Introspect,
{
    AccessorCatalog::builder::<M>()
        .unary_any("get", move |map, key| {
            Ok(get(map, key_of(key)?).map(|value| Value::Ref(value as &dyn Introspect)))
        })
        .computed("getSize", len)
        .computed("isEmpty", move |map| len(map) == 0)
        .build()
}

// -----------------------------------------------------------------------------
// Hash maps

macro_rules! impl_introspect_for_hashmap {
    ($ty:path) => {
        impl<V, S> Introspect for $ty
        where
            V: Introspect,
            S: ::core::hash::BuildHasher + Default + 'static,
        {
            fn catalog(&self) -> AccessorCatalog {
                mapping_catalog::<Self, V>(|m| m.len(), |m, key| m.get(key))
            }

            #[inline]
            fn shape(&self) -> Shape {
                Shape::Mapping
            }

            fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
                let mut map = Self::with_capacity_and_hasher(self.len(), S::default());
                for (key, value) in self.iter() {
                    map.insert(key.clone(), clone_as(value)?);
                }
                Ok(Box::new(map))
            }
        }
    };
}

impl_introspect_for_hashmap!(::std::collections::HashMap<String, V, S>);
impl_introspect_for_hashmap!(::ix_utils::hash::hashbrown::HashMap<String, V, S>);

// -----------------------------------------------------------------------------
// BTreeMap

impl<V: Introspect> Introspect for BTreeMap<String, V> {
    fn catalog(&self) -> AccessorCatalog {
        mapping_catalog::<Self, V>(|m| m.len(), |m, key| m.get(key))
    }

    #[inline]
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        let mut map = BTreeMap::new();
        for (key, value) in self {
            map.insert(key.clone(), clone_as(value)?);
        }
        Ok(Box::new(map))
    }
}

// -----------------------------------------------------------------------------
// Tests
