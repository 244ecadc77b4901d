use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::catalog::{AccessorCatalog, InvokeError};
use crate::impls::clone_as;
use crate::introspection::{Introspect, Shape, Value};

/// The shared catalog of sequences and arrays.
///
/// `get(usize)` fails with [`InvokeError::IndexOutOfBounds`] past the end.
fn sequence_catalog<C, T>(
    len: fn(&C) -> usize,
    get: fn(&C, usize) -> Option<&T>,
) -> AccessorCatalog
where
    C: Introspect,
    T: Introspect,
{
    AccessorCatalog::builder::<C>()
        .unary::<usize, _>("get", move |seq, &index| match get(seq, index) {
            Some(item) => Ok(Some(Value::Ref(item))),
            None => Err(InvokeError::IndexOutOfBounds {
                index,
                len: len(seq),
            }),
        })
        .computed("getSize", len)
        .computed("isEmpty", move |seq| len(seq) == 0)
        .build()
}

fn clone_items<'a, T: Introspect>(
    items: impl ExactSizeIterator<Item = &'a T>,
) -> Result<Vec<T>, InvokeError> {
    let mut vec = Vec::with_capacity(items.len());
    for item in items {
        vec.push(clone_as(item)?);
    }
    Ok(vec)
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Introspect> Introspect for Vec<T> {
    fn catalog(&self) -> AccessorCatalog {
        sequence_catalog::<Self, T>(|v| v.len(), |v, i| v.get(i))
    }

    #[inline]
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        Ok(Box::new(clone_items(self.iter())?))
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn catalog(&self) -> AccessorCatalog {
        sequence_catalog::<Self, T>(|v| v.len(), |v, i| v.get(i))
    }

    #[inline]
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        let items: VecDeque<T> = clone_items(self.iter())?.into();
        Ok(Box::new(items))
    }
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn catalog(&self) -> AccessorCatalog {
        sequence_catalog::<Self, T>(|a| a.len(), |a, i| a.get(i))
    }

    #[inline]
    fn shape(&self) -> Shape {
        Shape::Array
    }

    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        let items: [T; N] = clone_items(self.iter())?
            .try_into()
            .map_err(|_| InvokeError::NotCloneable {
                type_name: self.type_name(),
            })?;
        Ok(Box::new(items))
    }
}

impl<T: Introspect> Introspect for Box<[T]> {
    fn catalog(&self) -> AccessorCatalog {
        sequence_catalog::<Self, T>(|a| a.len(), |a, i| a.get(i))
    }

    #[inline]
    fn shape(&self) -> Shape {
        Shape::Array
    }

    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        Ok(Box::new(clone_items(self.iter())?.into_boxed_slice()))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::Introspect;
    use crate::catalog::InvokeError;
    use crate::introspection::Shape;

    #[test]
    fn get_past_the_end_is_out_of_bounds() {
        let items = vec![10_u16, 20];
        let catalog = items.catalog();
        let get = catalog.resolve("get", &[TypeId::of::<usize>()]).unwrap().unwrap();

        let item = get.invoke(&items, &[&1_usize as &dyn Introspect]).unwrap().unwrap();
        assert_eq!(item.downcast_ref::<u16>(), Some(&20));

        let err = get.invoke(&items, &[&2_usize as &dyn Introspect]).unwrap_err();
        assert!(matches!(err, InvokeError::IndexOutOfBounds { index: 2, len: 2 }));
    }

    #[test]
    fn arrays_and_sequences_share_accessors() {
        let array = [1_i8, 2, 3];
        let boxed: Box<[i8]> = Box::new([1, 2, 3]);
        let deque: VecDeque<i8> = VecDeque::from([1, 2, 3]);

        assert_eq!(array.shape(), Shape::Array);
        assert_eq!(boxed.shape(), Shape::Array);
        assert_eq!(deque.shape(), Shape::Sequence);

        for value in [&array as &dyn Introspect, &boxed, &deque] {
            let catalog = value.catalog();
            assert!(catalog.contains("get"));
            assert!(catalog.contains("getSize"));
            assert!(catalog.contains("isEmpty"));
        }
    }

    #[test]
    fn clone_is_element_wise() {
        let nested = vec![vec![1_u8], vec![2, 3]];
        let cloned = nested.clone_value().unwrap();
        assert_eq!(cloned.downcast_ref::<Vec<Vec<u8>>>(), Some(&nested));

        let array = [true, false];
        let cloned = array.clone_value().unwrap();
        assert_eq!(cloned.downcast_ref::<[bool; 2]>(), Some(&array));
    }
}
