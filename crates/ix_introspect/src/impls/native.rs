use alloc::boxed::Box;
use alloc::string::String;

use crate::Introspect;
use crate::catalog::{AccessorCatalog, InvokeError};

macro_rules! impl_introspect_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Introspect for $ty {
                #[inline]
                fn catalog(&self) -> AccessorCatalog {
                    AccessorCatalog::empty::<Self>()
                }

                #[inline]
                fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
                    Ok(Box::new(*self))
                }
            }
        )*
    };
}

impl_introspect_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Introspect for String {
    fn catalog(&self) -> AccessorCatalog {
        AccessorCatalog::builder::<Self>()
            .computed("getLength", String::len)
            .computed("isEmpty", String::is_empty)
            .build()
    }

    #[inline]
    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        Ok(Box::new(self.clone()))
    }
}

impl Introspect for &'static str {
    fn catalog(&self) -> AccessorCatalog {
        AccessorCatalog::builder::<Self>()
            .computed("getLength", |s| s.len())
            .computed("isEmpty", |s| s.is_empty())
            .build()
    }

    #[inline]
    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        Ok(Box::new(*self))
    }
}

// -----------------------------------------------------------------------------
// Tests
