//! Same-type and widening conversions between value shapes.
//!
//! Only conversions Rust itself treats as lossless are provided: the
//! primitive `From` impls between numeric types (and `char` into the wide
//! unsigned integers). With the `rust_decimal` feature, every integer type up
//! to 64 bits also widens into [`rust_decimal::Decimal`].

use core::any::TypeId;
use core::fmt;
use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::{Value, ValueShape};

/// Converts a value of one shape into another, or hands it back unchanged if
/// it was not of the expected source shape.
pub type WidenFn = fn(Value) -> Result<Value, Value>;

fn widen<S, D>(value: Value) -> Result<Value, Value>
where
    S: 'static,
    D: From<S> + 'static,
{
    value.downcast::<S>().map(|v| Value::new(D::from(v)))
}

macro_rules! widenings {
    ($table:ident; $($from:ty => [$($to:ty),* $(,)?]),* $(,)?) => {
        $($(
            $table.insert(
                (TypeId::of::<$from>(), TypeId::of::<$to>()),
                widen::<$from, $to> as WidenFn,
            );
        )*)*
    };
}

static WIDENINGS: LazyLock<HashMap<(TypeId, TypeId), WidenFn>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    widenings! { table;
        i8 => [i16, i32, i64, i128, f32, f64],
        u8 => [u16, u32, u64, u128, i16, i32, i64, i128, f32, f64],
        i16 => [i32, i64, i128, f32, f64],
        u16 => [u32, u64, u128, i32, i64, i128, f32, f64],
        i32 => [i64, i128, f64],
        u32 => [u64, u128, i64, i128, f64],
        i64 => [i128],
        u64 => [u128, i128],
        f32 => [f64],
        char => [u32, u64, u128],
    }
    #[cfg(feature = "rust_decimal")]
    {
        use rust_decimal::Decimal;
        widenings! { table;
            i8 => [Decimal],
            u8 => [Decimal],
            i16 => [Decimal],
            u16 => [Decimal],
            i32 => [Decimal],
            u32 => [Decimal],
            i64 => [Decimal],
            u64 => [Decimal],
        }
    }
    table
});

/// How a value of one shape becomes a value of another.
#[derive(Clone, Copy)]
pub enum Conversion {
    /// Source and target are the same type.
    Identity {
        /// The shared shape.
        shape: ValueShape,
    },
    /// A lossless widening, e.g. `i32` into `i64`.
    Widen {
        /// Source shape.
        from: ValueShape,
        /// Target shape.
        to: ValueShape,
        /// Performs the conversion.
        convert: WidenFn,
    },
}

impl Conversion {
    /// Finds the conversion from `from` to `to`, if there is one.
    pub fn between(from: ValueShape, to: ValueShape) -> Option<Conversion> {
        if from == to {
            return Some(Conversion::Identity { shape: from });
        }
        WIDENINGS
            .get(&(from.id(), to.id()))
            .map(|&convert| Conversion::Widen { from, to, convert })
    }

    /// Shape the conversion expects as input.
    pub fn from_shape(&self) -> ValueShape {
        match *self {
            Conversion::Identity { shape } => shape,
            Conversion::Widen { from, .. } => from,
        }
    }

    /// Shape the conversion produces.
    pub fn to_shape(&self) -> ValueShape {
        match *self {
            Conversion::Identity { shape } => shape,
            Conversion::Widen { to, .. } => to,
        }
    }

    /// Returns `true` if no work is needed.
    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Conversion::Identity { .. })
    }

    /// Converts `value`. A value that is not of [`Self::from_shape`] is
    /// handed back as the error.
    pub fn apply(&self, value: Value) -> Result<Value, Value> {
        match *self {
            Conversion::Identity { shape } if value.shape() == shape => Ok(value),
            Conversion::Identity { .. } => Err(value),
            Conversion::Widen { convert, .. } => convert(value),
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Identity { shape } => write!(f, "{shape}"),
            Conversion::Widen { from, to, .. } => write!(f, "{from} as {to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape<V: 'static>() -> ValueShape {
        ValueShape::of::<V>()
    }

    #[test]
    fn same_type_is_identity() {
        let conversion = Conversion::between(shape::<String>(), shape::<String>()).unwrap();
        assert!(conversion.is_identity());
        let out = conversion.apply(Value::new(String::from("x"))).unwrap();
        assert_eq!(out.downcast::<String>().unwrap(), "x");
    }

    #[test]
    fn narrow_integers_widen() {
        let conversion = Conversion::between(shape::<i32>(), shape::<i64>()).unwrap();
        assert!(!conversion.is_identity());
        let out = conversion.apply(Value::new(-42i32)).unwrap();
        assert_eq!(out.downcast::<i64>().unwrap(), -42i64);

        let conversion = Conversion::between(shape::<u8>(), shape::<f64>()).unwrap();
        let out = conversion.apply(Value::new(200u8)).unwrap();
        assert_eq!(out.downcast::<f64>().unwrap(), 200.0);

        let conversion = Conversion::between(shape::<char>(), shape::<u32>()).unwrap();
        let out = conversion.apply(Value::new('A')).unwrap();
        assert_eq!(out.downcast::<u32>().unwrap(), 65);
    }

    #[test]
    fn lossy_and_unrelated_conversions_are_refused() {
        assert!(Conversion::between(shape::<i64>(), shape::<i32>()).is_none());
        assert!(Conversion::between(shape::<i32>(), shape::<f32>()).is_none());
        assert!(Conversion::between(shape::<u32>(), shape::<i32>()).is_none());
        assert!(Conversion::between(shape::<i32>(), shape::<String>()).is_none());
    }

    #[test]
    fn apply_hands_back_values_of_the_wrong_shape() {
        let conversion = Conversion::between(shape::<i32>(), shape::<i64>()).unwrap();
        let rejected = conversion.apply(Value::new(1u8)).unwrap_err();
        assert_eq!(rejected.shape(), shape::<u8>());

        let identity = Conversion::between(shape::<bool>(), shape::<bool>()).unwrap();
        assert!(identity.apply(Value::new(1u8)).is_err());
    }

    #[test]
    fn debug_names_both_ends() {
        let conversion = Conversion::between(shape::<i16>(), shape::<i64>()).unwrap();
        assert_eq!(format!("{conversion:?}"), "i16 as i64");
    }

    #[cfg(feature = "rust_decimal")]
    #[test]
    fn integers_widen_into_decimal() {
        use rust_decimal::Decimal;

        let conversion = Conversion::between(shape::<i32>(), shape::<Decimal>()).unwrap();
        let out = conversion.apply(Value::new(300i32)).unwrap();
        assert_eq!(out.downcast::<Decimal>().unwrap(), Decimal::from(300));
        assert!(Conversion::between(shape::<f64>(), shape::<Decimal>()).is_none());
    }
}
