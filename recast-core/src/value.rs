use core::any::Any;
use core::fmt;

use crate::ValueShape;

/// An owned, type-erased value tagged with its [`ValueShape`].
///
/// Values only live for the duration of a single rebuild: they are read off
/// the original record, optionally widened, then moved into a constructor.
pub struct Value {
    shape: ValueShape,
    data: Box<dyn Any>,
    clone: Option<CloneFn>,
}

type CloneFn = fn(&dyn Any) -> Option<Box<dyn Any>>;

fn clone_data<V: Clone + 'static>(data: &dyn Any) -> Option<Box<dyn Any>> {
    data.downcast_ref::<V>()
        .map(|value| Box::new(value.clone()) as Box<dyn Any>)
}

impl Value {
    /// Wraps `value`.
    #[inline]
    pub fn new<V: 'static>(value: V) -> Self {
        Self {
            shape: ValueShape::of::<V>(),
            data: Box::new(value),
            clone: None,
        }
    }

    /// Wraps `value`, remembering how to clone it for [`Value::try_clone`].
    #[inline]
    pub fn cloneable<V: Clone + 'static>(value: V) -> Self {
        Self {
            shape: ValueShape::of::<V>(),
            data: Box::new(value),
            clone: Some(clone_data::<V>),
        }
    }

    /// Returns a copy if this value was wrapped with [`Value::cloneable`].
    pub fn try_clone(&self) -> Option<Value> {
        let clone = self.clone?;
        Some(Value {
            shape: self.shape,
            data: clone(&*self.data)?,
            clone: Some(clone),
        })
    }

    /// The shape of the wrapped value.
    #[inline]
    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    /// Takes the wrapped value out, or hands `self` back if it is not a `V`.
    pub fn downcast<V: 'static>(self) -> Result<V, Value> {
        let Value { shape, data, clone } = self;
        match data.downcast::<V>() {
            Ok(value) => Ok(*value),
            Err(data) => Err(Value { shape, data, clone }),
        }
    }

    /// Borrows the wrapped value if it is a `V`.
    #[inline]
    pub fn downcast_ref<V: 'static>(&self) -> Option<&V> {
        self.data.downcast_ref::<V>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.shape)
    }
}

/// The ordered arguments handed to a constructor's `build` function.
pub struct ArgList {
    args: std::vec::IntoIter<Value>,
    index: usize,
}

impl ArgList {
    /// Wraps arguments, in parameter order.
    pub fn new(args: Vec<Value>) -> Self {
        Self {
            args: args.into_iter(),
            index: 0,
        }
    }

    /// Pops the next argument as a `V`.
    pub fn take<V: 'static>(&mut self) -> Result<V, ArgError> {
        let index = self.index;
        self.index += 1;
        let expected = ValueShape::of::<V>();
        let value = self.args.next().ok_or(ArgError::Missing { index, expected })?;
        value.downcast::<V>().map_err(|value| ArgError::Mismatch {
            index,
            expected,
            actual: value.shape(),
        })
    }

    /// Number of arguments not yet taken.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Debug for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgList")
            .field("index", &self.index)
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// A constructor argument did not match its declared parameter.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ArgError {
    /// The argument at `index` has the wrong shape.
    Mismatch {
        /// Zero-based parameter position.
        index: usize,
        /// Shape the parameter declares.
        expected: ValueShape,
        /// Shape of the value that was supplied.
        actual: ValueShape,
    },
    /// The argument list ran out before parameter `index`.
    Missing {
        /// Zero-based parameter position.
        index: usize,
        /// Shape the parameter declares.
        expected: ValueShape,
    },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::Mismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "argument {index} should be {expected}, but got {actual}"
            ),
            ArgError::Missing { index, expected } => {
                write!(f, "argument {index} ({expected}) is missing")
            }
        }
    }
}

impl fmt::Debug for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl core::error::Error for ArgError {}
