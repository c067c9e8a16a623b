//! Wrapping native callables behind foreign-safe signatures.
//!
//! [`wrap`] pairs a callable with its native argument tuple. The resulting
//! [`Wrapped`] value converts a tuple of foreign arguments into native ones
//! through [`ForeignParam`], calls the native function, and converts the
//! result through [`ForeignReturn`]. The exported `extern "C"` functions
//! generated by the macros are thin shells around [`Wrapped::call`].

use std::fmt;
use std::marker::PhantomData;

use crate::error::BindError;
use crate::param::{ForeignParam, ForeignReturn};
use crate::signature::{ParamSig, Signature};

/// A tuple of native parameter types.
pub trait ForeignArgs: Sized {
    /// The tuple of foreign parameter types.
    type Foreign: Copy;

    /// Descriptions of each parameter, in order.
    fn params() -> Vec<ParamSig>;

    /// Convert every argument, stopping at the first failure.
    ///
    /// # Safety
    ///
    /// See [`ForeignParam::from_foreign`].
    unsafe fn from_foreign(foreign: Self::Foreign) -> Result<Self, BindError>;
}

/// A callable taking the native argument tuple `Args`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be called with the argument types `{Args}`",
    label = "parameter count or types differ from the declared signature"
)]
pub trait NativeFn<Args> {
    type Output;

    fn call_native(&self, args: Args) -> Self::Output;
}

macro_rules! impl_foreign_args {
    ($($arg:ident $foreign:ident),*) => {
        impl<$($arg: ForeignParam),*> ForeignArgs for ($($arg,)*) {
            type Foreign = ($($arg::Foreign,)*);

            fn params() -> Vec<ParamSig> {
                vec![$(ParamSig::of::<$arg>()),*]
            }

            #[allow(unused_unsafe, clippy::unused_unit)]
            unsafe fn from_foreign(foreign: Self::Foreign) -> Result<Self, BindError> {
                let ($($foreign,)*) = foreign;
                Ok(($(unsafe { $arg::from_foreign($foreign) }?,)*))
            }
        }

        impl<Func, Ret, $($arg),*> NativeFn<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            fn call_native(&self, ($($arg,)*): ($($arg,)*)) -> Ret {
                (self)($($arg),*)
            }
        }
    };
}

impl_foreign_args!();
impl_foreign_args!(A0 f0);
impl_foreign_args!(A0 f0, A1 f1);
impl_foreign_args!(A0 f0, A1 f1, A2 f2);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4, A5 f5);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4, A5 f5, A6 f6);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4, A5 f5, A6 f6, A7 f7);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4, A5 f5, A6 f6, A7 f7, A8 f8);
impl_foreign_args!(A0 f0, A1 f1, A2 f2, A3 f3, A4 f4, A5 f5, A6 f6, A7 f7, A8 f8, A9 f9);

/// A native callable together with its native argument tuple.
pub struct Wrapped<F, Args> {
    f: F,
    _args: PhantomData<fn(Args)>,
}

impl<F, Args> Wrapped<F, Args>
where
    Args: ForeignArgs,
    F: NativeFn<Args>,
    F::Output: ForeignReturn,
{
    /// Call with foreign arguments.
    ///
    /// Conversion failures are returned before the native function runs.
    ///
    /// # Safety
    ///
    /// See [`ForeignParam::from_foreign`].
    pub unsafe fn call(
        &self,
        foreign: Args::Foreign,
    ) -> Result<<F::Output as ForeignReturn>::Foreign, BindError> {
        let args = unsafe { Args::from_foreign(foreign) }?;
        Ok(self.f.call_native(args).into_foreign())
    }

    /// The mapped signature.
    pub fn signature(&self) -> Signature {
        signature_of::<Args, F::Output>()
    }
}

impl<F, Args> fmt::Debug for Wrapped<F, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("args", &std::any::type_name::<Args>())
            .finish_non_exhaustive()
    }
}

/// Wrap a native callable; the argument tuple is inferred from `F`.
pub fn wrap<Args, F>(f: F) -> Wrapped<F, Args>
where
    Args: ForeignArgs,
    F: NativeFn<Args>,
    F::Output: ForeignReturn,
{
    Wrapped {
        f,
        _args: PhantomData,
    }
}

/// Wrap a native callable against an explicitly declared signature.
///
/// Fails to compile when `F` takes other arguments or returns another type.
pub fn wrap_as<Args, R, F>(f: F) -> Wrapped<F, Args>
where
    Args: ForeignArgs,
    R: ForeignReturn,
    F: NativeFn<Args, Output = R>,
{
    Wrapped {
        f,
        _args: PhantomData,
    }
}

/// The mapped signature of a native signature.
pub fn signature_of<Args: ForeignArgs, R: ForeignReturn>() -> Signature {
    Signature::new(Args::params(), R::FOREIGN)
}
