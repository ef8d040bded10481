pub use num_traits::ConstOne;
pub use num_traits::ConstZero;
pub use num_traits::One;
pub use num_traits::Zero;
pub use subtle::ConditionallySelectable;
pub use subtle::ConstantTimeEq;

pub use crate::fp;
pub use crate::fp::Fp;
pub use crate::fp2;
pub use crate::fp2::Fp2;
pub use crate::traits::MontgomeryField;
