#![cfg_attr(not(feature = "std"), no_std)]

pub mod assets;
pub mod ecosystem;
pub mod guard;
pub mod traits;

pub use assets::*;
pub use ecosystem::*;
pub use guard::ReentrancyGuard;
pub use traits::*;
