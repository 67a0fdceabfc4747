use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Asset identity shared by the engine, the endowment and the reward pools.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  /// Engine token, held in pallet-balances
  #[default]
  Native,
  /// Stablecoins and LP shares, held in pallet-assets
  Local(u32),
  /// Bridged assets, held in pallet-assets
  Foreign(u32),
}

// Asset ids reserve their top nibble for the asset class:
// 0x2... stablecoins, 0x4... LP shares, 0xF... bridged

pub const MASK_CLASS: u32 = 0xF000_0000;
pub const MASK_INDEX: u32 = 0x0FFF_FFFF;

pub const CLASS_STABLE: u32 = 0x2000_0000;
pub const CLASS_LP: u32 = 0x4000_0000;
pub const CLASS_FOREIGN: u32 = 0xF000_0000;

impl AssetKind {
  /// Id in pallet-assets, `None` for the native token.
  pub fn asset_id(&self) -> Option<u32> {
    match self {
      AssetKind::Native => None,
      AssetKind::Local(id) | AssetKind::Foreign(id) => Some(*id),
    }
  }

  /// Local asset in the stablecoin class.
  pub fn is_stable(&self) -> bool {
    matches!(self, AssetKind::Local(id) if id & MASK_CLASS == CLASS_STABLE)
  }
}

const fn make_id(class: u32, index: u32) -> u32 {
  class | (index & MASK_INDEX)
}

pub mod well_known {
  use super::*;

  /// Stablecoin the engine pairs its native token against
  pub const USDC: u32 = make_id(CLASS_STABLE, 2);

  /// LP share of the native/USDC pool
  pub const NATIVE_USDC_LP: u32 = make_id(CLASS_LP, 1);
}
