use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

//===========================================================================//

/// The square dimension of one icon image, in pixels.  Always between 1 and
/// 256 inclusive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct IconSize(u16);

impl IconSize {
    /// The smallest size an ICO directory entry can describe.
    pub const MIN: IconSize = IconSize(1);

    /// The largest size an ICO directory entry can describe.
    pub const MAX: IconSize = IconSize(256);

    /// Returns the size, or `Error::InvalidSize` if it is out of range.
    pub fn new(size: u32) -> Result<IconSize> {
        if size < IconSize::MIN.get() || size > IconSize::MAX.get() {
            invalid_size!(size);
        }
        Ok(IconSize(size as u16))
    }

    /// Returns the size in pixels.
    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// Returns the size as a render target.
    pub fn to_non_zero(self) -> NonZeroU32 {
        NonZeroU32::MIN.saturating_add(self.get() - 1)
    }

    /// Returns the value stored in an ICONDIRENTRY width/height byte.
    pub fn dimension_byte(self) -> u8 {
        // The field is only one byte wide, so a zero stands in for 256.
        if self == IconSize::MAX {
            0
        } else {
            self.0 as u8
        }
    }
}

impl TryFrom<u32> for IconSize {
    type Error = Error;

    fn try_from(size: u32) -> Result<IconSize> {
        IconSize::new(size)
    }
}

impl TryFrom<i64> for IconSize {
    type Error = Error;

    fn try_from(size: i64) -> Result<IconSize> {
        match u32::try_from(size) {
            Ok(size) => IconSize::new(size),
            Err(_) => invalid_size!(size),
        }
    }
}

impl From<IconSize> for u32 {
    fn from(size: IconSize) -> u32 {
        size.get()
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::IconSize;
    use crate::error::Error;

    #[test]
    fn accepts_full_range() {
        for size in 1..=256u32 {
            assert_eq!(IconSize::new(size).unwrap().get(), size);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for &size in &[0i64, 257, 1000, -5, i64::MIN] {
            match IconSize::try_from(size) {
                Err(Error::InvalidSize(value)) => assert_eq!(value, size),
                other => panic!("expected InvalidSize, got {:?}", other),
            }
        }
    }

    #[test]
    fn non_zero_conversion_keeps_value() {
        assert_eq!(IconSize::MIN.to_non_zero().get(), 1);
        assert_eq!(IconSize::MAX.to_non_zero().get(), 256);
        assert_eq!(IconSize::new(48).unwrap().to_non_zero().get(), 48);
    }

    #[test]
    fn dimension_byte_maps_256_to_zero() {
        assert_eq!(IconSize::MAX.dimension_byte(), 0);
        assert_eq!(IconSize::new(255).unwrap().dimension_byte(), 255);
        assert_eq!(IconSize::new(48).unwrap().dimension_byte(), 48);
        assert_eq!(IconSize::MIN.dimension_byte(), 1);
    }

    #[test]
    fn error_message_names_the_size() {
        let error = IconSize::new(257).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid icon size: 257. Size must be between 1 and 256."
        );
    }
}

//===========================================================================//
