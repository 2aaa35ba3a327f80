use std::fmt;

/// SPIR-V version as stored in the module header.
///
/// The header word is laid out as `0x00MMmm00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpirvVersion {
    major: u8,
    minor: u8,
}

impl SpirvVersion {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Decode the version word of a module header.
    pub fn from_word(word: u32) -> Self {
        Self {
            major: ((word >> 16) & 0xff) as u8,
            minor: ((word >> 8) & 0xff) as u8,
        }
    }

    /// Encode as a header version word.
    pub fn to_word(self) -> u32 {
        (u32::from(self.major) << 16) | (u32::from(self.minor) << 8)
    }
}

impl fmt::Display for SpirvVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word() {
        assert_eq!(SpirvVersion::from_word(0x0001_0500), SpirvVersion::new(1, 5));
        assert_eq!(SpirvVersion::from_word(0x0001_0000), SpirvVersion::new(1, 0));
    }

    #[test]
    fn test_to_word() {
        assert_eq!(SpirvVersion::new(1, 3).to_word(), 0x0001_0300);
        assert_eq!(
            SpirvVersion::from_word(SpirvVersion::new(1, 6).to_word()),
            SpirvVersion::new(1, 6)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SpirvVersion::new(1, 0).to_string(), "1.0");
        assert_eq!(SpirvVersion::new(1, 6).to_string(), "1.6");
        assert_eq!(SpirvVersion::default().to_string(), "0.0");
    }

    #[test]
    fn test_ordering() {
        assert!(SpirvVersion::new(1, 5) > SpirvVersion::new(1, 3));
        assert!(SpirvVersion::new(2, 0) > SpirvVersion::new(1, 6));
    }
}
