use std::fmt;

/// XrApi version the sample is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrApiVersion {
    pub product: u32,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
    pub description: &'static str,
    /// Minimum driver build required by this API
    pub driver: u32,
}

impl XrApiVersion {
    pub const CURRENT: Self = Self {
        product: 1,
        major: 1,
        minor: 30,
        patch: 0,
        build: 193174766,
        description: "Development",
        driver: 193174766,
    };

    pub fn supports_driver(&self, driver_build: u32) -> bool {
        driver_build >= self.driver
    }
}

impl fmt::Display for XrApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.product, self.major, self.minor, self.patch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_version() {
        let v = XrApiVersion::CURRENT;
        assert_eq!(v.to_string(), "1.1.30.0");
        assert!(v.supports_driver(193174766));
        assert!(!v.supports_driver(193174765));
    }
}
