/// Generates symbol names that can never collide with a parsed symbol.
///
/// Parsed names consist only of ASCII letters, so every generated name starts with an underscore.
/// Each generator counts independently, which keeps the names handed out while building one
/// derivation deterministic.
#[derive(Debug, Clone, Default)]
pub struct FreshSymbols {
    next: usize,
}

/// The prefix of every generated name.
pub const FRESH_PREFIX: &str = "_u";

impl FreshSymbols {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a name that this generator has not returned before.
    pub fn next_name(&mut self) -> String {
        self.next += 1;
        format!("{}{}", FRESH_PREFIX, self.next)
    }
}

/// Returns true if the name was produced by a [`FreshSymbols`] generator.
pub fn is_fresh(name: &str) -> bool {
    name.starts_with(FRESH_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_reserved() {
        let mut fresh = FreshSymbols::new();
        let a = fresh.next_name();
        let b = fresh.next_name();
        assert_ne!(a, b);
        assert!(is_fresh(&a));
        assert!(crate::parse(&a).is_err());
    }
}
