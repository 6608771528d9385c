// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed root namespace used for top-level campaigns and library-scoped
//! manifests.

use uuid::Uuid;

/// Fixed namespace UUID standing in for "no parent campaign". Top-level
/// campaigns are derived as `UUID5(ROOT, name)`; manifests with no
/// `namespace` argument live here too (the "library").
pub fn root() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, b"campaign-manager:root")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_stable() {
        assert_eq!(root(), root());
        assert_eq!(root(), Uuid::new_v5(&Uuid::NAMESPACE_URL, b"campaign-manager:root"));
    }
}
