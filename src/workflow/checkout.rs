//! Package checkout mockup
//!
//! Selection between the two catalog packages, a derived booking summary,
//! and a simulated escrow confirmation. Nothing here touches the network.

use crate::types::marketplace::Package;

/// Platform fee added to every booking
pub const PLATFORM_FEE: f64 = 0.0;

/// The fixed checkout catalog
pub fn catalog() -> [Package; 2] {
    [
        Package::new(
            "Essential Experience",
            50245.0,
            "6 hours of coverage, 300 edited photos, online gallery",
        ),
        Package::new(
            "Elite Experience",
            90441.0,
            "Full-day coverage, two photographers, 600 edited photos, printed album",
        ),
    ]
}

/// Derived booking summary
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub package_name: String,
    pub base_price: f64,
    pub platform_fee: f64,
    pub total: f64,
}

/// Result of the mock escrow confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct EscrowReceipt {
    pub package_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    PackageChosen,
    ConfirmingEscrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    catalog: [Package; 2],
    selected: usize,
    step: CheckoutStep,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    pub fn new() -> Self {
        Self {
            catalog: catalog(),
            selected: 0,
            step: CheckoutStep::PackageChosen,
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.catalog
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Package {
        &self.catalog[self.selected]
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Choose a catalog entry; out-of-range indices are ignored
    pub fn choose(&mut self, index: usize) {
        if index < self.catalog.len() && self.step == CheckoutStep::PackageChosen {
            self.selected = index;
        }
    }

    pub fn summary(&self) -> BookingSummary {
        let package = self.selected();
        BookingSummary {
            package_name: package.name.clone(),
            base_price: package.price,
            platform_fee: PLATFORM_FEE,
            total: package.price + PLATFORM_FEE,
        }
    }

    pub fn open_escrow(&mut self) {
        self.step = CheckoutStep::ConfirmingEscrow;
    }

    /// Always succeeds; returns to package selection
    pub fn confirm_escrow(&mut self) -> Option<EscrowReceipt> {
        if self.step != CheckoutStep::ConfirmingEscrow {
            return None;
        }
        let summary = self.summary();
        tracing::info!(
            "Escrow confirmed for {} ({})",
            summary.package_name,
            summary.total
        );
        self.step = CheckoutStep::PackageChosen;
        Some(EscrowReceipt {
            package_name: summary.package_name,
            amount: summary.total,
        })
    }

    pub fn cancel_escrow(&mut self) {
        self.step = CheckoutStep::PackageChosen;
    }
}
