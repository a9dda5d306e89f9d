//! Shared fixture for integration tests.
//!
//! Builds a small Java-style project in a temporary directory:
//!
//! | module             | files | lines |
//! |--------------------|-------|-------|
//! | `pl.tfij.commons`  | 1     | 17    |
//! | `pl.tfij.orders`   | 3     | 177   |
//! | `pl.tfij.payments` | 3     | 240   |
//! | `pl.tfij.products` | 5     | 441   |
//! | `pl.tfij.shipping` | 2     | 52    |
//! | `pl.tfij.users`    | 3     | 91    |
//! | `undefined`        | 5     | 10    |
//!
//! `products` holds one `.csv` file (45 lines); the undefined bucket holds
//! two `.java` files (7 lines), one extensionless file and two others.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use camino::Utf8PathBuf;
use modsize::ModuleSizeCalculatorBuilder;
use tempfile::TempDir;

pub const TOTAL_LINES: usize = 1028;
pub const TOTAL_FILES: usize = 22;

const FILES: &[(&str, usize)] = &[
    ("pl/tfij/commons/DateUtils.java", 17),
    ("pl/tfij/orders/Order.java", 28),
    ("pl/tfij/orders/OrderService.java", 73),
    ("pl/tfij/orders/OrderHistory.java", 76),
    ("pl/tfij/payments/BillingService.java", 84),
    ("pl/tfij/payments/PaymentGateway.java", 60),
    ("pl/tfij/payments/PaymentProcessor.java", 96),
    ("pl/tfij/products/ProductDiscount.java", 98),
    ("pl/tfij/products/ProductRepository.java", 47),
    ("pl/tfij/products/ProductReview.java", 57),
    ("pl/tfij/products/ProductCatalog.java", 194),
    ("pl/tfij/products/prices.csv", 45),
    ("pl/tfij/shipping/ShippingService.java", 27),
    ("pl/tfij/shipping/ShippingInfo.java", 25),
    ("pl/tfij/users/UserRoleServiceImpl.java", 13),
    ("pl/tfij/users/User.java", 28),
    ("pl/tfij/users/UserServiceImpl.java", 50),
    ("pl/tfij/App.java", 4),
    ("pl/tfij/orders-extra/Legacy.java", 3),
    ("build.gradle", 1),
    ("LICENSE", 1),
    ("notes.txt", 1),
];

/// Write `lines` newline-terminated lines to `path`, creating parents.
pub fn write_lines(path: &Path, lines: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content: String = (1..=lines).map(|i| format!("line {i}\n")).collect();
    fs::write(path, content).unwrap();
}

/// Create the fixture project in a fresh temporary directory.
pub fn test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (path, lines) in FILES {
        write_lines(&tmp.path().join(path), *lines);
    }
    tmp
}

/// UTF-8 path of a temporary directory.
pub fn root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
}

/// Builder with the six fixture modules declared.
pub fn six_modules(tmp: &TempDir) -> ModuleSizeCalculatorBuilder {
    modsize::project(root(tmp))
        .with_module("pl.tfij.commons")
        .with_module("pl.tfij.orders")
        .with_module("pl.tfij.payments")
        .with_module("pl.tfij.products")
        .with_module("pl.tfij.shipping")
        .with_module("pl.tfij.users")
}
