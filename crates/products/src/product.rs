use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ProductCode};

/// Stock level below which a product shows up in reorder listings.
pub const LOW_STOCK_LIMIT: i64 = 30;

/// Catalog entry: an item available for sale.
///
/// State is encapsulated; everything outside this module goes through the
/// accessors and operations below. The stock count is deliberately unbounded
/// in both directions: adjustments never clamp, so a caller that over-draws
/// simply sees a negative count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    code: ProductCode,
    name: String,
    category: String,
    price: f64,
    original_price: f64,
    stock: i64,
}

impl Product {
    /// Create a product. The price given here becomes the original price
    /// that later discounts are computed from.
    pub fn new(
        code: ProductCode,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            category: category.into(),
            price,
            original_price: price,
            stock,
        }
    }

    pub fn code(&self) -> ProductCode {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Currently effective price; equals the original price unless a
    /// discount is active.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn original_price(&self) -> f64 {
        self.original_price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Adjust the stock count by `delta`, positive or negative.
    ///
    /// No bound check: the count may go negative. Policy, if any, belongs
    /// to the caller.
    pub fn adjust_stock(&mut self, delta: i64) {
        self.stock += delta;
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    pub fn is_below_reorder_threshold(&self) -> bool {
        self.stock < LOW_STOCK_LIMIT
    }

    pub fn same_category(&self, other: &Product) -> bool {
        self.category == other.category
    }

    pub fn same_price(&self, other: &Product) -> bool {
        self.price == other.price
    }

    /// Apply a category-scoped discount.
    ///
    /// Returns false without touching the price when `category` does not
    /// match. On a match, a percent of zero restores the original price and
    /// any other value is computed literally (values outside 0..=100 are
    /// accepted as written). Returns true whenever the category matched.
    pub fn apply_category_discount(&mut self, category: &str, percent: f64) -> bool {
        if self.category != category {
            return false;
        }

        if percent == 0.0 {
            self.price = self.original_price;
        } else {
            self.price = self.original_price * (100.0 - percent) / 100.0;
        }
        true
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> ProductCode {
        self.code
    }
}

/// Structural identity: two records describe the same product when code,
/// name, category and effective price all agree. Stock is excluded, so
/// records differing only in quantity can merge.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.name == other.name
            && self.category == other.category
            && self.price == other.price
    }
}

impl core::fmt::Display for Product {
    /// Record card: a box drawn around the five fields, sized to the
    /// longest line. Price is shown with two decimals and a euro suffix.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lines = [
            format!("Code:     {}", self.code),
            format!("Name:     {}", self.name),
            format!("Category: {}", self.category),
            format!("Price:    {:.2}€", self.price),
            format!("Stock:    {} units", self.stock),
        ];

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let border = format!("+{}+", "-".repeat(width + 2));

        writeln!(f, "{border}")?;
        for line in &lines {
            writeln!(f, "| {line:<width$} |")?;
        }
        write!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beans(price: f64, stock: i64) -> Product {
        Product::new(ProductCode::new(101), "Beans", "Food", price, stock)
    }

    #[test]
    fn out_of_stock_at_zero_and_below() {
        assert!(beans(10.0, 0).is_out_of_stock());
        assert!(beans(10.0, -5).is_out_of_stock());
        assert!(!beans(10.0, 1).is_out_of_stock());
    }

    #[test]
    fn reorder_threshold_is_exclusive_at_thirty() {
        assert!(beans(10.0, 29).is_below_reorder_threshold());
        assert!(!beans(10.0, 30).is_below_reorder_threshold());
        assert!(!beans(10.0, 31).is_below_reorder_threshold());
    }

    #[test]
    fn stock_adjustment_is_unbounded() {
        let mut product = beans(10.0, 10);
        product.adjust_stock(-100);
        assert_eq!(product.stock(), -90);
        product.adjust_stock(100);
        assert_eq!(product.stock(), 10);
    }

    #[test]
    fn discount_arithmetic() {
        let mut product = beans(10.0, 10);
        assert!(product.apply_category_discount("Food", 25.0));
        assert_eq!(product.price(), 7.5);
        assert_eq!(product.original_price(), 10.0);
    }

    #[test]
    fn discount_reset_restores_original_price() {
        let mut product = beans(10.0, 10);
        product.apply_category_discount("Food", 20.0);
        assert_eq!(product.price(), 8.0);
        product.apply_category_discount("Food", 0.0);
        assert_eq!(product.price(), 10.0);
    }

    #[test]
    fn discount_ignores_other_categories() {
        let mut product = beans(10.0, 10);
        assert!(!product.apply_category_discount("Books", 50.0));
        assert_eq!(product.price(), 10.0);
    }

    #[test]
    fn discount_percent_is_not_range_checked() {
        let mut product = beans(10.0, 10);
        product.apply_category_discount("Food", 150.0);
        assert_eq!(product.price(), -5.0);
        product.apply_category_discount("Food", -50.0);
        assert_eq!(product.price(), 15.0);
    }

    #[test]
    fn repeated_discounts_compute_from_original_price() {
        let mut product = beans(10.0, 10);
        product.apply_category_discount("Food", 50.0);
        product.apply_category_discount("Food", 10.0);
        assert_eq!(product.price(), 9.0);
    }

    #[test]
    fn structural_equality_excludes_stock() {
        let a = beans(10.0, 5);
        let b = beans(10.0, 500);
        assert_eq!(a, b);
    }

    #[test]
    fn structural_equality_includes_price() {
        let a = beans(10.0, 5);
        let b = beans(12.0, 5);
        assert_ne!(a, b);
    }

    #[test]
    fn structural_equality_includes_name_and_category() {
        let a = beans(10.0, 5);
        let renamed = Product::new(ProductCode::new(101), "Rice", "Food", 10.0, 5);
        let recategorized = Product::new(ProductCode::new(101), "Beans", "Books", 10.0, 5);
        assert_ne!(a, renamed);
        assert_ne!(a, recategorized);
    }

    #[test]
    fn card_pads_every_line_to_the_longest() {
        let product = beans(10.0, 12);
        let expected = "\
+--------------------+
| Code:     101      |
| Name:     Beans    |
| Category: Food     |
| Price:    10.00€   |
| Stock:    12 units |
+--------------------+";
        assert_eq!(product.to_string(), expected);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a sequence of adjustments lands on the sum of its
            /// deltas, positive or negative.
            #[test]
            fn adjustments_accumulate(
                start in -1_000i64..1_000,
                deltas in proptest::collection::vec(-1_000i64..1_000, 0..32),
            ) {
                let mut product =
                    Product::new(ProductCode::new(1), "P", "C", 1.0, start);
                for delta in &deltas {
                    product.adjust_stock(*delta);
                }
                prop_assert_eq!(product.stock(), start + deltas.iter().sum::<i64>());
            }

            /// Property: any discount followed by a zero-percent reset
            /// restores the original price exactly.
            #[test]
            fn reset_restores_original_price(
                price in 0.01f64..10_000.0,
                percent in -200.0f64..200.0,
            ) {
                let mut product =
                    Product::new(ProductCode::new(1), "P", "C", price, 1);
                product.apply_category_discount("C", percent);
                product.apply_category_discount("C", 0.0);
                prop_assert_eq!(product.price(), price);
            }

            /// Property: a non-matching category never touches the price and
            /// always reports false.
            #[test]
            fn mismatched_category_is_a_no_op(
                price in 0.01f64..10_000.0,
                percent in -200.0f64..200.0,
            ) {
                let mut product =
                    Product::new(ProductCode::new(1), "P", "Food", price, 1);
                prop_assert!(!product.apply_category_discount("Books", percent));
                prop_assert_eq!(product.price(), price);
            }

            /// Property: the discount formula is applied literally.
            #[test]
            fn discount_formula_is_literal(
                price in 0.01f64..10_000.0,
                percent in 0.01f64..100.0,
            ) {
                let mut product =
                    Product::new(ProductCode::new(1), "P", "C", price, 1);
                prop_assert!(product.apply_category_discount("C", percent));
                prop_assert_eq!(product.price(), price * (100.0 - percent) / 100.0);
            }
        }
    }
}
