use crate::domain::Product;

/// Flat GST rate applied to every taxable article. Process-wide; there is no
/// per-jurisdiction or per-article rate variation, only the applicability
/// flag on the product.
pub const GST_RATE: f64 = 0.18;

/// One article entry in an active sale, with its own quantity and derived
/// monetary fields.
///
/// `rate` is frozen when the line is created; `gst` and `line_total` are
/// recomputed on every mutation and always satisfy
/// `line_total == quantity * rate + gst`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    // Display fields snapshotted for the invoice formatter, which only ever
    // sees the cart snapshot.
    pub article_code: String,
    pub fabric_description: String,
    pub color: String,
    pub quantity: u32,
    pub rate: f64,
    pub gst: f64,
    pub line_total: f64,
}

impl CartLine {
    /// Recompute the derived fields from quantity, the frozen rate, and the
    /// current tax applicability of the underlying article.
    fn recompute(&mut self, gst_applicable: bool) {
        let subtotal = self.quantity as f64 * self.rate;
        self.gst = if gst_applicable { subtotal * GST_RATE } else { 0.0 };
        self.line_total = subtotal + self.gst;
    }
}

/// Aggregate amounts over all cart lines. Derived on every read, never
/// stored, so they cannot drift from the line collection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub subtotal: f64,
    pub total_gst: f64,
    pub grand_total: f64,
}

/// Customer identification entered on the billing screen. Validation of
/// required fields (e.g. name before completing a sale) belongs to the
/// calling layer, not the pricing engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// The billing cart: an ordered collection of [`CartLine`] keyed by line id,
/// plus the customer fields that live and die with the sale.
///
/// Invariant: at most one line per product id. `add_item` coalesces repeat
/// adds into the existing line instead of inserting a duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: String,
    pub customer: CustomerDetails,
    lines: Vec<CartLine>,
    next_line_seq: u64,
}

/// Point-in-time view of a cart handed to the invoice formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub cart_id: String,
    pub customer: CustomerDetails,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl Cart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer: CustomerDetails::default(),
            lines: Vec::new(),
            next_line_seq: 1,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product` to the sale.
    ///
    /// If a line for the same product already exists its quantity is bumped
    /// by one; otherwise a new line is appended with quantity 1 and the rate
    /// frozen from the product. Always succeeds; returns the line id.
    pub fn add_item(&mut self, product: &Product) -> String {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            line.recompute(product.gst_applicable);
            return line.id.clone();
        }

        let mut line = CartLine {
            id: format!("CART-{}", self.next_line_seq),
            product_id: product.id.clone(),
            article_code: product.article_code.clone(),
            fabric_description: product.fabric_description.clone(),
            color: product.color.clone(),
            quantity: 1,
            rate: product.sale_rate,
            gst: 0.0,
            line_total: 0.0,
        };
        self.next_line_seq += 1;
        line.recompute(product.gst_applicable);

        let id = line.id.clone();
        self.lines.push(line);
        id
    }

    /// Set a line's quantity and recompute its derived fields.
    ///
    /// A quantity of zero or less removes the line outright. The caller
    /// supplies the article's *current* tax applicability (a missing article
    /// degrades to non-taxable at the lookup seam); the stored rate stays
    /// frozen at its add-time value.
    ///
    /// Returns the updated line, or `None` when the line is absent from the
    /// cart afterwards, whether because it was just removed or was never
    /// there.
    pub fn set_quantity(
        &mut self,
        line_id: &str,
        quantity: i64,
        gst_applicable: bool,
    ) -> Option<CartLine> {
        if quantity <= 0 {
            self.remove_item(line_id);
            return None;
        }

        let line = self.lines.iter_mut().find(|l| l.id == line_id)?;
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        line.recompute(gst_applicable);
        Some(line.clone())
    }

    /// Remove a line unconditionally. Absent line ids are a no-op.
    pub fn remove_item(&mut self, line_id: &str) {
        self.lines.retain(|l| l.id != line_id);
    }

    /// Empty the cart and reset the customer fields in one step, so no
    /// observer ever sees a half-cleared sale.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer = CustomerDetails::default();
    }

    /// Aggregate subtotal, GST, and grand total, recomputed from the current
    /// line set on every call.
    pub fn totals(&self) -> CartTotals {
        let subtotal: f64 = self.lines.iter().map(|l| l.quantity as f64 * l.rate).sum();
        let total_gst: f64 = self.lines.iter().map(|l| l.gst).sum();
        CartTotals {
            subtotal,
            total_gst,
            grand_total: subtotal + total_gst,
        }
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart_id: self.id.clone(),
            customer: self.customer.clone(),
            lines: self.lines.clone(),
            totals: self.totals(),
        }
    }
}

/// Normalize free-form quantity input from the billing screen.
///
/// Anything that does not parse as an integer is coerced to 0, which the
/// cart then treats as a removal rather than letting a bad value reach the
/// arithmetic.
pub fn parse_quantity(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UnitOfMeasure;

    fn product(id: &str, rate: f64, gst_applicable: bool) -> Product {
        Product {
            id: id.into(),
            article_code: format!("ART-{}", id),
            fabric_description: "Lawn Swiss Voile Printed".into(),
            color: "Red".into(),
            unit_of_measure: UnitOfMeasure::Meter,
            sale_rate: rate,
            gst_applicable,
            current_stock: 1000,
            min_stock_level: 100,
            godown: "Godown B".into(),
        }
    }

    fn assert_line_invariant(line: &CartLine) {
        let expected = line.quantity as f64 * line.rate + line.gst;
        assert!(
            (line.line_total - expected).abs() < 1e-9,
            "line_total {} != quantity*rate + gst {}",
            line.line_total,
            expected
        );
    }

    #[test]
    fn single_taxable_line_computes_gst_and_total() {
        let mut cart = Cart::new("SALE-1");
        cart.add_item(&product("P001", 450.0, true));

        let line = &cart.lines()[0];
        assert_eq!(line.quantity, 1);
        assert_eq!(line.rate, 450.0);
        assert!((line.gst - 81.0).abs() < 1e-9);
        assert!((line.line_total - 531.0).abs() < 1e-9);
        assert_line_invariant(line);
    }

    #[test]
    fn adding_same_product_twice_coalesces_into_one_line() {
        let mut cart = Cart::new("SALE-1");
        let khaddar = product("P001", 450.0, true);

        let first = cart.add_item(&khaddar);
        let second = cart.add_item(&khaddar);

        assert_eq!(first, second);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_line_invariant(&cart.lines()[0]);
    }

    #[test]
    fn repeated_adds_accumulate_quantity() {
        let mut cart = Cart::new("SALE-1");
        let lawn = product("P002", 850.0, true);
        for _ in 0..5 {
            cart.add_item(&lawn);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn two_products_get_distinct_lines_and_aggregate_totals() {
        let mut cart = Cart::new("SALE-1");
        cart.add_item(&product("P001", 450.0, true));
        cart.add_item(&product("P002", 850.0, true));

        assert_eq!(cart.lines().len(), 2);

        let totals = cart.totals();
        assert!((totals.subtotal - 1300.0).abs() < 1e-9);
        assert!((totals.total_gst - 234.0).abs() < 1e-9);
        assert!((totals.grand_total - 1534.0).abs() < 1e-9);
    }

    #[test]
    fn exempt_product_carries_no_gst() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P003", 1000.0, false));
        cart.set_quantity(&line_id, 3, false);

        let line = &cart.lines()[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.gst, 0.0);
        assert!((line.line_total - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn set_quantity_recomputes_from_frozen_rate() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        let line = cart.set_quantity(&line_id, 4, true).unwrap();
        assert_eq!(line.quantity, 4);
        assert_eq!(line.rate, 450.0);
        assert!((line.gst - 324.0).abs() < 1e-9);
        assert!((line.line_total - 2124.0).abs() < 1e-9);
    }

    #[test]
    fn tax_applicability_is_reread_on_quantity_change() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        // Catalog flips the article to exempt after it entered the cart; the
        // next quantity change picks the new flag up, the rate stays frozen.
        let line = cart.set_quantity(&line_id, 2, false).unwrap();
        assert_eq!(line.rate, 450.0);
        assert_eq!(line.gst, 0.0);
        assert!((line.line_total - 900.0).abs() < 1e-9);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        assert_eq!(cart.set_quantity(&line_id, 0, true), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn negative_quantity_removes_the_line() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        assert_eq!(cart.set_quantity(&line_id, -5, true), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn unparseable_quantity_input_behaves_as_removal() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        let quantity = parse_quantity("abc");
        assert_eq!(quantity, 0);
        cart.set_quantity(&line_id, quantity, true);
        assert!(cart.is_empty());
    }

    #[test]
    fn quantity_input_parsing() {
        assert_eq!(parse_quantity("12"), 12);
        assert_eq!(parse_quantity(" 7 "), 7);
        assert_eq!(parse_quantity("-3"), -3);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("1.5"), 0);
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut cart = Cart::new("SALE-1");
        let line_id = cart.add_item(&product("P001", 450.0, true));

        cart.remove_item(&line_id);
        assert!(cart.is_empty());

        // Removing again, or removing something that never existed, is a
        // silent no-op.
        cart.remove_item(&line_id);
        cart.remove_item("CART-999");
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_unknown_line_is_a_no_op() {
        let mut cart = Cart::new("SALE-1");
        cart.add_item(&product("P001", 450.0, true));

        assert_eq!(cart.set_quantity("CART-999", 5, true), None);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn clear_resets_lines_and_customer_atomically() {
        let mut cart = Cart::new("SALE-1");
        cart.customer = CustomerDetails {
            name: "Ahmed Textiles (Pvt) Ltd".into(),
            phone: "0300-1234567".into(),
            address: "Plot 45, Industrial Area, Faisalabad".into(),
        };
        cart.add_item(&product("P001", 450.0, true));
        cart.add_item(&product("P002", 850.0, true));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.customer, CustomerDetails::default());
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn totals_identity_holds_after_every_mutation() {
        let mut cart = Cart::new("SALE-1");
        let a = cart.add_item(&product("P001", 450.0, true));
        cart.add_item(&product("P002", 850.0, true));
        let c = cart.add_item(&product("P003", 1000.0, false));

        cart.set_quantity(&a, 10, true);
        cart.set_quantity(&c, 3, false);
        cart.remove_item(&a);

        for line in cart.lines() {
            assert_line_invariant(line);
        }
        let totals = cart.totals();
        assert!((totals.grand_total - (totals.subtotal + totals.total_gst)).abs() < 1e-9);
    }

    #[test]
    fn line_ids_are_not_reused_after_removal() {
        let mut cart = Cart::new("SALE-1");
        let first = cart.add_item(&product("P001", 450.0, true));
        cart.remove_item(&first);
        let second = cart.add_item(&product("P001", 450.0, true));

        assert_ne!(first, second);
    }

    #[test]
    fn snapshot_reflects_lines_and_totals() {
        let mut cart = Cart::new("SALE-1");
        cart.customer.name = "Karachi Garments".into();
        cart.add_item(&product("P005", 2500.0, true));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.cart_id, "SALE-1");
        assert_eq!(snapshot.customer.name, "Karachi Garments");
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.totals, cart.totals());
    }
}
