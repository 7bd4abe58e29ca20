//! Derived totals: a pure fold over the line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::LineItem;
use crate::money::{parse_amount, round_half_up};

/// Totals derived from the document. Never stored; recomputed whenever
/// the items or the overall discount change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of the clamped per-row amounts.
    pub subtotal: Decimal,
    /// Subtotal minus the overall discount, clamped at zero.
    pub after_discount: Decimal,
    /// Signed fraction absorbed by rounding: `grand_total - after_discount`.
    pub round_off: Decimal,
    /// `after_discount` rounded half-up to a whole currency unit.
    pub grand_total: Decimal,
}

/// Compute the document totals. Pure: no side effects, no caching.
///
/// Each row amount is clamped at zero before aggregation, and the overall
/// discount (raw edit-boundary text) coerces to zero when invalid.
pub fn compute_totals(items: &[LineItem], overall_discount: &str) -> Totals {
    let subtotal: Decimal = items.iter().map(LineItem::amount).sum();
    let after_discount = (subtotal - parse_amount(overall_discount)).max(Decimal::ZERO);
    let grand_total = round_half_up(after_discount);
    let round_off = grand_total - after_discount;

    Totals {
        subtotal,
        after_discount,
        round_off,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(quantity: &str, rate: &str, discount: &str) -> LineItem {
        LineItem {
            quantity: quantity.to_string(),
            rate: rate.to_string(),
            discount: discount.to_string(),
            ..LineItem::default()
        }
    }

    #[test]
    fn whole_amounts_need_no_rounding() {
        let totals = compute_totals(&[item("2", "100", "0")], "0");
        assert_eq!(totals.subtotal, Decimal::from(200));
        assert_eq!(totals.after_discount, Decimal::from(200));
        assert_eq!(totals.grand_total, Decimal::from(200));
        assert_eq!(totals.round_off, Decimal::ZERO);
    }

    #[test]
    fn fractional_total_rounds_half_up() {
        let totals = compute_totals(&[item("3", "33.33", "0")], "0");
        assert_eq!(totals.subtotal, Decimal::new(9999, 2));
        assert_eq!(totals.after_discount, Decimal::new(9999, 2));
        assert_eq!(totals.grand_total, Decimal::from(100));
        assert_eq!(totals.round_off, Decimal::new(1, 2));
    }

    #[test]
    fn overall_discount_exceeding_subtotal_clamps_to_zero() {
        let totals = compute_totals(&[item("1", "50", "0")], "80");
        assert_eq!(totals.subtotal, Decimal::from(50));
        assert_eq!(totals.after_discount, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
        assert_eq!(totals.round_off, Decimal::ZERO);
    }

    #[test]
    fn invalid_overall_discount_counts_as_zero() {
        let totals = compute_totals(&[item("2", "10", "0")], "lots");
        assert_eq!(totals.grand_total, Decimal::from(20));
    }

    #[test]
    fn rounding_down_yields_negative_round_off() {
        let totals = compute_totals(&[item("1", "100.40", "0")], "0");
        assert_eq!(totals.grand_total, Decimal::from(100));
        assert_eq!(totals.round_off, Decimal::new(-40, 2));
    }

    #[test]
    fn empty_table_totals_to_zero() {
        let totals = compute_totals(&[], "");
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    /// Rows as (quantity, rate in paise, discount in paise).
    fn rows_strategy() -> impl Strategy<Value = Vec<(u32, u64, u64)>> {
        prop::collection::vec((0u32..1_000, 0u64..1_000_000, 0u64..50_000), 1..12)
    }

    fn build_items(rows: &[(u32, u64, u64)]) -> Vec<LineItem> {
        rows.iter()
            .map(|(quantity, rate, discount)| {
                item(
                    &quantity.to_string(),
                    &format!("{}.{:02}", rate / 100, rate % 100),
                    &format!("{}.{:02}", discount / 100, discount % 100),
                )
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: per-row amounts are clamped, so the subtotal can
        /// never go negative.
        #[test]
        fn subtotal_is_never_negative(rows in rows_strategy()) {
            let totals = compute_totals(&build_items(&rows), "0");
            prop_assert!(totals.subtotal >= Decimal::ZERO);
        }

        /// Property: reordering the rows does not change the subtotal.
        #[test]
        fn subtotal_is_order_independent(rows in rows_strategy()) {
            let items = build_items(&rows);
            let mut reversed = items.clone();
            reversed.reverse();
            prop_assert_eq!(
                compute_totals(&items, "0").subtotal,
                compute_totals(&reversed, "0").subtotal
            );
        }

        /// Property: the grand total is a whole currency amount and the
        /// round-off identity holds exactly.
        #[test]
        fn grand_total_is_whole_and_round_off_exact(
            rows in rows_strategy(),
            overall in 0u64..100_000,
        ) {
            let overall_text = format!("{}.{:02}", overall / 100, overall % 100);
            let totals = compute_totals(&build_items(&rows), &overall_text);
            prop_assert!(totals.grand_total.fract().is_zero());
            prop_assert_eq!(totals.round_off, totals.grand_total - totals.after_discount);
            prop_assert!(totals.round_off.abs() <= Decimal::new(5, 1));
        }
    }
}
