use approx::assert_relative_eq;
use chart_overlay::core::{
    Category, DetailMap, DetailRecord, NOT_AVAILABLE, Series, TooltipDetail, TooltipValue,
    aggregate, aggregate_reconciled, chronological, rebind_all, reconcile,
};

fn month(m: u32) -> Category {
    Category::month_end(2025, m).expect("valid month")
}

#[test]
fn readings_follow_series_order_and_mark_missing_as_na() {
    let revenue = Series::from_pairs("revenue", [(month(1), Some(100.0)), (month(2), Some(0.0))]);
    let forecast = Series::from_pairs("forecast", [(month(2), Some(120.0))]);

    let payload = aggregate(&month(1), [&revenue, &forecast], None);
    assert_eq!(payload.primary_label, "2025-01-31");
    assert_eq!(payload.primary_value, TooltipValue::Value(100.0));
    assert_eq!(payload.series_values[0].series_id, "revenue");
    assert_eq!(payload.series_values[1].series_id, "forecast");
    assert_eq!(payload.series_values[1].value, TooltipValue::NotAvailable);
    assert_eq!(payload.series_values[1].value.to_string(), NOT_AVAILABLE);
    assert!(payload.breakdown.is_empty());

    let feb = aggregate(&month(2), [&revenue, &forecast], None);
    assert_eq!(feb.primary_value, TooltipValue::Value(0.0));
    assert_eq!(feb.primary_value.to_string(), "0");
}

#[test]
fn other_bucket_percentages_use_detail_total() {
    let other = Category::label("Other");
    let slice = Series::from_pairs("sales", [(other.clone(), Some(250.0))]);
    let mut detail: DetailMap = DetailMap::new();
    detail.insert(
        other.clone(),
        TooltipDetail::from_values([("skuA", 30.0), ("skuB", 70.0)]),
    );

    let payload = aggregate(&other, [&slice], Some(&detail));
    assert_eq!(payload.primary_value, TooltipValue::Value(250.0));
    assert_eq!(payload.breakdown.len(), 2);
    assert_eq!(payload.breakdown[0].label, "skuA");
    assert_relative_eq!(
        payload.breakdown[0].percent_of_total.expect("pct"),
        30.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        payload.breakdown[1].percent_of_total.expect("pct"),
        70.0,
        epsilon = 1e-9
    );
}

#[test]
fn constituents_without_value_are_na_and_excluded_from_total() {
    let other = Category::label("Other");
    let detail_entry = TooltipDetail::new()
        .with_constituent("skuA", DetailRecord::new(Some(25.0)).with_field("units", 5.0))
        .with_constituent("skuB", DetailRecord::new(None))
        .with_constituent("skuC", DetailRecord::new(Some(75.0)));
    let mut detail: DetailMap = DetailMap::new();
    detail.insert(other.clone(), detail_entry);

    let payload = aggregate(&other, std::iter::empty::<&Series>(), Some(&detail));
    assert_eq!(payload.primary_value, TooltipValue::NotAvailable);
    assert_eq!(payload.breakdown[1].value, TooltipValue::NotAvailable);
    assert_eq!(payload.breakdown[1].percent_of_total, None);
    assert_relative_eq!(
        payload.breakdown[0].percent_of_total.expect("pct"),
        25.0,
        epsilon = 1e-9
    );
    assert_eq!(payload.breakdown[0].fields.get("units"), Some(&5.0));
}

#[test]
fn zero_total_detail_has_no_percentages() {
    let key = Category::label("Returns");
    let mut detail: DetailMap = DetailMap::new();
    detail.insert(key.clone(), TooltipDetail::from_values([("a", 0.0), ("b", 0.0)]));

    let payload = aggregate(&key, std::iter::empty::<&Series>(), Some(&detail));
    assert!(payload.breakdown.iter().all(|entry| entry.percent_of_total.is_none()));
    assert!(payload.breakdown.iter().all(|entry| entry.value.is_available()));
}

#[test]
fn unknown_category_yields_empty_breakdown() {
    let revenue = Series::from_pairs("revenue", [(month(1), Some(1.0))]);
    let mut detail: DetailMap = DetailMap::new();
    detail.insert(month(1), TooltipDetail::from_values([("x", 1.0)]));

    let payload = aggregate(&month(6), [&revenue], Some(&detail));
    assert!(payload.breakdown.is_empty());
    assert_eq!(payload.primary_value, TooltipValue::NotAvailable);
}

#[test]
fn reconciled_lookup_matches_linear_lookup() {
    let a = Series::from_pairs("a", [(month(1), Some(1.0)), (month(3), Some(3.0))]);
    let b = Series::from_pairs("b", [(month(2), Some(2.0))]);
    let inputs = vec![a, b];
    let axis = reconcile(&inputs, chronological);
    let bound = rebind_all(&inputs, &axis);

    for category in axis.iter() {
        let indexed = aggregate_reconciled(category, &axis, &bound, None);
        let scanned = aggregate(category, &inputs, None);
        assert_eq!(indexed, scanned);
    }

    let missing = aggregate_reconciled(&month(9), &axis, &bound, None);
    assert!(missing
        .series_values
        .iter()
        .all(|reading| reading.value == TooltipValue::NotAvailable));
}
