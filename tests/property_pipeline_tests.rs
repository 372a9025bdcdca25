use std::collections::HashSet;

use chart_overlay::core::{
    BoundaryMatch, Category, CategoryDistance, DetailMap, DomainOptions, ReconciledAxis,
    RenderPosition, Series, TooltipDetail, TooltipValue, aggregate, chronological, locate, rebind,
    reconcile, reproject, resolve_domain,
};
use proptest::prelude::*;

fn label_series(id: &str, entries: &[(u8, Option<i16>)]) -> Series {
    Series::from_pairs(
        id,
        entries.iter().map(|(key, value)| {
            (
                Category::label(format!("k{key:03}")),
                value.map(f64::from),
            )
        }),
    )
}

fn entries() -> impl Strategy<Value = Vec<(u8, Option<i16>)>> {
    proptest::collection::vec((0u8..40, proptest::option::of(-1_000i16..1_000)), 0..24)
}

proptest! {
    #[test]
    fn axis_contains_every_category_exactly_once(
        a in entries(),
        b in entries(),
        c in entries()
    ) {
        let inputs = vec![label_series("a", &a), label_series("b", &b), label_series("c", &c)];
        let axis = reconcile(&inputs, chronological);

        let expected: HashSet<Category> = inputs
            .iter()
            .flat_map(|series| series.categories().cloned())
            .collect();
        prop_assert_eq!(axis.len(), expected.len());
        for category in &expected {
            prop_assert!(axis.contains(category));
        }

        let ordered = axis.to_vec();
        prop_assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));

        for series in &inputs {
            let bound = rebind(series, &axis);
            prop_assert_eq!(bound.len(), axis.len());
            for (index, category) in axis.iter().enumerate() {
                prop_assert_eq!(bound.value_at_index(index), series.value_at(category));
            }
        }
    }

    #[test]
    fn absent_categories_stay_absent_through_tooltips(
        a in entries(),
        b in entries()
    ) {
        let inputs = vec![label_series("a", &a), label_series("b", &b)];
        let axis = reconcile(&inputs, chronological);
        let bound: Vec<Series> = inputs.iter().map(|series| rebind(series, &axis)).collect();

        for category in axis.iter() {
            let payload = aggregate(category, &bound, None);
            for (reading, source) in payload.series_values.iter().zip(&inputs) {
                let present = source.categories().any(|c| c == category);
                if !present {
                    prop_assert_eq!(reading.value, TooltipValue::NotAvailable);
                }
            }
        }
    }

    #[test]
    fn domain_covers_observations_and_zero(
        bars in proptest::collection::vec(proptest::option::of(-1_000.0f64..1_000.0), 1..32),
        line in proptest::collection::vec(proptest::option::of(-1_000.0f64..1_000.0), 1..32),
        padding_below in 1.0f64..2.5,
        padding_above in 1.0f64..2.5
    ) {
        let len = bars.len().min(line.len());
        let to_series = |id: &str, values: &[Option<f64>]| {
            Series::from_pairs(
                id,
                values[..len]
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Category::label(format!("p{i:02}")), *v)),
            )
        };
        let bar_group = vec![to_series("bars", bars.as_slice())];
        let line_group = vec![to_series("line", line.as_slice())];
        let options = DomainOptions::overlay().with_padding(padding_below, padding_above);

        let domain = resolve_domain(&[bar_group.as_slice(), line_group.as_slice()], options)
            .expect("domain");

        let observed: Vec<f64> = bars[..len]
            .iter()
            .chain(&line[..len])
            .flatten()
            .copied()
            .collect();
        if observed.is_empty() {
            prop_assert!(domain.is_empty());
        } else {
            prop_assert!(domain.min <= 0.0 && domain.max >= 0.0);
            for value in observed {
                prop_assert!(domain.contains(value));
            }
            prop_assert!(domain.span() >= options.min_span - 1e-9);
        }
    }

    #[test]
    fn reprojection_shifts_by_half_bandwidth(
        xs in proptest::collection::vec((-5_000.0f64..5_000.0, proptest::option::of(0.0f64..800.0)), 0..48),
        bandwidth in 0.0f64..200.0
    ) {
        let positions: Vec<RenderPosition> = xs
            .iter()
            .enumerate()
            .map(|(i, (x, y))| RenderPosition {
                category: Category::label(format!("c{i}")),
                x: *x,
                y: *y,
            })
            .collect();

        let identity = reproject(&positions, 0.0);
        prop_assert_eq!(&identity, &positions);

        let shifted = reproject(&positions, bandwidth);
        prop_assert_eq!(shifted.len(), positions.len());
        for (after, before) in shifted.iter().zip(&positions) {
            prop_assert_eq!(&after.category, &before.category);
            prop_assert_eq!(after.y, before.y);
            prop_assert!((after.x - (before.x + bandwidth / 2.0)).abs() <= 1e-9);
        }
    }

    #[test]
    fn exact_boundary_match_takes_precedence(
        days in proptest::collection::btree_set(0i64..3_000, 1..32),
        pick in any::<proptest::sample::Index>()
    ) {
        let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).expect("base date");
        let axis = ReconciledAxis::from_ordered(
            days.iter().map(|d| Category::Date(base + chrono::Duration::days(*d))),
        );
        let index = pick.index(axis.len());
        let key = axis.get(index).expect("picked").clone();

        let degenerate = |_: &Category, _: &Category| 0.0;
        let distance: CategoryDistance<'_, Category> = &degenerate;
        let found = locate(&key, &axis, Some(distance));
        prop_assert_eq!(found, BoundaryMatch::Found { category: key, index, exact: true });
    }

    #[test]
    fn breakdown_percentages_close_to_one_hundred(
        values in proptest::collection::vec(0.01f64..10_000.0, 1..16),
        displayed_total in 0.0f64..1_000_000.0
    ) {
        let bucket = Category::label("Other");
        let slice = Series::from_pairs("slice", [(bucket.clone(), Some(displayed_total))]);
        let mut detail: DetailMap = DetailMap::new();
        detail.insert(
            bucket.clone(),
            TooltipDetail::from_values(values.iter().enumerate().map(|(i, v)| (format!("sku{i}"), *v))),
        );

        let payload = aggregate(&bucket, [&slice], Some(&detail));
        let total: f64 = payload
            .breakdown
            .iter()
            .map(|entry| entry.percent_of_total.expect("percentage"))
            .sum();
        prop_assert!((total - 100.0).abs() <= 1e-6);
    }
}
