use proptest::prelude::*;

use typed_frame::execution::{ExecutionEngine, ExecutionOptions};
use typed_frame::frame::{DataFrame, JoinKind};
use typed_frame::series::Series;
use typed_frame::types::{DataType, Value};

fn column(values: &[Option<i64>], name: &str) -> Series {
    Series::new(
        values.iter().map(|v| v.map_or(Value::Null, Value::Int64)),
        DataType::Int64,
        name,
    )
}

fn keyed(keys: &[i64], key: &str, payload: &str) -> DataFrame {
    DataFrame::new(vec![
        Series::new(keys.iter().copied(), DataType::Int64, key),
        Series::new((0..keys.len()).map(|i| i as i64 * 10), DataType::Int64, payload),
    ])
    .unwrap()
}

fn present_values(s: &Series) -> Vec<i64> {
    s.iter().filter_map(|e| e.to_i64().ok()).collect()
}

proptest! {
    #[test]
    fn order_sorts_with_missing_last(
        values in prop::collection::vec(prop::option::of(-50i64..50), 0..40),
    ) {
        let s = column(&values, "x");
        let asc = s.subset(s.order(false)).unwrap();
        let desc = s.subset(s.order(true)).unwrap();

        let present = values.iter().filter(|v| v.is_some()).count();
        prop_assert!(asc.iter().skip(present).all(|e| e.is_missing()));
        prop_assert!(desc.iter().skip(present).all(|e| e.is_missing()));

        let up = present_values(&asc);
        prop_assert!(up.windows(2).all(|w| w[0] <= w[1]));
        let mut down = present_values(&desc);
        down.reverse();
        prop_assert_eq!(up, down);
    }

    #[test]
    fn left_join_contains_the_inner_join(
        lk in prop::collection::vec(0i64..5, 0..12),
        rk in prop::collection::vec(0i64..5, 0..12),
    ) {
        let (l, r) = (keyed(&lk, "id", "a"), keyed(&rk, "id", "b"));
        let inner = l.inner_join(&r, &["id"]).unwrap();
        let left = l.left_join(&r, &["id"]).unwrap();

        prop_assert!(left.nrow() >= inner.nrow());
        let matched = left.col("b").unwrap().iter().filter(|e| !e.is_missing()).count();
        prop_assert_eq!(matched, inner.nrow());
    }

    #[test]
    fn cross_join_multiplies_rows_and_adds_columns(
        lk in prop::collection::vec(0i64..100, 0..10),
        rk in prop::collection::vec(0i64..100, 0..10),
    ) {
        let (l, r) = (keyed(&lk, "id", "a"), keyed(&rk, "id", "b"));
        let out = l.cross_join(&r).unwrap();
        prop_assert_eq!(out.nrow(), l.nrow() * r.nrow());
        prop_assert_eq!(out.ncol(), l.ncol() + r.ncol());
    }

    #[test]
    fn select_of_all_names_is_identity(
        cols in prop::collection::vec(
            prop::collection::vec(prop::option::of(any::<i64>()), 6),
            1..5,
        ),
    ) {
        let df = DataFrame::new(
            cols.iter()
                .enumerate()
                .map(|(i, v)| column(v, &format!("c{i}")))
                .collect(),
        )
        .unwrap();
        prop_assert_eq!(df.select(df.names()).unwrap(), df);
    }

    #[test]
    fn engine_joins_preserve_row_order(
        lk in prop::collection::vec(0i64..4, 0..16),
        rk in prop::collection::vec(0i64..4, 0..16),
        chunk_size in 1usize..5,
    ) {
        let (l, r) = (keyed(&lk, "id", "a"), keyed(&rk, "id", "b"));
        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(2),
            chunk_size,
            max_in_flight_chunks: 2,
        })
        .unwrap();
        for kind in [JoinKind::Inner, JoinKind::Left, JoinKind::Right, JoinKind::Outer] {
            prop_assert_eq!(
                engine.join(kind, &l, &r, &["id"]).unwrap(),
                l.join(kind, &r, &["id"]).unwrap()
            );
        }
    }
}
