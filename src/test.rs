// tests that Clone, Debug, and PartialEq are implemented for a series
#[macro_export]
macro_rules! test_basic_impls {
    ($fx: expr) => {
        #[test]
        fn should_impl_debug_clone_and_partialeq() {
            assert_eq!($fx, $fx.clone());
            let _s1 = format!("{:?}", $fx);
        }
    };
}

// tests that the term and partial-sum accessors of an f64 series agree and
// that negative indices are rejected
#[macro_export]
macro_rules! test_series_consistency {
    ($series: expr) => {
        $crate::test_series_consistency!($series, 30);
    };
    ($series: expr, $n_terms: expr) => {
        #[test]
        fn partial_sums_match_summed_terms() {
            use $crate::traits::Series as _;
            let series = $series;
            let mut sum = 0.0_f64;
            for n in 0..$n_terms {
                sum += series.term(n).unwrap();
                let partial = series.partial_sum(n).unwrap();
                assert::close(partial, sum, 1E-12 * (1.0 + sum.abs()));
            }
        }

        #[test]
        fn iterators_match_accessors() {
            use $crate::traits::Series as _;
            let series = $series;
            let terms: Vec<f64> = series.terms().take(5).collect();
            let sums: Vec<f64> = series.partial_sums().take(5).collect();
            assert_eq!(terms.len(), 5);
            for (n, (term, sum)) in terms.iter().zip(sums.iter()).enumerate() {
                assert_eq!(*term, series.term(n).unwrap());
                assert::close(
                    *sum,
                    series.partial_sum(n).unwrap(),
                    1E-12 * (1.0 + sum.abs()),
                );
            }
        }

        #[test]
        fn negative_index_is_invalid() {
            use $crate::series::SeriesError;
            use $crate::traits::Series as _;
            let series = $series;
            assert_eq!(
                series.term(-1_i32),
                Err(SeriesError::InvalidIndex { index: -1 })
            );
            assert_eq!(
                series.partial_sum(-1_i64),
                Err(SeriesError::InvalidIndex { index: -1 })
            );
        }

        $crate::test_basic_impls!($series);
    };
}
