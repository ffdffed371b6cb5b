use shanks::prelude::*;
use shanks::result::{self, ErrorKind};
use std::f64::consts::LN_2;

fn config(max_terms: usize) -> AccelerationConfig<f64> {
    AccelerationConfig::new(max_terms, 1E-12).unwrap()
}

/// Raw terms an accelerator needs before its estimate is within `tol` of
/// `target`
fn terms_to_reach(
    accel: &mut dyn SeriesAcceleration<f64>,
    target: f64,
    tol: f64,
) -> Option<usize> {
    loop {
        let est = accel.advance().unwrap();
        if (est.value - target).abs() < tol {
            return Some(est.terms);
        }
        if est.status.is_terminal() {
            return None;
        }
    }
}

#[test]
fn geometric_series_is_rationalized_by_epsilon() {
    let series = Inverse1mxSeries::new(0.5_f64);
    let mut eps = EpsilonAlgorithm::new(series, config(64));

    let fourth = (0..4).map(|_| eps.advance().unwrap()).last().unwrap();
    let raw = series.partial_sum(3).unwrap();
    assert!((fourth.value - 2.0).abs() < (raw - 2.0).abs());

    let est = eps.run().unwrap();
    assert_eq!(est.status, Status::Converged);
    assert_eq!(est.value, 2.0);
    assert!(est.terms <= 6);
}

#[test]
fn alternating_beats_shanks_beats_raw_summation() {
    let tol = 1E-6;
    let series = Ln2Series::new(1.0_f64);

    let mut alt = ShanksTransformAlternating::new(series, config(60));
    let mut shanks = ShanksTransform::new(series, config(60));
    let n_alt = terms_to_reach(&mut alt, LN_2, tol).unwrap();
    let n_shanks = terms_to_reach(&mut shanks, LN_2, tol).unwrap();
    let n_raw = series
        .partial_sums()
        .position(|sum| (sum - LN_2).abs() < tol)
        .map(|n| n + 1)
        .unwrap();

    assert!(n_alt < n_shanks);
    assert!(n_shanks < n_raw);
}

#[test]
fn constant_sequences_converge_for_every_accelerator() {
    for v in [0.625, -3.0, 0.0] {
        for kind in AcceleratorKind::ALL {
            let series = TermFn::new(move |n: usize| if n == 0 { v } else { 0.0 });
            let mut accel = accelerate(kind, series, config(64));
            let est = accel.run().unwrap();
            assert_eq!(est.status, Status::Converged, "{kind}, v = {v}");
            assert_eq!(est.value, v, "{kind}, v = {v}");
            assert!(est.terms <= 3, "{kind}, v = {v}");
        }
    }
}

#[test]
fn all_zero_series_converges_immediately() {
    for kind in AcceleratorKind::ALL {
        let mut accel = accelerate(kind, TermFn::new(|_| 0.0_f64), config(64));
        let est = accel.run().unwrap();
        assert_eq!(est.status, Status::Converged, "{kind}");
        assert_eq!((est.value, est.terms), (0.0, 2), "{kind}");
    }
}

#[test]
fn zero_term_in_the_middle_never_converges() {
    // partial sums 1, 1, 1.25, 1.375, ... repeat once and move on
    let terms = [1.0, 0.0, 0.25, 0.125, 0.0625];
    for kind in AcceleratorKind::ALL {
        let series = TermFn::new(move |n: usize| terms[n.min(4)]);
        let mut accel = accelerate(kind, series, config(64));
        let est = accel.run().unwrap();
        assert_eq!(est.status, Status::Degenerate, "{kind}");
        assert_eq!((est.value, est.terms), (1.25, 3), "{kind}");
    }
}

#[test]
fn stalled_partial_sum_keeps_the_extrapolation() {
    // S_3 - S_2 = 0 right after 1, 1.5, 1.75 extrapolated to 2
    let terms = [1.0, 0.5, 0.25, 0.0, 0.125];
    for kind in [AcceleratorKind::Epsilon, AcceleratorKind::Shanks] {
        let series = TermFn::new(move |n: usize| terms[n.min(4)]);
        let mut accel = accelerate(kind, series, config(64));
        let est = accel.run().unwrap();
        assert_eq!(est.status, Status::Degenerate, "{kind}");
        assert_eq!((est.value, est.order, est.terms), (2.0, 1, 4), "{kind}");
    }
}

#[test]
fn vanishing_fourier_terms_are_not_convergence() {
    // every other term of the cubic series is sin(kπ) ≈ 1E-17 at x = π/2
    let series = CubicFourierSeries::new(std::f64::consts::FRAC_PI_2);
    for kind in AcceleratorKind::ALL {
        let mut accel = accelerate(kind, series, config(64));
        let est = accel.run().unwrap();
        assert_ne!(est.status, Status::Converged, "{kind}");
        assert_eq!(est.status, Status::Degenerate, "{kind}");
    }
}

#[test]
fn vanishing_second_difference_freezes_shanks() {
    // partial sums 2, 3, 4 lie on a line
    let series = TermFn::new(|n: usize| if n == 0 { 2.0 } else { 1.0 });
    let mut shanks = ShanksTransform::new(series, config(64));
    shanks.advance().unwrap();
    shanks.advance().unwrap();

    let est = shanks.advance().unwrap();
    assert_eq!(est.status, Status::Degenerate);
    assert_eq!(est.value, 4.0);

    assert_eq!(shanks.advance().unwrap(), est);
    assert_eq!(shanks.terms_consumed(), 3);
    assert_eq!(shanks.current_state(), Status::Degenerate);
}

#[test]
fn term_budget_ends_in_no_convergence() {
    // -ln(1 - x) converges far too slowly near x = 1 for eight terms
    let series = Ln1mxSeries::new(0.999_f64);
    for kind in [
        AcceleratorKind::Epsilon,
        AcceleratorKind::Rho,
        AcceleratorKind::Shanks,
        AcceleratorKind::Theta,
        AcceleratorKind::ChangWynn,
    ] {
        let mut accel = accelerate(kind, series, config(8));
        let est = accel.run().unwrap();
        assert_eq!(est.status, Status::NoConvergence, "{kind}");
        assert_eq!(est.terms, 8, "{kind}");
        assert!(est.value.is_finite());
        assert_eq!(accel.best(), Some(est));
    }
}

#[test]
fn series_of_one_sign_is_degenerate_for_the_alternating_transform() {
    let series = Ln1mxSeries::new(0.999_f64);
    let mut alt = ShanksTransformAlternating::new(series, config(8));
    let est = alt.run().unwrap();
    assert_eq!(est.status, Status::Degenerate);
    assert_eq!(est.terms, 2);
    assert_eq!(est.value, series.partial_sum(1).unwrap());
}

#[test]
fn window_and_full_table_give_identical_estimates() {
    for kind in AcceleratorKind::ALL {
        let mut window = accelerate(kind, Ln2Series::new(1.0_f64), config(40));
        let mut full = accelerate(
            kind,
            Ln2Series::new(1.0_f64),
            config(40).with_full_table(true),
        );
        loop {
            let a = window.advance().unwrap();
            let b = full.advance().unwrap();
            assert_eq!(a, b, "{kind}");
            if a.status.is_terminal() {
                break;
            }
        }
        assert!(window.retained_cells() < full.retained_cells(), "{kind}");
    }
}

#[test]
fn estimates_by_order() {
    let mut eps = accelerate(
        AcceleratorKind::Epsilon,
        Pi4Series::new(4.0_f64),
        config(64),
    );
    assert_eq!(
        eps.estimate(0),
        Err(AccelerationError::OrderUnavailable {
            order: 0,
            highest: None
        })
    );

    for _ in 0..3 {
        eps.advance().unwrap();
    }
    assert_eq!(eps.order(), 1);
    assert_eq!(eps.estimate(0).unwrap(), 4.0 - 4.0 / 3.0 + 4.0 / 5.0);
    assert!(eps.estimate(1).is_ok());

    let err = eps.estimate(2).unwrap_err();
    assert_eq!(
        err,
        AccelerationError::OrderUnavailable {
            order: 2,
            highest: Some(1)
        }
    );
    assert!(err.to_string().contains("highest computed: 1"));

    // more terms make the order available
    eps.advance().unwrap();
    eps.advance().unwrap();
    assert!(eps.estimate(2).is_ok());
}

#[test]
fn best_is_none_before_the_first_advance() {
    let eps = EpsilonAlgorithm::new(Ln2Series::new(1.0_f64), config(64));
    assert_eq!(eps.best(), None);
    assert_eq!(eps.terms_consumed(), 0);
    assert_eq!(eps.order(), 0);
    assert_eq!(eps.current_state(), Status::Collecting);
    assert_eq!(eps.config().max_terms(), 64);
}

#[test]
fn one_series_feeds_several_accelerators() {
    let series = Pi4Series::new(4.0_f64);
    let mut eps = EpsilonAlgorithm::new(&series, config(64));
    let mut alt = ShanksTransformAlternating::new(&series, config(64));
    let a = eps.run().unwrap();
    let b = alt.run().unwrap();
    assert::close(a.value, b.value, 1E-11);
}

#[test]
fn single_precision() {
    let config = AccelerationConfig::new(32, 1E-6_f32).unwrap();
    let mut eps = EpsilonAlgorithm::new(Inverse1mxSeries::new(0.5_f32), config);
    let est = eps.run().unwrap();
    assert_eq!(est.status, Status::Converged);
    assert_eq!(est.value, 2.0_f32);
}

#[test]
fn errors_convert_into_the_crate_error() {
    fn sum(series: ExpSeries<f64>) -> result::Result<f64> {
        let mut eps = EpsilonAlgorithm::new(series, AccelerationConfig::new(64, 1E-12)?);
        Ok(eps.run()?.value)
    }

    assert::close(sum(ExpSeries::new(1.0)).unwrap(), 1.0_f64.exp(), 1E-12);
    let err = sum(ExpSeries::new(1E300)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFinite);
    assert_eq!(err.description(), "term 2 is not finite");
}

#[test]
fn invalid_index_from_any_series() {
    let expected = Err(SeriesError::InvalidIndex { index: -1 });
    assert_eq!(Ln2Series::new(1.0_f64).term(-1), expected);
    assert_eq!(ExpSeries::new(1.0_f64).partial_sum(-1), expected);
    assert_eq!(BinomialSeries::new(0.5_f64, 0.5).term(-1_i64), expected);
    assert_eq!(ErfSeries::new(0.5_f64).partial_sum(-1_i8), expected);
    assert_eq!(
        TermFn::new(|n: usize| n as f64).term(-1_i16),
        expected
    );
}
