mod common;
use common::{attenuation_db, max_abs_diff, mix, sine};
use eeg_bandpass::spectrum::{amplitude_spectrum, nearest_bin};
use eeg_bandpass::{
    apply_zero_phase, apply_zero_phase_channels, bandpass, design, dominant_frequency,
    Coefficients, FilterSpec,
};
use ndarray::Array2;

const FS: f64 = 100.0;
const N: usize = 1000;

/// 5 Hz signal + 0.1 Hz baseline drift + 45 Hz interference.
fn contaminated() -> (Vec<f64>, Vec<f64>) {
    let signal = sine(N, 5.0, 1.0, FS);
    let x = mix(&[signal.clone(), sine(N, 0.1, 2.0, FS), sine(N, 45.0, 0.5, FS)]);
    (signal, x)
}

#[test]
fn default_filter_recovers_5hz() {
    let (signal, x) = contaminated();
    let y = apply_zero_phase(&design(&FilterSpec::default()).unwrap(), &x).unwrap();

    // Before filtering the drift dominates; after, the 5 Hz tone does.
    approx::assert_abs_diff_eq!(dominant_frequency(&x, FS).unwrap(), 0.1, epsilon = 1e-9);
    approx::assert_abs_diff_eq!(dominant_frequency(&y, FS).unwrap(), 5.0, epsilon = 1e-9);

    let before = amplitude_spectrum(&x);
    let after = amplitude_spectrum(&y);

    let noise = nearest_bin(45.0, N, FS);
    let drift = nearest_bin(0.1, N, FS);
    let tone = nearest_bin(5.0, N, FS);

    let noise_db = attenuation_db(before[noise], after[noise]);
    let drift_db = attenuation_db(before[drift], after[drift]);
    assert!(noise_db >= 40.0, "45 Hz attenuated only {noise_db:.1} dB");
    assert!(drift_db >= 20.0, "0.1 Hz drift attenuated only {drift_db:.1} dB");

    // Pass band essentially untouched.
    let tone_db = attenuation_db(before[tone], after[tone]);
    assert!(tone_db.abs() < 1.0, "5 Hz changed by {tone_db:.2} dB");

    // Away from the edges the output is the clean tone.
    let err = max_abs_diff(&y[300..N - 300], &signal[300..N - 300]);
    assert!(err < 0.05, "interior error {err:.3}");
}

#[test]
fn two_channels_share_one_design() {
    let (_, a3) = contaminated();
    let a4: Vec<f64> = a3.iter().map(|v| -0.5 * v + 3.0).collect();

    let spec = FilterSpec::default();
    let out = bandpass(&spec, &[a3.clone(), a4.clone()]).unwrap();
    let c = design(&spec).unwrap();
    assert_eq!(out[0], apply_zero_phase(&c, &a3).unwrap());
    assert_eq!(out[1], apply_zero_phase(&c, &a4).unwrap());
}

#[test]
fn channel_matrix_filtered_row_by_row() {
    let (_, x) = contaminated();
    let data = Array2::from_shape_fn((4, N), |(ch, t)| x[t] * (ch as f64 + 1.0));
    let c = design(&FilterSpec::default()).unwrap();
    let out = apply_zero_phase_channels(&data, &c).unwrap();
    let single = apply_zero_phase(&c, &x).unwrap();
    for ch in 0..4 {
        let scaled: Vec<f64> = single.iter().map(|v| v * (ch as f64 + 1.0)).collect();
        let row = out.row(ch).to_vec();
        assert!(max_abs_diff(&row, &scaled) < 1e-9);
    }
}

#[test]
fn coefficients_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Coefficients>();

    let c = std::sync::Arc::new(design(&FilterSpec::default()).unwrap());
    let handles: Vec<_> = (0..2)
        .map(|k| {
            let c = std::sync::Arc::clone(&c);
            std::thread::spawn(move || {
                let x = sine(N, 5.0 + k as f64, 1.0, FS);
                apply_zero_phase(&c, &x).map(|y| y.len())
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().unwrap(), N);
    }
}

#[test]
fn one_bad_channel_fails_the_batch() {
    let (_, x) = contaminated();
    let mut bad = x.clone();
    bad[500] = f64::NAN;
    assert!(bandpass(&FilterSpec::default(), &[x, bad]).is_err());
}
