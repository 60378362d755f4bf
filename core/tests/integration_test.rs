use qpskmodem_core::{
    Carrier, Demodulator, Dibit, ModemConfig, ModemError, Modulator, SyncState, AMPLITUDE,
    CARRIER_FREQUENCY, PREAMBLE, SAMPLE_RATE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_bits(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| if rng.gen::<bool>() { '1' } else { '0' }).collect()
}

fn round_trip(bits: &str, symbol_len: usize) -> String {
    let config = ModemConfig::default().with_symbol_len(symbol_len);
    let samples = Modulator::new(&config)
        .expect("Failed to create modulator")
        .modulate(bits.as_bytes())
        .expect("Failed to modulate");

    let result = Demodulator::default()
        .demodulate_samples(&samples)
        .expect("Failed to demodulate");
    assert_eq!(result.symbol_len, Some(symbol_len), "Discovered wrong symbol length");
    result.render()
}

#[test]
fn test_concrete_preamble_scenario() {
    init_logger();
    assert_eq!(SAMPLE_RATE, 18000);
    assert_eq!(CARRIER_FREQUENCY, 1000);
    assert_eq!(AMPLITUDE, 0x7F000000);

    let mut modulator = Modulator::new(&ModemConfig::default()).unwrap();
    let samples = modulator.modulate(b"").unwrap();
    assert_eq!(samples.len(), 120, "Preamble alone must be 4 x 30 samples");

    let result = Demodulator::default().demodulate_samples(&samples).unwrap();
    assert_eq!(result.symbol_len, Some(30));
    assert!(result.symbols.is_empty());
    assert_eq!(result.render(), "\n");
}

#[test]
fn test_round_trip_default_rate() {
    init_logger();
    let bits = "0100100001101001";
    assert_eq!(round_trip(bits, 30), format!("{}\n", bits));
}

#[test]
fn test_round_trip_random_payloads() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let max = ModemConfig::default().max_symbol_len();

    // a single-sample symbol cannot break ties at t = 0 mod 9, start at two
    for symbol_len in 2..=max {
        let len = 2 * rng.gen_range(0..64);
        let bits = random_bits(&mut rng, len);
        assert_eq!(
            round_trip(&bits, symbol_len),
            format!("{}\n", bits),
            "Round trip failed at symbol_len={}",
            symbol_len
        );
    }
}

#[test]
fn test_round_trip_preamble_as_payload() {
    init_logger();
    assert_eq!(round_trip(PREAMBLE, 9), format!("{}\n", PREAMBLE));
}

#[test]
fn test_trailing_garbage_ignored() {
    init_logger();
    assert_eq!(round_trip("1100101\n", 30), "110010\n");
    assert_eq!(round_trip("01x0", 30), "01\n");
}

#[test]
fn test_phase_fidelity() {
    let config = ModemConfig::default();
    let samples = Modulator::new(&config).unwrap().modulate(b"00011011").unwrap();
    let norm_freq = CARRIER_FREQUENCY as f64 / SAMPLE_RATE as f64;

    for (k, dibit) in Dibit::ALL.iter().enumerate() {
        for i in 0..30 {
            let t = 120 + k * 30 + i;
            let expected = (AMPLITUDE as f64
                * (2.0 * std::f64::consts::PI * norm_freq * t as f64 + dibit.phase()).cos())
            .round() as i32;
            assert_eq!(samples[t], expected, "Sample {} of symbol {}", t, dibit);
        }
    }
}

#[test]
fn test_truncated_payload() {
    init_logger();
    let config = ModemConfig::default();
    let mut samples = Modulator::new(&config).unwrap().modulate(b"0110").unwrap();
    // keep one full payload symbol and 29 samples of the second
    samples.truncate(120 + 30 + 29);

    let result = Demodulator::default().demodulate_samples(&samples).unwrap();
    assert_eq!(result.render(), "01\n");
}

#[test]
fn test_stream_ending_inside_preamble() {
    init_logger();
    let samples = Modulator::new(&ModemConfig::default()).unwrap().modulate(b"").unwrap();

    let result = Demodulator::default().demodulate_samples(&samples[..100]).unwrap();
    assert_eq!(result.symbol_len, None);
    assert_eq!(result.render(), "\n");
}

#[test]
fn test_leading_silence_rejected() {
    init_logger();
    let mut samples = vec![0i32; 10];
    samples.extend(Modulator::new(&ModemConfig::default()).unwrap().modulate(b"11").unwrap());

    let err = Demodulator::default().demodulate_samples(&samples).unwrap_err();
    assert!(
        matches!(err, ModemError::PreambleMismatch { state: SyncState::Init, time: 0 }),
        "Unexpected error: {}",
        err
    );
}

#[test]
fn test_inverted_preamble_rejected() {
    // a stream starting with 11 must fail on its very first sample
    let carrier = Carrier::from_config(&ModemConfig::default());
    let samples: Vec<i32> = (0..40).map(|t| carrier.sample(t, Dibit::D11)).collect();

    let err = Demodulator::default().demodulate_samples(&samples).unwrap_err();
    assert!(matches!(err, ModemError::PreambleMismatch { state: SyncState::Init, .. }));
}

#[test]
fn test_round_trip_with_mild_noise() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);
    let bits = random_bits(&mut rng, 200);

    let samples = Modulator::new(&ModemConfig::default())
        .unwrap()
        .modulate(bits.as_bytes())
        .unwrap();

    // noise well inside the correlation tolerance
    let noise = Normal::new(0.0, 0.005 * AMPLITUDE as f64).unwrap();
    let noisy: Vec<i32> = samples
        .iter()
        .map(|&s| {
            let noisy = s as f64 + noise.sample(&mut rng);
            noisy.clamp(i32::MIN as f64, i32::MAX as f64) as i32
        })
        .collect();

    let result = Demodulator::default().demodulate_samples(&noisy).unwrap();
    assert_eq!(result.symbol_len, Some(30));
    assert_eq!(result.render(), format!("{}\n", bits));
}

#[test]
fn test_other_sample_rate() {
    // receiver follows the sample rate of the recording
    let config = ModemConfig::default().with_sample_rate(44100).with_symbol_len(40);
    let samples = Modulator::new(&config).unwrap().modulate(b"10011100").unwrap();

    let demodulator = Demodulator::new(&ModemConfig::default().with_sample_rate(44100)).unwrap();
    let result = demodulator.demodulate_samples(&samples).unwrap();
    assert_eq!(result.symbol_len, Some(40));
    assert_eq!(result.render(), "10011100\n");
}
