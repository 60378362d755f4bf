use crate::carrier::Carrier;
use crate::phase::Dibit;

/// Majority-vote phase decision over one symbol period
pub struct SymbolClassifier {
    carrier: Carrier,
    threshold: f64,
}

impl SymbolClassifier {
    pub fn new(carrier: Carrier, threshold: f64) -> Self {
        Self { carrier, threshold }
    }

    /// Per-candidate count of samples lying within tolerance of that candidate's
    /// reference; `samples[i]` belongs to time `start_time + i`
    pub fn histogram(&self, samples: &[i32], start_time: usize) -> [usize; 4] {
        let mut histogram = [0usize; 4];
        for (i, &sample) in samples.iter().enumerate() {
            let time = start_time + i;
            for dibit in Dibit::ALL {
                if self.carrier.matches(time, dibit, sample, self.threshold) {
                    histogram[dibit.index()] += 1;
                }
            }
        }
        histogram
    }

    /// Most popular candidate, the lowest index wins ties
    pub fn classify(&self, samples: &[i32], start_time: usize) -> Dibit {
        let histogram = self.histogram(samples, start_time);

        let mut best = 0;
        for i in 1..histogram.len() {
            if histogram[i] > histogram[best] {
                best = i;
            }
        }

        // best < 4 by construction
        Dibit::ALL[best]
    }
}
