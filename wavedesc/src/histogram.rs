/// Equal width histogram of a set of values, used for pulse height spectra
/// (the minimum voltage of each trace).
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<usize>,
}

pub const DEFAULT_BINS: usize = 20;

impl Histogram {
    /// Bin `values` into `bins` equal bins spanning their range. The last bin
    /// includes the maximum. If all the values are equal the range is widened
    /// by half a unit each side. NaNs are skipped.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite = values.iter().copied().filter(|v| !v.is_nan());

        let (mut lower, mut upper) = finite
            .clone()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if lower > upper {
            // No values at all.
            lower = 0.0;
            upper = 1.0;
        } else if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }

        let width = (upper - lower) / bins as f64;
        let mut counts = vec![0; bins];
        for v in finite {
            let bin = (((v - lower) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Self {
            lower,
            upper,
            counts,
        }
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lower edge, upper edge, count)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        let width = self.bin_width();
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let lo = self.lower + i as f64 * width;
            (lo, lo + width, count)
        })
    }
}
