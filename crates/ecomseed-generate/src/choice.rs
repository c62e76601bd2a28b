use rand::Rng;

use crate::errors::GenerationError;

/// Discrete distribution over a fixed set of options.
///
/// Uniform unless built with weights. Weighted sampling walks a cumulative
/// table, so an option with weight zero is never returned.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    options: Vec<T>,
    cumulative: Option<Vec<f64>>,
}

impl<T> Choice<T> {
    pub fn uniform(
        name: &'static str,
        options: impl IntoIterator<Item = T>,
    ) -> Result<Self, GenerationError> {
        let options: Vec<T> = options.into_iter().collect();
        if options.is_empty() {
            return Err(GenerationError::InvalidOptions(format!(
                "choice '{name}' has no options"
            )));
        }
        Ok(Self {
            options,
            cumulative: None,
        })
    }

    pub fn weighted(
        name: &'static str,
        options: impl IntoIterator<Item = (T, f64)>,
    ) -> Result<Self, GenerationError> {
        let mut values = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0_f64;

        for (value, weight) in options {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GenerationError::InvalidOptions(format!(
                    "choice '{name}' has invalid weight {weight}"
                )));
            }
            total += weight;
            values.push(value);
            cumulative.push(total);
        }

        if values.is_empty() {
            return Err(GenerationError::InvalidOptions(format!(
                "choice '{name}' has no options"
            )));
        }
        if total <= 0.0 {
            return Err(GenerationError::InvalidOptions(format!(
                "choice '{name}' total weight must be > 0"
            )));
        }

        Ok(Self {
            options: values,
            cumulative: Some(cumulative),
        })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let idx = match &self.cumulative {
            None => rng.random_range(0..self.options.len()),
            Some(cumulative) => {
                let total = cumulative.last().copied().unwrap_or_default();
                let roll = rng.random_range(0.0..total);
                cumulative
                    .partition_point(|bound| *bound <= roll)
                    .min(self.options.len() - 1)
            }
        };
        &self.options[idx]
    }
}

impl<T: Copy> Choice<T> {
    pub fn sample_copied<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        *self.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn rejects_empty_options() {
        let empty: Vec<u8> = Vec::new();
        assert!(Choice::uniform("empty", empty).is_err());
        assert!(Choice::<u8>::weighted("empty", Vec::new()).is_err());
    }

    #[test]
    fn rejects_invalid_weights() {
        assert!(Choice::weighted("neg", [("a", 1.0), ("b", -0.5)]).is_err());
        assert!(Choice::weighted("nan", [("a", f64::NAN)]).is_err());
        assert!(Choice::weighted("zero", [("a", 0.0), ("b", 0.0)]).is_err());
    }

    #[test]
    fn zero_weight_option_is_never_sampled() {
        let choice = Choice::weighted("skewed", [("a", 0.0), ("b", 1.0), ("c", 0.0)])
            .expect("valid weights");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            assert_eq!(*choice.sample(&mut rng), "b");
        }
    }

    #[test]
    fn uniform_choice_reaches_every_option() {
        let choice = Choice::uniform("digits", 0..5_u8).expect("options");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[choice.sample_copied(&mut rng) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn weighted_choice_follows_weights() {
        let choice = Choice::weighted("heavy", [("rare", 1.0), ("common", 9.0)]).expect("weights");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let common = (0..2000)
            .filter(|_| *choice.sample(&mut rng) == "common")
            .count();
        assert!(common > 1600 && common < 1950, "common picked {common} times");
    }
}
