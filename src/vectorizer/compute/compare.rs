pub trait Compare {
    /// dot積
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[f64], other: &[f64]) -> f64;

    /// ユークリッドノルム
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &[f64]) -> f64;

    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// A zero norm on either side gives 0.0
    fn cosine_similarity(vec: &[f64], other: &[f64]) -> f64 {
        let norm_a = Self::norm(vec);
        let norm_b = Self::norm(other);
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        Self::dot(vec, other) / (norm_a * norm_b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl Compare for DefaultCompare {
    #[inline]
    fn dot(vec: &[f64], other: &[f64]) -> f64 {
        debug_assert_eq!(
            vec.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        vec.iter().zip(other).map(|(a, b)| a * b).sum()
    }

    #[inline]
    fn norm(vec: &[f64]) -> f64 {
        vec.iter().map(|a| a * a).sum::<f64>().sqrt()
    }
}
