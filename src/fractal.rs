/// Fractal dimension as `ln(N) / ln(r)`, with `r` the distance of the
/// farthest member beyond the attractor surface. `0.0` when empty; a
/// bounding radius near 1 returns the literal degenerate result.
pub fn estimate(size: usize, farthest_distance_sq: Option<f64>) -> f64 {
    let Some(distance_sq) = farthest_distance_sq else {
        return 0.0;
    };
    if size == 0 {
        return 0.0;
    }
    let bounding_radius = distance_sq.sqrt();
    (size as f64).ln() / bounding_radius.ln()
}
