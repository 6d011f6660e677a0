// [libs/domain/simulation/src/stats.rs]
/*!
 * =================================================================
 * APARATO: BERNOULLI TALLY STATISTICS (V4.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MATH (ESTRATO L2)
 * RESPONSABILIDAD: MEDIA, ERROR ESTÁNDAR E INTERVALOS DE CONFIANZA
 *
 * # Mathematical Proof (Bernoulli Estimator):
 * Para n bits muestreados con c unos, la media muestral es c/n y la
 * varianza del estimador es p(1-p)/n; el error estándar es su raíz.
 * Los intervalos al 95%/99% usan los cuantiles normales bilaterales
 * z = 1.959963984540054 y z = 2.5758293035489004, recortados a [0,1].
 * =================================================================
 */

/// Cuantil normal bilateral para el intervalo de confianza del 95%.
pub const Z_SCORE_95: f64 = 1.959963984540054;
/// Cuantil normal bilateral para el intervalo de confianza del 99%.
pub const Z_SCORE_99: f64 = 2.5758293035489004;

/// Media muestral de un tally booleano.
#[inline]
pub fn mean(num_one_bits: u64, total_bits: u64) -> f64 {
    if total_bits == 0 {
        return 0.0;
    }
    num_one_bits as f64 / total_bits as f64
}

/// Varianza Bernoulli p(1-p) de la media dada.
#[inline]
pub fn variance(mean: f64) -> f64 {
    mean * (1.0 - mean)
}

/// Error estándar de la media muestral.
#[inline]
pub fn standard_error(mean: f64, total_bits: u64) -> f64 {
    if total_bits == 0 {
        return 0.0;
    }
    (variance(mean) / total_bits as f64).sqrt()
}

/// Intervalos [low95, high95, low99, high99], recortados a [0,1].
#[inline]
pub fn confidence_intervals(mean: f64, std_err: f64) -> [f64; 4] {
    let margin_95 = Z_SCORE_95 * std_err;
    let margin_99 = Z_SCORE_99 * std_err;
    [
        (mean - margin_95).clamp(0.0, 1.0),
        (mean + margin_95).clamp(0.0, 1.0),
        (mean - margin_99).clamp(0.0, 1.0),
        (mean + margin_99).clamp(0.0, 1.0),
    ]
}

/// Error absoluto entre una estimación y su referencia.
#[inline]
pub fn absolute_error(estimate: f64, reference: f64) -> f64 {
    (estimate - reference).abs()
}

/// Error relativo respecto de una referencia no nula.
#[inline]
pub fn relative_error(estimate: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return f64::INFINITY;
    }
    absolute_error(estimate, reference) / reference.abs()
}
