// [libs/core/sampling/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SAMPLING CORE HUB (V11.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: CORE LIBRARY (ESTRATO L1)
 * RESPONSABILIDAD: MUESTREO BERNOULLI BIT-PARALELO DETERMINISTA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STATELESS PURITY: El PRNG Philox es una función pura del contador;
 *    cero estado compartido entre hilos del dispositivo.
 * 2. BIT-PACK SOVEREIGNTY: Un solo word de máquina transporta entre 8 y
 *    64 muestras Bernoulli independientes del mismo nodo.
 * 3. NOMINAL CONSISTENCY: Reexportaciones canónicas vía prelude.
 *
 * # Mathematical Proof (Counter-Based Reproducibility):
 * Dos ejecuciones con la misma forma de muestreo y los mismos índices
 * de nodo producen buffers bit-perfectos idénticos, pues cada palabra
 * generada depende únicamente de (nodo, slot, batch, bitpack, iteración).
 * =================================================================
 */

pub mod bernoulli;
pub mod bitpack;
pub mod philox;
pub mod shape;

/// Reexportaciones canónicas para los estratos superiores.
pub mod prelude {
    pub use crate::bernoulli::{generate_bitpack, SamplerArgs};
    pub use crate::bitpack::Bitpack;
    pub use crate::philox::{philox_generate, stream_key, PhiloxState};
    pub use crate::shape::SampleShape;
}
