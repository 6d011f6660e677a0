// [libs/core/sampling/src/bernoulli.rs]
/*!
 * =================================================================
 * APARATO: BERNOULLI BITPACK SYNTHESIZER (V8.1 - SILICON ALIGNED)
 * CLASIFICACIÓN: CORE SAMPLING (ESTRATO L1)
 * RESPONSABILIDAD: SÍNTESIS DE WORDS DE MUESTRAS BERNOULLI(p)
 *
 * # Mathematical Proof (Uniform Mapping):
 * Cada word de 32 bits del Philox se proyecta a [0,1) multiplicando
 * por 2^-32; la comparación estricta contra p emite un bit Bernoulli.
 * Con p=0 ningún uniforme satisface u < 0; con p=1 todos lo hacen,
 * pues max(u) = (2^32-1)/2^32 < 1. Las leyes de frontera son exactas.
 * =================================================================
 */

use crate::bitpack::Bitpack;
use crate::philox::{philox_generate, stream_key, PhiloxState};

/// Proyección de un word de 32 bits al intervalo [0,1).
const INV_UINT32_RANGE: f64 = 1.0 / 4_294_967_296.0;

/// Muestras emitidas por invocación del generador (una por carril).
const SAMPLES_PER_PHILOX_CALL: u32 = 4;

/// Coordenadas de un punto de muestreo dentro del pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SamplerArgs {
    /// Índice estable del nodo en el PDAG.
    pub node_index: u32,
    /// Slot del evento dentro del kernel que lo procesa.
    pub event_slot: u32,
    /// Batch dentro de la forma de muestreo.
    pub batch_id: u32,
    /// Posición del bit-pack dentro del batch.
    pub bitpack_idx: u32,
    /// Iteración monótona del pipeline (1-indexada).
    pub iteration: u32,
}

/// Emite un nibble de 4 muestras Bernoulli(p) para un contador dado.
#[inline(always)]
fn sample_four_bits(counter: &PhiloxState, key: (u32, u32), probability: f64) -> u8 {
    let uniforms = philox_generate(counter, key);

    let mut nibble = 0u8;
    nibble |= u8::from((uniforms.lanes[0] as f64) * INV_UINT32_RANGE < probability);
    nibble |= u8::from((uniforms.lanes[1] as f64) * INV_UINT32_RANGE < probability) << 1;
    nibble |= u8::from((uniforms.lanes[2] as f64) * INV_UINT32_RANGE < probability) << 2;
    nibble |= u8::from((uniforms.lanes[3] as f64) * INV_UINT32_RANGE < probability) << 3;
    nibble
}

/// Sintetiza un bit-pack completo de muestras Bernoulli(p).
///
/// El word se llena en W/4 rondas de slice; cada ronda consume un
/// stream Philox distinto derivado de (iteración, ronda), de modo que
/// ningún nibble del word correlaciona con otro.
#[inline]
pub fn generate_bitpack<B: Bitpack>(args: &SamplerArgs, probability: f64) -> B {
    debug_assert!((0.0..=1.0).contains(&probability));

    let num_slice_rounds = B::BITS / SAMPLES_PER_PHILOX_CALL;
    let counter = PhiloxState::for_sample_point(
        args.node_index,
        args.event_slot,
        args.batch_id,
        args.bitpack_idx,
    );

    let mut bitpacked_sample = B::ZERO;
    for slice_round in 0..num_slice_rounds {
        let key = stream_key(args.iteration, slice_round);
        let nibble = sample_four_bits(&counter, key, probability);
        bitpacked_sample |= B::from_nibble(nibble) << (SAMPLES_PER_PHILOX_CALL * slice_round);
    }

    bitpacked_sample
}
