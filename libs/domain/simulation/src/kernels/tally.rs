// [libs/domain/simulation/src/kernels/tally.rs]
/*!
 * =================================================================
 * APARATO: TALLY REDUCTION KERNEL (V11.0 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN KERNELS (ESTRATO L2)
 * RESPONSABILIDAD: POPCOUNT POR GRUPO, ATÓMICOS Y ESTADÍSTICAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GROUP ATOMICS: Cada work-group reduce sus popcounts localmente y
 *    el líder emite un único fetch_add relajado sobre num_one_bits.
 * 2. SINGLE-COLUMN LAW: El planificador confina cada tally a un solo
 *    work-group en el eje de eventos; la aserción de despegue lo
 *    verifica defensivamente, pues violarlo corrompe la finalización.
 * 3. LEADER FINALIZATION: Tras la barrera del grid (join del pool), un
 *    único hilo recomputa media, error estándar e intervalos.
 *
 * # Mathematical Proof (Monotone Accumulation):
 * num_one_bits solo recibe sumas no negativas; total_bits crece
 * linealmente con la iteración, por lo que la media permanece en [0,1]
 * y el acumulador es monótono entre iteraciones.
 * =================================================================
 */

use std::sync::atomic::Ordering;

use rayon::prelude::*;

use arbol_core_device::range::NdRange;
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;

use crate::records::{TallyEvent, TallySnapshot};
use crate::stats;

/// Kernel iterable de reducción de tallies.
#[derive(Debug)]
pub struct TallyKernel<B: Bitpack> {
    records: Vec<TallyEvent>,
    shape: SampleShape,
    nd_range: NdRange,
    _bitpack: std::marker::PhantomData<B>,
}

impl<B: Bitpack> TallyKernel<B> {
    pub fn new(records: Vec<TallyEvent>, shape: SampleShape, nd_range: NdRange) -> Self {
        Self {
            records,
            shape,
            nd_range,
            _bitpack: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn num_tallies(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[TallyEvent] {
        &self.records
    }

    /// Instantánea del registro en la posición `slot` del lote.
    pub fn snapshot(&self, slot: usize) -> TallySnapshot {
        self.records[slot].snapshot()
    }

    /// Acumula popcounts y recomputa estadísticas para la iteración.
    ///
    /// `arena` es la vista completa de solo lectura de los buffers.
    pub fn execute(&mut self, arena: &[B], iteration: u32) {
        // Ley de columna única: un work-group por tally en el eje de
        // eventos. Violarla dejaría la finalización en carrera con los
        // atómicos de otros grupos.
        assert_eq!(
            self.nd_range.local.events, 1,
            "tally launch requires exactly one work-group per tally on the events axis"
        );

        let buffer_len = self.shape.num_bitpacks();
        let bitpacks_per_batch = self.shape.bitpacks_per_batch;
        let tile_width = self.nd_range.local.bitpacks;
        let total_bits = iteration as u64 * self.shape.sampled_bits_per_iteration::<B>();

        for record in &mut self.records {
            let start = record.buffer.0 * buffer_len;
            let tallied_buffer = &arena[start..start + buffer_len];
            let accumulator = &record.num_one_bits;

            // Reducción por grupo: popcount local y un atómico relajado
            // por tile, emitido por el líder del grupo.
            tallied_buffer
                .par_chunks(bitpacks_per_batch)
                .for_each(|batch_row| {
                    for tile in batch_row.chunks(tile_width) {
                        let group_sum: u64 =
                            tile.iter().map(|word| word.count_ones() as u64).sum();
                        accumulator.fetch_add(group_sum, Ordering::Relaxed);
                    }
                });

            // Finalización del líder tras la barrera del grid.
            let num_one_bits = record.num_one_bits.load(Ordering::Relaxed);
            record.mean = stats::mean(num_one_bits, total_bits);
            record.std_err = stats::standard_error(record.mean, total_bits);
            record.confidence_intervals = stats::confidence_intervals(record.mean, record.std_err);
        }
    }
}
